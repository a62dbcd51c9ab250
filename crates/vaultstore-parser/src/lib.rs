//! # vaultstore parser
//!
//! Text-level codecs for vault documents:
//!
//! - [`frontmatter`] - split, decode and encode the leading YAML block
//! - [`wikilinks`] - extract `[[Target|Alias]]` references from a body
//!
//! ## Quick Start
//!
//! ```
//! use vaultstore_parser::{decode, extract_wikilinks};
//!
//! let raw = "---\ntitle: My Note\ntags: [review]\n---\nSee [[Other Note]].";
//! let (frontmatter, body) = decode(raw);
//!
//! assert_eq!(frontmatter.unwrap().title.as_deref(), Some("My Note"));
//! assert_eq!(extract_wikilinks(&body)[0].target, "Other Note");
//! ```
//!
//! Decoding is lenient: malformed YAML leaves the whole text as the body and
//! is reported through `log` at WARN level.

pub mod frontmatter;
pub mod wikilinks;

pub use frontmatter::{RawSplit, decode, encode, split_block, try_decode};
pub use wikilinks::{WikiLinkRef, extract_wikilinks, link_targets, normalize_link_name};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::frontmatter::{decode, encode, split_block};
    pub use crate::wikilinks::{WikiLinkRef, extract_wikilinks, link_targets};
}
