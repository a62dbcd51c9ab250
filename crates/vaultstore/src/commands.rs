//! Command definitions and dispatch onto a [`VaultStore`]

use crate::VaultStore;
use crate::response::StandardResponse;
use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use serde_json::Value;
use vaultstore_core::prelude::*;
use vaultstore_core::TransactionBuilder;
use vaultstore_tools::{MetadataFilter, ResponseFormat};

/// One store operation
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read one or more documents
    Read {
        /// Vault-relative paths; the first readable one is primary
        #[arg(required = true)]
        paths: Vec<String>,
        /// Include documents linking to the (single) target
        #[arg(long)]
        with_backlinks: bool,
    },
    /// List documents in a folder
    List {
        #[arg(default_value = "")]
        folder: String,
        /// Immediate children only
        #[arg(long)]
        shallow: bool,
        /// Documents summarized when --format is given
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
        /// Summarize results (concise or detailed) instead of returning full documents
        #[arg(long)]
        format: Option<ResponseFormat>,
    },
    /// Rank documents by relevance to a query
    Search {
        query: String,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
        /// Summarize results (concise or detailed) instead of returning full documents
        #[arg(long)]
        format: Option<ResponseFormat>,
    },
    /// Filter documents by tags, modification age and folder
    Filter {
        /// Any-match tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Modified within this many days
        #[arg(short, long)]
        days: Option<u32>,
        #[arg(short, long)]
        folder: Option<String>,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
        /// Summarize results (concise or detailed) instead of returning full documents
        #[arg(long)]
        format: Option<ResponseFormat>,
    },
    /// Documents linking to a document name
    Backlinks { name: String },
    /// A document and the documents most similar to it
    Related {
        path: String,
        #[arg(short, long, default_value_t = 5)]
        max: usize,
        /// Summarize results (concise or detailed) instead of returning full documents
        #[arg(long)]
        format: Option<ResponseFormat>,
    },
    /// Daily note for a date (YYYY-MM-DD, default today)
    Daily {
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Create a document
    Write {
        path: String,
        #[arg(short, long)]
        content: String,
        /// Frontmatter as a JSON object
        #[arg(short, long)]
        meta: Option<String>,
        #[arg(long)]
        overwrite: bool,
    },
    /// Replace a document's body, keeping its frontmatter unless --meta is given
    Update {
        path: String,
        #[arg(short, long)]
        content: String,
        #[arg(short, long)]
        meta: Option<String>,
    },
    /// Append text to a document on a new line
    Append {
        path: String,
        #[arg(short, long)]
        content: String,
    },
    /// Delete a document
    Delete { path: String },
    /// Move or rename a document
    Move {
        from: String,
        to: String,
        #[arg(long)]
        create_parents: bool,
    },
    /// Create a folder
    Mkdir {
        path: String,
        #[arg(long)]
        exist_ok: bool,
    },
    /// Delete a folder
    Rmdir {
        path: String,
        #[arg(short, long)]
        recursive: bool,
    },
    /// Move or rename a folder
    Mvdir { from: String, to: String },
    /// Add tags to many documents
    BulkTag {
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,
        #[arg(required = true)]
        targets: Vec<String>,
    },
    /// Move many documents into one folder
    BulkMove {
        #[arg(long)]
        to: String,
        #[arg(long)]
        create_parents: bool,
        #[arg(required = true)]
        targets: Vec<String>,
    },
    /// Overlay metadata keys onto many documents
    BulkMeta {
        /// Metadata as a JSON object
        #[arg(short, long)]
        meta: String,
        #[arg(required = true)]
        targets: Vec<String>,
    },
    /// Most recently modified documents
    Recent {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
        /// Summarize results (concise or detailed) instead of returning full documents
        #[arg(long)]
        format: Option<ResponseFormat>,
    },
}

impl Command {
    /// Operation name used in responses and logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Read { .. } => "read",
            Command::List { .. } => "list",
            Command::Search { .. } => "search",
            Command::Filter { .. } => "filter",
            Command::Backlinks { .. } => "backlinks",
            Command::Related { .. } => "related",
            Command::Daily { .. } => "daily",
            Command::Write { .. } => "write",
            Command::Update { .. } => "update",
            Command::Append { .. } => "append",
            Command::Delete { .. } => "delete",
            Command::Move { .. } => "move",
            Command::Mkdir { .. } => "mkdir",
            Command::Rmdir { .. } => "rmdir",
            Command::Mvdir { .. } => "mvdir",
            Command::BulkTag { .. } => "bulk_tag",
            Command::BulkMove { .. } => "bulk_move",
            Command::BulkMeta { .. } => "bulk_update_metadata",
            Command::Recent { .. } => "recent",
        }
    }
}

/// Run `command` against `store`, producing the JSON response envelope
pub async fn execute(store: &VaultStore, command: Command) -> Result<Value> {
    let operation = command.name();
    let timer = TransactionBuilder::new();
    log::debug!("vault.command_started: {}", operation);

    let response = match command {
        Command::Read {
            paths,
            with_backlinks,
        } => {
            let context = if with_backlinks {
                if paths.len() != 1 {
                    return Err(Error::config_error(
                        "--with-backlinks takes exactly one path",
                    ));
                }
                store.context.note_with_backlinks(&paths[0]).await?
            } else if paths.len() == 1 {
                store.context.read_note(&paths[0]).await?
            } else {
                store.context.read_multiple(paths).await?
            };
            respond(operation, &timer, context)
        }
        Command::List {
            folder,
            shallow,
            limit,
            format,
        } => match format {
            Some(format) => respond(
                operation,
                &timer,
                store.query.list_structure(&folder, limit, format).await?,
            ),
            None => {
                let listed = store.files.list(&folder, !shallow).await?;
                respond_list(operation, &timer, listed)
            }
        },
        Command::Search {
            query,
            limit,
            format,
        } => match format {
            Some(format) => respond(
                operation,
                &timer,
                store.query.search(&query, limit, format).await?,
            ),
            None => respond_list(
                operation,
                &timer,
                store.search.search_scored(&query, limit).await?,
            ),
        },
        Command::Filter {
            tags,
            days,
            folder,
            limit,
            format,
        } => {
            let filter = MetadataFilter {
                tags,
                modified_within_days: days,
                folder,
                limit,
            };
            match format {
                Some(format) => {
                    respond(operation, &timer, store.query.by_metadata(filter, format).await?)
                }
                None => respond_list(operation, &timer, store.metadata.filter(filter).await?),
            }
        }
        Command::Backlinks { name } => {
            respond_list(operation, &timer, store.search.backlinks(&name).await?)
        }
        Command::Related { path, max, format } => match format {
            Some(format) => respond(
                operation,
                &timer,
                store.query.find_related(&path, max, format).await?,
            ),
            None => respond(operation, &timer, store.context.gather_related(&path, max).await?),
        },
        Command::Daily { date } => respond(operation, &timer, store.context.daily_note(date).await?),
        Command::Write {
            path,
            content,
            meta,
            overwrite,
        } => {
            let metadata = meta.as_deref().map(parse_metadata).transpose()?;
            let written = store.files.write(&path, &content, metadata, overwrite).await?;
            respond(operation, &timer, written)
        }
        Command::Update {
            path,
            content,
            meta,
        } => {
            let metadata = meta.as_deref().map(parse_metadata).transpose()?;
            respond(operation, &timer, store.files.update(&path, &content, metadata).await?)
        }
        Command::Append { path, content } => {
            respond(operation, &timer, store.files.append(&path, &content).await?)
        }
        Command::Delete { path } => {
            store.files.delete(&path).await?;
            respond(operation, &timer, path)
        }
        Command::Move {
            from,
            to,
            create_parents,
        } => respond(
            operation,
            &timer,
            store.files.move_document(&from, &to, create_parents).await?,
        ),
        Command::Mkdir { path, exist_ok } => {
            respond(operation, &timer, store.files.create_folder(&path, exist_ok).await?)
        }
        Command::Rmdir { path, recursive } => {
            store.files.delete_folder(&path, recursive).await?;
            respond(operation, &timer, path)
        }
        Command::Mvdir { from, to } => {
            respond(operation, &timer, store.files.move_folder(&from, &to).await?)
        }
        Command::BulkTag { tags, targets } => {
            respond(operation, &timer, store.batch.bulk_tag(targets, tags).await?)
        }
        Command::BulkMove {
            to,
            create_parents,
            targets,
        } => respond(
            operation,
            &timer,
            store.batch.bulk_move(targets, &to, create_parents).await?,
        ),
        Command::BulkMeta { meta, targets } => {
            let updates = parse_metadata(&meta)?;
            respond(
                operation,
                &timer,
                store.batch.bulk_update_metadata(targets, updates).await?,
            )
        }
        Command::Recent { limit, format } => match format {
            Some(format) => respond(
                operation,
                &timer,
                store.query.recent_changes(limit, format).await?,
            ),
            None => respond_list(operation, &timer, store.files.recent(limit).await?),
        },
    };

    log::debug!("vault.command_completed: {}", operation);
    response
}

/// Parse a JSON object into frontmatter metadata
pub fn parse_metadata(json: &str) -> Result<Metadata> {
    serde_json::from_str(json).map_err(|e| {
        Error::config_error(format!(
            "metadata must be a JSON object of strings, numbers, booleans or string lists: {}",
            e
        ))
    })
}

fn respond<T: Serialize>(operation: &str, timer: &TransactionBuilder, data: T) -> Result<Value> {
    to_value(StandardResponse::new(operation, data).with_duration(timer.elapsed_ms()))
}

fn respond_list<T: Serialize>(
    operation: &str,
    timer: &TransactionBuilder,
    items: Vec<T>,
) -> Result<Value> {
    let count = items.len();
    to_value(
        StandardResponse::new(operation, items)
            .with_count(count)
            .with_duration(timer.elapsed_ms()),
    )
}

fn to_value<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| Error::other(format!("Failed to serialize response as JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata() {
        let meta = parse_metadata(r#"{"tags": ["a"], "priority": 2, "done": false}"#).unwrap();
        assert_eq!(meta["tags"], MetadataValue::StringList(vec!["a".into()]));
        assert_eq!(meta["priority"], MetadataValue::Integer(2));
        assert_eq!(meta["done"], MetadataValue::Boolean(false));

        assert!(parse_metadata(r#"{"nested": {"a": 1}}"#).is_err());
        assert!(parse_metadata("[1, 2]").is_err());
    }
}
