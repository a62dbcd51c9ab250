//! Configuration types for the vault store.
//!
//! Follows a builder pattern for complex configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Store configuration: one vault root plus scanning and runtime knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the vault directory
    pub vault_path: PathBuf,
    /// Directory names skipped by every scan (matched against each path component)
    pub excluded_dirs: BTreeSet<String>,
    /// Folders probed for `<YYYY-MM-DD>.md` daily notes, in order ("" is the vault root)
    pub daily_note_folders: Vec<String>,
    /// Deadline imposed by the async facade on each call
    pub operation_timeout_secs: Option<u64>,
    /// Log filter directive used when neither CLI nor RUST_LOG override it
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            vault_path: PathBuf::new(),
            excluded_dirs: [".obsidian", ".git", ".trash"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            daily_note_folders: ["Daily", "daily", "", "Journal"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            operation_timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create a new config builder for the given vault path
    pub fn builder(vault_path: impl Into<PathBuf>) -> StoreConfigBuilder {
        StoreConfigBuilder::new(vault_path)
    }

    /// Validate the configuration: the vault root must exist and be a directory
    pub fn validate(&self) -> Result<()> {
        if self.vault_path.as_os_str().is_empty() {
            return Err(Error::config_error("Vault path cannot be empty"));
        }

        if !self.vault_path.exists() {
            return Err(Error::config_error(format!(
                "Vault path does not exist: {}",
                self.vault_path.display()
            )));
        }

        if !self.vault_path.is_dir() {
            return Err(Error::config_error(format!(
                "Vault path is not a directory: {}",
                self.vault_path.display()
            )));
        }

        if self.operation_timeout_secs == Some(0) {
            return Err(Error::config_error(
                "operation_timeout_secs must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Deadline for one facade call, if configured
    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout_secs.map(Duration::from_secs)
    }

    /// Whether a directory name is excluded from scans
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    /// Load configuration from a YAML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!(
                "Failed to load configuration from {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config: StoreConfig = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;

        config.vault_path = expand_path(&config.vault_path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for StoreConfig
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Create a new builder
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            config: StoreConfig {
                vault_path: vault_path.into(),
                ..StoreConfig::default()
            },
        }
    }

    /// Add a directory name to skip during scans
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_dirs.insert(name.into());
        self
    }

    /// Replace the daily note folder probe list
    pub fn daily_note_folders(mut self, folders: Vec<String>) -> Self {
        self.config.daily_note_folders = folders;
        self
    }

    /// Set the per-call deadline in seconds
    pub fn operation_timeout_secs(mut self, secs: u64) -> Self {
        self.config.operation_timeout_secs = Some(secs);
        self
    }

    /// Set the default log filter
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Expand, build and validate
    pub fn build(mut self) -> Result<StoreConfig> {
        self.config.vault_path = expand_path(&self.config.vault_path)?;
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Expand tilde and environment variables in a path
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::config_error("Vault path contains invalid UTF-8"))?;

    let expanded = shellexpand::full(path_str)
        .map_err(|e| Error::config_error(format!("Failed to expand path: {}", e)))?;

    Ok(PathBuf::from(expanded.as_ref()))
}
