//! Configuration for bucketkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{BucketError, Result};

/// Configuration for opening a database
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Database file, created if it does not exist
    pub path: PathBuf,

    /// POSIX permission bits applied when the file is created (Unix only)
    pub file_mode: u32,

    // -------------------------------------------------------------------------
    // Engine Configuration
    // -------------------------------------------------------------------------
    /// Page cache size in bytes; `None` keeps the engine default
    pub cache_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("bucketkv.db"),
            file_mode: 0o644,
            cache_size: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config before handing it to the engine
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(BucketError::Config("database path is empty".to_string()));
        }
        if self.file_mode > 0o7777 {
            return Err(BucketError::Config(format!(
                "invalid file mode {:o}",
                self.file_mode
            )));
        }
        if self.cache_size == Some(0) {
            return Err(BucketError::Config("cache size must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the permission bits for a newly created file
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    /// Set the engine page cache size (in bytes)
    pub fn cache_size(mut self, bytes: usize) -> Self {
        self.config.cache_size = Some(bytes);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
