//! Worker configuration via `loupe.toml`
//!
//! The engine itself has no tunables. The host side chooses how the worker
//! thread is named and how many messages may wait in its queue.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "loupe.toml";

/// Worker configuration loaded from `loupe.toml`.
///
/// # Example
///
/// ```toml
/// thread_name = "loupe-worker"
/// queue_capacity = 1024
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Name of the worker OS thread.
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
    /// Messages that may wait in the inbound queue before `post` blocks.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_thread_name() -> String {
    "loupe-worker".to_string()
}

fn default_queue_capacity() -> usize {
    1024
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: default_thread_name(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl WorkerConfig {
    /// Builder: set thread name
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Builder: set queue capacity
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Check the values are usable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero queue capacity.
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(Error::InvalidInput {
                reason: "queue_capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Loupe worker configuration
#
# Name of the worker thread (default: "loupe-worker")
thread_name = "loupe-worker"

# Messages that may wait in the inbound queue (default: 1024).
# When full, post() blocks and try_post() fails with "worker queue is full".
queue_capacity = 1024
"#
    }

    /// Parse config from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WorkerConfig = toml::from_str(content).map_err(|e| Error::InvalidInput {
            reason: format!("Failed to parse worker config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::InvalidInput { reason } => Error::InvalidInput {
                reason: format!("{} ({})", reason, path.display()),
            },
            other => other,
        })
    }
}
