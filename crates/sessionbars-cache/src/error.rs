//! Cache errors.

use thiserror::Error;

/// Errors from cache reads and writes.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The store could not be reached.
    #[error("Cache connection failed: {0}")]
    Connection(String),

    /// The store rejected or failed a command.
    #[error("Cache command failed for key '{key}': {message}")]
    Command {
        /// Key the command was issued for.
        key: String,
        /// Description of the failure.
        message: String,
    },

    /// A bar could not be serialized.
    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        /// Key being written.
        key: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A cached value could not be deserialized.
    #[error("Failed to deserialize value for key '{key}': {source}")]
    Deserialize {
        /// Key being read.
        key: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
