//! Error types for gc-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from gc-core
    #[error(transparent)]
    Core(#[from] gc_core::Error),

    /// Error from gc-meta
    #[error(transparent)]
    Meta(#[from] gc_meta::Error),

    /// Error from gc-fs
    #[error(transparent)]
    Fs(#[from] gc_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A worker task panicked or was cancelled
    #[error("Compliance worker failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
