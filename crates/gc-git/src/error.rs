//! Error types for gc-git

use std::path::PathBuf;

/// Result type for gc-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gc-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository '{name}' has no working directory at {path}")]
    MissingRoot { name: String, path: PathBuf },
}
