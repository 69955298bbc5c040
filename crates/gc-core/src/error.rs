//! Error types for gc-core

use gc_fs::NormalizedPath;
use gc_meta::RepositoryKind;

/// Result type for gc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gc-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No repository of the kind is configured at all
    #[error("There is no {kind} repository configured.")]
    NoRepositoryConfigured { kind: RepositoryKind },

    /// Several repositories but nothing to choose between them with
    #[error(
        "{count} {kind} repositories are configured but the {kind} repository matching rule template is empty."
    )]
    MissingMatchingTemplate { kind: RepositoryKind, count: usize },

    /// The rendered matching template named no configured repository
    #[error(
        "There is no {kind} repository matching '{target}' for device. Verify the matching rule and configured repositories."
    )]
    RepositoryResolution {
        kind: RepositoryKind,
        target: NormalizedPath,
    },

    /// A resolved configuration file does not exist
    #[error("Unable to locate {kind} file for device at {path}")]
    ConfigFileMissing {
        kind: RepositoryKind,
        path: NormalizedPath,
    },

    #[error("Device has no platform defined. Platform is required.")]
    DeviceWithoutPlatform,

    #[error("There is no defined `Configuration Rule` for platform slug `{platform}`.")]
    NoRuleForPlatform { platform: String },

    /// A store lock was poisoned by a panicking writer
    #[error("Compliance store is unavailable: {message}")]
    StoreUnavailable { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from gc-fs
    #[error(transparent)]
    Fs(#[from] gc_fs::Error),

    /// Template, parser or evaluation error from gc-content
    #[error(transparent)]
    Content(#[from] gc_content::Error),

    /// Git error from gc-git
    #[error(transparent)]
    Git(#[from] gc_git::Error),

    /// Settings or rule error from gc-meta
    #[error(transparent)]
    Meta(#[from] gc_meta::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error is an expected, device-specific condition.
    ///
    /// Device-local errors fail the current device and the batch moves on;
    /// anything else aborts the batch.
    pub fn is_device_local(&self) -> bool {
        match self {
            Self::NoRepositoryConfigured { .. }
            | Self::MissingMatchingTemplate { .. }
            | Self::RepositoryResolution { .. }
            | Self::ConfigFileMissing { .. }
            | Self::DeviceWithoutPlatform
            | Self::NoRuleForPlatform { .. } => true,
            Self::Fs(gc_fs::Error::FileNotFound { .. }) => true,
            Self::Content(
                gc_content::Error::TemplateRender { .. }
                | gc_content::Error::UnsupportedPlatform { .. }
                | gc_content::Error::MalformedConfig { .. },
            ) => true,
            _ => false,
        }
    }
}
