//! Error types for gc-meta

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] gc_fs::Error),

    #[error("{message}")]
    SettingsInvalid { message: String },

    #[error("Missing the required global setting: `{name}`.")]
    MissingSetting { name: String },

    #[error("Rule '{rule}' is invalid: {message}")]
    RuleInvalid { rule: String, message: String },

    #[error("Rule '{rule}' is defined more than once for platform `{platform}`")]
    DuplicateRule { rule: String, platform: String },

    #[error(
        "The following device(s) {} have no platform defined. Platform is required.",
        .devices.join(", ")
    )]
    MissingPlatform { devices: Vec<String> },

    #[error("Invalid device filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },
}

impl Error {
    pub(crate) fn settings(message: impl Into<String>) -> Self {
        Self::SettingsInvalid {
            message: message.into(),
        }
    }
}
