//! Error types for gc-content

/// Result type for gc-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gc-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A template could not be rendered. No partial output is produced.
    #[error("Template `{template}` has an error of `{message}`")]
    TemplateRender {
        template: String,
        kind: crate::template::TemplateErrorKind,
        message: String,
    },

    /// No parser dialect is registered for the platform.
    #[error("There is currently no parser support for platform `{platform}`")]
    UnsupportedPlatform { platform: String },

    /// The configuration text could not be built into a hierarchy.
    #[error("Malformed {dialect} configuration at line {line}: {message}")]
    MalformedConfig {
        dialect: String,
        line: usize,
        message: String,
    },
}

impl Error {
    pub fn template(
        template: impl Into<String>,
        kind: crate::template::TemplateErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::TemplateRender {
            template: template.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn malformed(dialect: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::MalformedConfig {
            dialect: dialect.into(),
            line,
            message: message.into(),
        }
    }
}
