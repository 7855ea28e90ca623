use thiserror::Error;

/// Unified error type for release-version operations
#[derive(Error, Debug)]
pub enum ReleaseVersionError {
    /// A tag matched none of the supported version schemes
    #[error("Invalid tag format: '{tag}' - {reason}")]
    InvalidTagFormat { tag: String, reason: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-version
pub type Result<T> = std::result::Result<T, ReleaseVersionError>;

impl ReleaseVersionError {
    /// Create an invalid tag error for `tag`
    pub fn invalid_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        ReleaseVersionError::InvalidTagFormat {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseVersionError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseVersionError::Manifest(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseVersionError::Remote(msg.into())
    }

    /// Whether the pipeline must stop because the tag history cannot be trusted
    pub fn is_invalid_tag(&self) -> bool {
        matches!(self, ReleaseVersionError::InvalidTagFormat { .. })
    }
}
