//! Error types for the playback controller

use thiserror::Error;

/// Result type alias for playback operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving playback
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The attached media source failed to load
    #[error("Failed to load source: {0}")]
    SourceLoadError(String),

    /// A play request was rejected by the media backend (autoplay policy,
    /// decode failure, no playable source)
    #[error("Playback request rejected: {0}")]
    PlaybackRequestError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let e = Error::PlaybackRequestError("autoplay blocked".into());
        assert_eq!(e.to_string(), "Playback request rejected: autoplay blocked");
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(Error::from(err), Error::ConfigError(_)));
    }
}
