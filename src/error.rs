use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`FeatureError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Parse,
    Malformed,
    Io,
    Transform,
    Other,
}

/// Error type for parameter loading, dataset IO, and TF-IDF transformation.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to parse '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("malformed file '{}': {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("I/O failure on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("TF-IDF transformation failed: {0}")]
    Transform(String),
    #[error("missing parameter '{0}'")]
    MissingParameter(String),
    #[error("invalid parameter '{key}': {reason}")]
    InvalidParameter { key: String, reason: String },
    #[error("logger already initialized: {0}")]
    Logging(#[from] log::SetLoggerError),
}

impl FeatureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeatureError::NotFound { .. } => ErrorKind::NotFound,
            FeatureError::Parse { .. } => ErrorKind::Parse,
            FeatureError::Malformed { .. } => ErrorKind::Malformed,
            FeatureError::Io { .. } => ErrorKind::Io,
            FeatureError::Transform(_) => ErrorKind::Transform,
            FeatureError::MissingParameter(_)
            | FeatureError::InvalidParameter { .. }
            | FeatureError::Logging(_) => ErrorKind::Other,
        }
    }

    /// Classify an `io::Error` raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => FeatureError::NotFound { path },
            _ => FeatureError::Io { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, FeatureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_maps_to_not_found_kind() {
        let err = FeatureError::from_io("params.yaml", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("params.yaml"));
    }

    #[test]
    fn other_io_errors_keep_their_source() {
        let err = FeatureError::from_io(
            "data/processed",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn parameter_errors_are_unclassified() {
        let err = FeatureError::MissingParameter("feature_engineering.max_features".into());
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
