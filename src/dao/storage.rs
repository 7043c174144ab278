use std::error::Error;
use thiserror::Error;

/// Result alias for preference store operations.
pub type StorageResult<T> = Result<T, StorageError>;

type BoxedSource = Box<dyn Error + Send + Sync>;

/// Failure of a preference backend, whatever medium it keeps the values in.
///
/// Callers only distinguish "the store answered" from "it did not"; the backend error
/// stays reachable through [`Error::source`] for logging.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("preference store unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: BoxedSource,
    },
}

impl StorageError {
    /// Wrap a backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn backend_error_is_kept_as_source() {
        let err = StorageError::unavailable(
            "disk full".into(),
            io::Error::new(io::ErrorKind::StorageFull, "no space left"),
        );
        assert_eq!(err.to_string(), "preference store unavailable: disk full");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("no space left")
        );
    }
}
