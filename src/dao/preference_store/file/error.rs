//! Error types of the JSON file preference store.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias returning [`FileStoreError`] failures.
pub type FileStoreResult<T> = Result<T, FileStoreError>;

/// Failures that can occur while reading or writing the preferences file.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// The preferences file exists but could not be read.
    #[error("failed to read preferences file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The preferences file is not a JSON object of strings.
    #[error("failed to parse preferences file `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Serialising the values failed.
    #[error("failed to encode preferences")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    /// Writing or renaming the preferences file failed.
    #[error("failed to write preferences file `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The directory holding the file is gone or not a directory.
    #[error("preferences directory `{path}` is not available")]
    MissingDirectory { path: PathBuf },
}
