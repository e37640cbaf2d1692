use std::path::PathBuf;

use thiserror::Error;

/// Failures of the key-value medium itself. Bad record contents are not a
/// storage error; they surface when the adapter parses them.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to prepare data directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to access record '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}
