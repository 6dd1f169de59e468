//! Dataset error types.
//!
//! Raised only while loading datasets at startup. Lookups never fail; they
//! report a missing concept, persona or dialect as `None`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be read.
    #[error("failed to read dataset {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON of the expected shape.
    #[error("failed to parse dataset {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DatasetError {
    /// The dataset file that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            DatasetError::Io { path, .. } | DatasetError::Parse { path, .. } => path,
        }
    }
}
