use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::persist::PersistError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("mail store not found at {0}")]
    StoreMissing(PathBuf),
    #[error("folder {0} does not exist")]
    UnknownFolder(String),
    #[error("folder list could not be loaded")]
    NoFolders,
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("destination {path} is unusable: {reason}")]
    Destination { path: PathBuf, reason: String },
    #[error("could not serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(PersistError),
}

impl From<PersistError> for SinkError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::OutputDir { path, reason } => SinkError::Destination { path, reason },
            other => SinkError::Persist(other),
        }
    }
}
