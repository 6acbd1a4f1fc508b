use std::io::Error as IoError;
use std::path::PathBuf;

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("unable to list functions under {path:?}: {source}")]
    ReadRoot { path: PathBuf, source: IoError },
    #[error("unable to read {path:?}: {source}")]
    ReadDescriptor { path: PathBuf, source: IoError },
    #[error("invalid descriptor {path:?}: {source}")]
    ParseDescriptor {
        path: PathBuf,
        source: SerdeJsonError,
    },
}
