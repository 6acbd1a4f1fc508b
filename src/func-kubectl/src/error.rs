use std::io::Error as IoError;

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("unable to launch {command}: {source}")]
    Spawn { command: String, source: IoError },
    #[error("error running {command}.\noutput: {stdout}\n{stderr}")]
    CommandFailed {
        command: String,
        stdout: String,
        stderr: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] IoError),
    #[error("Json error: {0}")]
    Json(#[from] SerdeJsonError),
}
