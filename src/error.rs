//! Error types shared by the terminal session and the prompts.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown key sequence: {0:?}")]
    UnrecognizedSequence(Vec<u8>),

    #[error("Unexpected cursor position response: {0:?}")]
    MalformedReply(String),

    #[error("User aborted")]
    UserAborted,

    #[error("No items to select")]
    EmptyInput,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PromptError {
    /// True for the outcome produced by an abort key rather than a fault.
    pub fn is_abort(&self) -> bool {
        matches!(self, PromptError::UserAborted)
    }
}

pub type Result<T> = std::result::Result<T, PromptError>;
