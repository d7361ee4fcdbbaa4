use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RtpError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("rtp buffer too short, {required} bytes required but only {actual} available")]
    BufferTooShort { required: usize, actual: usize },
    #[error("too many csrc identifiers: {0}, at most 15 allowed")]
    TooManyCsrc(usize),
    #[error("header extension needs {required} bytes but the buffer holds {capacity}")]
    ExtensionOverflow { required: usize, capacity: usize },
}

pub type RtpResult<T> = Result<T, RtpError>;
