use std::io;

use config::ConfigError;
use rtp_formats::errors::RtpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("rtp error: {0}")]
    RtpError(#[from] RtpError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
}

pub(crate) type AppResult<T> = Result<T, AppError>;
