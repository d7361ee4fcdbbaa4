use std::{
    fs,
    io::{self, Read},
};

use config::ConfigError;
use rtp_formats::packet::RtpPacket;
use utils::bytes::{bytes_to_hex, hex_to_bytes};

use crate::{
    AppCli,
    cli::InputFormat,
    errors::{AppError, AppResult},
};

pub(crate) fn parse_log_level(level: &str) -> AppResult<tracing::Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        other => Err(AppError::ConfigError(ConfigError::Message(format!(
            "got unexpected log level: {}",
            other
        )))),
    }
}

fn decode_hex(text: &str) -> AppResult<Vec<u8>> {
    hex_to_bytes(text).ok_or_else(|| {
        AppError::InvalidHex(format!(
            "expect an even number of hex digits, got {} characters",
            text.trim().len()
        ))
    })
}

fn decode_input(content: Vec<u8>, format: InputFormat) -> AppResult<Vec<u8>> {
    match format {
        InputFormat::Raw => Ok(content),
        InputFormat::Hex => decode_hex(&String::from_utf8_lossy(&content)),
    }
}

/// Load the packet named on the command line, `--hex` wins over a file, stdin is the fallback.
pub(crate) fn load_packet(cli_args: &AppCli, format: InputFormat) -> AppResult<RtpPacket> {
    let bytes = match (&cli_args.hex, &cli_args.input) {
        (Some(hex), _) => decode_hex(hex)?,
        (None, Some(path)) => {
            tracing::debug!("reading rtp packet from {}", path.display());
            decode_input(fs::read(path)?, format)?
        }
        (None, None) => {
            tracing::debug!("reading rtp packet from stdin");
            let mut content = Vec::new();
            io::stdin().read_to_end(&mut content)?;
            decode_input(content, format)?
        }
    };
    tracing::debug!("loaded {} bytes", bytes.len());
    tracing::trace!("packet bytes: {}", bytes_to_hex(&bytes));
    Ok(RtpPacket::copy_from_bytes(&bytes)?)
}
