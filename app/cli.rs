use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum InputFormat {
    /// the packet bytes as they are on the wire
    Raw,
    /// hex digits, whitespace ignored
    Hex,
}

/// Decode one rtp packet and print its header fields, extension and payload.
///
/// The packet is read from INPUT_FILE, from --hex, or from stdin.
#[derive(Parser)]
#[command(version, about, long_about)]
pub(crate) struct AppCli {
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub(crate) config: Option<PathBuf>,
    #[arg(long, value_name = "LOG_LEVEL")]
    pub(crate) log_level: Option<String>,
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub(crate) format: Option<InputFormat>,
    #[arg(long, value_name = "HEX", conflicts_with = "input")]
    pub(crate) hex: Option<String>,
    #[arg(value_name = "INPUT_FILE")]
    pub(crate) input: Option<PathBuf>,
}
