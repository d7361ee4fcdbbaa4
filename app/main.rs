mod cli;
mod config;
mod errors;
mod util;

use std::{io, process::ExitCode};

use clap::Parser;
use cli::AppCli;
use crate::config::AppConfig;
use errors::AppResult;
use time::macros::format_description;
use tracing::{self, Dispatch, level_filters::LevelFilter};
use tracing_subscriber::{self, EnvFilter, fmt::time::LocalTime};
use util::{load_packet, parse_log_level};

fn load_config(cli_args: &AppCli) -> AppResult<AppConfig> {
    let mut config = AppConfig::new(cli_args.config.clone())?;
    config.apply(cli_args)?;
    config.validate()?;
    Ok(config)
}

fn init_logger(config: &AppConfig) -> AppResult<()> {
    let level = parse_log_level(&config.logger.level)?;
    let subscriber = tracing_subscriber::fmt()
        .with_timer(LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] [unix_timestamp precision:nanosecond]"
        )))
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        // the dump goes to stdout, keep logs out of it
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(level).into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .finish();
    if let Err(err) = tracing::dispatcher::set_global_default(Dispatch::new(subscriber)) {
        eprintln!("failed to install the logger: {}", err);
    }
    Ok(())
}

fn run(cli_args: &AppCli, config: &AppConfig) -> AppResult<()> {
    let packet = load_packet(cli_args, config.dump.format)?;
    packet.print_to(io::stdout().lock())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli_args = AppCli::parse();

    let config = match load_config(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("rtp-dump: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logger(&config) {
        eprintln!("rtp-dump: {}", err);
        return ExitCode::FAILURE;
    }

    tracing::debug!("rtp-dump is starting with config: {:?}", config);
    match run(&cli_args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("failed to dump rtp packet: {}", err);
            ExitCode::FAILURE
        }
    }
}
