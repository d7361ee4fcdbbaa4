use std::{env, path::PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::{
    AppCli,
    cli::InputFormat,
    errors::AppResult,
    util::parse_log_level,
};

#[derive(Debug, Deserialize)]
pub(crate) struct Logger {
    pub(crate) level: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Dump {
    pub(crate) format: InputFormat,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppConfig {
    pub(crate) logger: Logger,
    pub(crate) dump: Dump,
}

impl AppConfig {
    /// Defaults, then the config file if any, then `RTP_DUMP_*` environment variables.
    pub(crate) fn new(config_path: Option<PathBuf>) -> AppResult<Self> {
        let config_path_composed =
            config_path.or_else(|| env::var("RTP_DUMP_CONFIG").ok().map(PathBuf::from));

        let mut builder = Config::builder()
            .set_default("logger.level", "info")?
            .set_default("dump.format", "raw")?;
        if let Some(path) = config_path_composed {
            builder = builder.add_source(File::from(path));
        }
        let result = builder
            .add_source(
                Environment::with_prefix("RTP_DUMP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        let config = result.try_deserialize()?;
        Ok(config)
    }

    pub(crate) fn apply(&mut self, cli_args: &AppCli) -> AppResult<()> {
        if let Some(level) = &cli_args.log_level {
            self.logger.level = level.clone();
        }

        if let Some(format) = cli_args.format {
            self.dump.format = format;
        }

        Ok(())
    }

    pub(crate) fn validate(&self) -> AppResult<()> {
        let _ = parse_log_level(&self.logger.level)?;
        Ok(())
    }
}
