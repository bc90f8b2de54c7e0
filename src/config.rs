use anyhow::{Context, Error};
use confique::Config;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use crate::exporters::ExportFormat;
use crate::parsing::{LogParser, get_parsers_from_list};

#[derive(Debug, Config)]
pub struct LographConfig {
    /// Log file, or directory of log files, to load
    #[config(env = "LOGRAPH_SOURCE_PATH", default = "./log/")]
    pub source_path: PathBuf,

    #[config(env = "LOGRAPH_OUTPUT_DIR", default = ".")]
    pub output_dir: PathBuf,

    #[config(env = "LOGRAPH_EXPORT_FORMAT", default = "csv")]
    pub export_format: String,

    /// Comma separated parser names, tried in this order
    #[config(env = "LOGRAPH_PARSERS", default = "erftest,pingtest")]
    pub parsers: String,

    /// Priority given to packet loss series, so they are drawn behind.
    /// Defaults to [`DEFAULT_LOSS_PRIORITY`].
    #[config(env = "LOGRAPH_LOSS_PRIORITY")]
    pub loss_priority: Option<i32>,
}

pub const DEFAULT_LOSS_PRIORITY: i32 = -1;

impl LographConfig {
    pub fn load() -> Result<LographConfig, Error> {
        let c = LographConfig::builder()
            .env()
            .file("settings.toml")
            .load()?;

        Ok(c)
    }

    pub fn loss_priority(&self) -> i32 {
        self.loss_priority.unwrap_or(DEFAULT_LOSS_PRIORITY)
    }

    pub fn parse_export_format(&self) -> Result<ExportFormat, Error> {
        ExportFormat::from_str(&self.export_format)
    }

    pub fn parse_parsers(&self) -> Result<Vec<Box<dyn LogParser>>, Error> {
        get_parsers_from_list(&self.parsers).context("Invalid parser list")
    }
}

static LOGRAPH_CONFIG: OnceLock<Arc<LographConfig>> = OnceLock::new();

pub fn get() -> Result<Arc<LographConfig>, Error> {
    LOGRAPH_CONFIG.get().cloned().ok_or_else(|| {
        Error::msg(
            "Configuration not loaded. Please call load_configuration() before using the configuration",
        )
    })
}

pub fn load_configuration() -> Result<(), Error> {
    // Check if the configuration has already been loaded
    if LOGRAPH_CONFIG.get().is_some() {
        return Ok(());
    }

    let config = LographConfig::load()?;
    LOGRAPH_CONFIG.get_or_init(|| Arc::new(config));

    Ok(())
}
