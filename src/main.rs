#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::Parser;
use lograph::config;
use lograph::diagnostics::CollectedDiagnostics;
use lograph::exporters::{ExportFormat, export_to_file};
use lograph::importers::load;
use lograph::parsing::get_parsers_from_list;
use lograph::parsing::latency::LOSS_METRIC;
use lograph::store::SeriesStore;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{Level, event};

/// Builds time series from bandwidth and latency test logs and exports one
/// file per log family.
#[derive(Debug, Parser)]
#[command(name = "lograph", version, about)]
struct Cli {
    /// Log file or directory of log files [env: LOGRAPH_SOURCE_PATH]
    source: Option<PathBuf>,

    /// Directory receiving the exported files [env: LOGRAPH_OUTPUT_DIR]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// csv or jsonl [env: LOGRAPH_EXPORT_FORMAT]
    #[arg(short, long)]
    format: Option<String>,

    /// Comma separated parser names, tried in order [env: LOGRAPH_PARSERS]
    #[arg(short, long)]
    parsers: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    config::load_configuration().context("Failed to load configuration")?;
    let config = config::get().context("Failed to get configuration")?;

    let source_path = cli.source.unwrap_or_else(|| config.source_path.clone());
    let output_dir = cli.output_dir.unwrap_or_else(|| config.output_dir.clone());
    let format = match cli.format.as_deref() {
        Some(format) => ExportFormat::from_str(format)?,
        None => config.parse_export_format()?,
    };
    let parsers = match cli.parsers.as_deref() {
        Some(list) => get_parsers_from_list(list).context("Invalid parser list")?,
        None => config.parse_parsers()?,
    };

    let mut store = SeriesStore::new();
    let mut diagnostics = CollectedDiagnostics::forwarding_to_tracing();
    let report = load(&mut store, &parsers, &source_path, &mut diagnostics)
        .with_context(|| format!("Failed to load {}", source_path.display()))?;

    event!(
        Level::INFO,
        "Loaded {} files ({} unrecognized) into {} series",
        report.parsed.len(),
        report.unrecognized.len(),
        store.len()
    );

    store.filter(|s| s.dimension.contains(LOSS_METRIC));
    let loss_priority = config.loss_priority();
    for series in store.iter_mut() {
        series.priority = loss_priority;
    }

    let exporter = format.exporter();
    for parser in &parsers {
        let family = parser.family();
        store.filter(move |s| s.dimension.contains(family));

        let path = output_dir.join(format!("{}.{}", family, exporter.extension()));
        let count = export_to_file(exporter.as_ref(), &store, &path)?;
        println!("✅ {} series written to {}", count, path.display());
    }
    store.clear_filter();

    let warnings = diagnostics.warnings().count();
    if warnings > 0 {
        event!(Level::WARN, "{} records could not be used as is", warnings);
    }

    Ok(())
}
