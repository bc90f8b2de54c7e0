use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::datamodel::Series;

pub mod csv;
pub mod jsonl;

pub use csv::CsvExporter;
pub use jsonl::JsonlExporter;

/// The output side of lograph: given series, write them somewhere a chart
/// renderer can pick them up.
pub trait Exporter {
    fn extension(&self) -> &'static str;

    fn write_series(&self, series: &[&Series], out: &mut dyn Write) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Jsonl,
}

impl ExportFormat {
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Csv => Box::new(CsvExporter),
            ExportFormat::Jsonl => Box::new(JsonlExporter),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" | "ndjson" => Ok(ExportFormat::Jsonl),
            _ => bail!("Unsupported export format: {}", s),
        }
    }
}

/// Orders series for drawing: highest priority first, ties keep their order.
pub fn order_by_priority<'a, I>(series: I) -> Vec<&'a Series>
where
    I: IntoIterator<Item = &'a Series>,
{
    let mut ordered: Vec<&Series> = series.into_iter().collect();
    ordered.sort_by_key(|s| std::cmp::Reverse(s.priority));
    ordered
}

/// Writes the series to `path`, replacing any existing file.
pub fn export_to_file<'a, I>(exporter: &dyn Exporter, series: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a Series>,
{
    let ordered = order_by_priority(series);
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    exporter.write_series(&ordered, &mut out)?;
    out.flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(ordered.len())
}
