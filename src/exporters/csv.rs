use anyhow::Result;
use std::io::Write;

use super::Exporter;
use crate::datamodel::Series;

/// Quotes a field when it contains a separator, a quote or a line break.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One row per sample, series after series.
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write_series(&self, series: &[&Series], out: &mut dyn Write) -> Result<()> {
        writeln!(out, "dimension,unit,priority,continuous,timestamp,value")?;
        for s in series {
            let dimension = escape(&s.dimension.to_string());
            let unit = escape(&s.unit.name);
            for sample in s.samples() {
                writeln!(
                    out,
                    "{},{},{},{},{},{}",
                    dimension,
                    unit,
                    s.priority,
                    s.is_continuous(),
                    sample.key.to_rfc3339(),
                    sample.value
                )?;
            }
        }
        Ok(())
    }
}
