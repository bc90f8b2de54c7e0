use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use super::Exporter;
use crate::datamodel::{LographDateTimeExt, Series};

#[derive(Serialize)]
struct JsonlRow<'a> {
    dimension: &'a [String],
    unit: &'a str,
    priority: i32,
    continuous: bool,
    timestamp: String,
    unix_seconds: i64,
    value: f64,
}

/// JSON Lines, one object per sample.
pub struct JsonlExporter;

impl Exporter for JsonlExporter {
    fn extension(&self) -> &'static str {
        "jsonl"
    }

    fn write_series(&self, series: &[&Series], out: &mut dyn Write) -> Result<()> {
        for s in series {
            for sample in s.samples() {
                let row = JsonlRow {
                    dimension: s.dimension.labels(),
                    unit: &s.unit.name,
                    priority: s.priority,
                    continuous: s.is_continuous(),
                    timestamp: sample.key.to_rfc3339(),
                    unix_seconds: sample.key.to_unix_seconds_i64(),
                    value: sample.value,
                };
                serde_json::to_writer(&mut *out, &row)?;
                out.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
