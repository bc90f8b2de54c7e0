use anyhow::{Result as AnyResult, bail};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::datamodel::{Dimension, Series};
use crate::diagnostics::Diagnostics;
use crate::error::{LographError, Result};

pub mod bandwidth;
pub mod filename;
pub mod latency;
pub mod scanner;

pub use bandwidth::BandwidthParser;
pub use latency::LatencyParser;

/// A parser for one family of test-tool logs.
///
/// `can_parse` is a pure check on the file name. `parse_file` fails with
/// [`LographError::UnsupportedFormat`] when it does not hold.
pub trait LogParser {
    /// File name prefix of the log family, also the parser name.
    fn family(&self) -> &'static str;

    fn can_parse(&self, path: &Path) -> bool {
        filename::matches_family(path, self.family())
    }

    /// Scans already opened log text. `dimension` is the prefix derived from
    /// the file name.
    fn parse_lines(
        &self,
        path: &Path,
        dimension: &Dimension,
        reader: &mut dyn BufRead,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<Vec<Series>>;

    fn parse_file(&self, path: &Path, diagnostics: &mut dyn Diagnostics) -> Result<Vec<Series>> {
        if !self.can_parse(path) {
            return Err(LographError::unsupported_format(self.family(), path));
        }
        let dimension = filename::dimension_prefix(path)
            .ok_or_else(|| LographError::unsupported_format(self.family(), path))?;

        // The file is closed when the reader is dropped, on every return path
        let file = File::open(path).map_err(|e| LographError::io(path, e))?;
        let mut reader = BufReader::new(file);
        self.parse_lines(path, &dimension, &mut reader, diagnostics)
    }
}

pub fn get_parser_from_name(name: &str) -> AnyResult<Box<dyn LogParser>> {
    match name.trim() {
        "erftest" | "bandwidth" => Ok(Box::new(BandwidthParser)),
        "pingtest" | "latency" => Ok(Box::new(LatencyParser)),
        _ => bail!("Unsupported parser: {}", name),
    }
}

/// Resolves a comma separated list of parser names, keeping its order.
pub fn get_parsers_from_list(list: &str) -> AnyResult<Vec<Box<dyn LogParser>>> {
    let parsers = list
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(get_parser_from_name)
        .collect::<AnyResult<Vec<_>>>()?;
    if parsers.is_empty() {
        bail!("At least one parser is required");
    }
    Ok(parsers)
}

/// Every known parser, bandwidth first.
pub fn default_parsers() -> Vec<Box<dyn LogParser>> {
    vec![Box::new(BandwidthParser), Box::new(LatencyParser)]
}
