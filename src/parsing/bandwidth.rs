use once_cell::sync::Lazy;
use regex::Regex;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;
use tracing::{Level, event};

use super::LogParser;
use super::scanner::{LossyLines, ScanState, parse_timestamp_line};
use crate::datamodel::{Dimension, LographDateTime, LographDateTimeExt, Series, Unit};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{LographError, Result};

/// `[  3]  0.0-10.0 sec  1.10 GBytes   942 Mbits/sec`
static BANDWIDTH_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\[\s*(?P<id>\d+)\]\s*(?P<start>\d+\.\d+)-\s*(?P<finish>\d+\.\d+)\s*sec\s+(?P<sent>\d+(?:\.\d+)?)\s*(?P<sent_unit>[A-Z]?Bytes)\s+(?P<bps>\d+(?:\.\d+)?)(?:\s*(?P<bps_unit>[A-Za-z]*bits/sec))?",
    )
    .expect("Failed to compile bandwidth line regex")
});

pub const BANDWIDTH_METRIC: &str = "Bandwidth";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandwidthUnit {
    Kilobits,
    Megabits,
    Gigabits,
}

impl BandwidthUnit {
    /// Binary multipliers, as the test tool reports them.
    pub fn multiplier(self) -> f64 {
        match self {
            BandwidthUnit::Kilobits => 1024.0,
            BandwidthUnit::Megabits => 1024.0 * 1024.0,
            BandwidthUnit::Gigabits => 1024.0 * 1024.0 * 1024.0,
        }
    }
}

impl FromStr for BandwidthUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Kbits/sec" => Ok(BandwidthUnit::Kilobits),
            "Mbits/sec" => Ok(BandwidthUnit::Megabits),
            "Gbits/sec" => Ok(BandwidthUnit::Gigabits),
            _ => Err(()),
        }
    }
}

/// The interesting part of a bandwidth report line.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthReport {
    pub figure: f64,
    pub unit: Option<String>,
}

impl BandwidthReport {
    /// Bits per second, or `None` when the unit has no known multiplier.
    pub fn bits_per_second(&self) -> Option<f64> {
        let unit = self.unit.as_deref()?;
        let unit = BandwidthUnit::from_str(unit).ok()?;
        Some(self.figure * unit.multiplier())
    }
}

pub fn parse_bandwidth_line(line: &str) -> Option<BandwidthReport> {
    let caps = BANDWIDTH_LINE_REGEX.captures(line)?;
    let figure = caps["bps"].parse().ok()?;
    Some(BandwidthReport {
        figure,
        unit: caps.name("bps_unit").map(|m| m.as_str().to_string()),
    })
}

/// Line-by-line state machine for one bandwidth log.
///
/// A timestamp line makes its epoch pending, the next report line produces
/// one sample at that epoch. A second timestamp line before any report
/// replaces the pending one with a warning.
pub struct BandwidthScanner<'a> {
    path: &'a Path,
    state: ScanState,
    series: Series,
}

impl<'a> BandwidthScanner<'a> {
    pub fn new(path: &'a Path, dimension: &Dimension) -> Self {
        BandwidthScanner {
            path,
            state: ScanState::AwaitingTimestamp,
            series: Series::new(dimension.with(BANDWIDTH_METRIC), Unit::bits_per_second()),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn feed(&mut self, line_number: usize, line: &str, diagnostics: &mut dyn Diagnostics) {
        self.state = match self.state {
            ScanState::AwaitingTimestamp => match parse_timestamp_line(line) {
                Some(pending) => ScanState::AwaitingPayload { pending },
                None => ScanState::AwaitingTimestamp,
            },
            ScanState::AwaitingPayload { pending } => {
                if let Some(report) = parse_bandwidth_line(line) {
                    let bps = match report.bits_per_second() {
                        Some(bps) => bps,
                        None => {
                            diagnostics.report(Diagnostic::UnrecognizedBandwidthUnit {
                                path: self.path.to_path_buf(),
                                line_number,
                                unit: report.unit.clone(),
                                figure: report.figure,
                            });
                            report.figure
                        }
                    };
                    self.series.append(LographDateTime::from_unix_seconds_i64(pending), bps);
                    ScanState::AwaitingTimestamp
                } else if let Some(next) = parse_timestamp_line(line) {
                    diagnostics.report(Diagnostic::OrphanedTimestamp {
                        path: self.path.to_path_buf(),
                        line_number,
                        dropped: pending,
                    });
                    ScanState::AwaitingPayload { pending: next }
                } else {
                    self.state
                }
            }
        };
    }

    /// Ends the scan. A timestamp still pending is dropped.
    pub fn finish(self) -> Series {
        if let Some(pending) = self.state.pending() {
            event!(
                Level::DEBUG,
                "{}: end of file, timestamp {} has no record",
                self.path.display(),
                pending
            );
        }
        self.series
    }
}

/// Parser for `erftest*` bandwidth logs. Yields a single `bps` series.
#[derive(Debug, Default, Clone, Copy)]
pub struct BandwidthParser;

impl LogParser for BandwidthParser {
    fn family(&self) -> &'static str {
        "erftest"
    }

    fn parse_lines(
        &self,
        path: &Path,
        dimension: &Dimension,
        reader: &mut dyn BufRead,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<Vec<Series>> {
        let mut scanner = BandwidthScanner::new(path, dimension);
        for line in LossyLines::new(reader) {
            let (line_number, line) = line.map_err(|e| LographError::io(path, e))?;
            scanner.feed(line_number, &line, diagnostics);
        }
        Ok(vec![scanner.finish()])
    }
}
