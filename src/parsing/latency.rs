use once_cell::sync::Lazy;
use regex::Regex;
use std::io::BufRead;
use std::path::Path;
use tracing::{Level, event};

use super::LogParser;
use super::scanner::{LossyLines, ScanState, parse_timestamp_line};
use crate::datamodel::{Dimension, LographDateTime, LographDateTimeExt, Series, Unit};
use crate::diagnostics::Diagnostics;
use crate::error::{LographError, Result};

/// `5 packets transmitted, 4 received, 20% packet loss, time 4005ms`
///
/// Also accepts the `+N errors` segment and the BSD form without time.
static PACKETS_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?P<sent>\d+)\s*packets transmitted,\s*(?P<received>\d+)\s*(?:packets\s+)?received,(?:\s*\+(?P<errors>\d+)\s*errors,)?\s*(?P<loss_percent>\d+(?:\.\d+)?)%\s*packet loss(?:,\s*time\s*(?P<time>\d+)ms)?",
    )
    .expect("Failed to compile packets line regex")
});

/// `rtt min/avg/max/mdev = 0.042/0.051/0.063/0.008 ms`
static RTT_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:rtt|round-trip)\s+min/avg/max/(?:mdev|stddev)\s*=\s*(?P<min>\d+\.\d+)/(?P<avg>\d+\.\d+)/(?P<max>\d+\.\d+)/(?P<mdev>\d+\.\d+)\s*ms",
    )
    .expect("Failed to compile rtt line regex")
});

pub const LOSS_METRIC: &str = "loss";
pub const MIN_METRIC: &str = "min";
pub const AVG_METRIC: &str = "avg";
pub const MAX_METRIC: &str = "max";
pub const MDEV_METRIC: &str = "mdev";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacketSummary {
    pub transmitted: u64,
    pub received: u64,
    pub loss_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RttSummary {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub mdev: f64,
}

pub fn parse_packets_line(line: &str) -> Option<PacketSummary> {
    let caps = PACKETS_LINE_REGEX.captures(line)?;
    Some(PacketSummary {
        transmitted: caps["sent"].parse().ok()?,
        received: caps["received"].parse().ok()?,
        loss_percent: caps["loss_percent"].parse().ok()?,
    })
}

pub fn parse_rtt_line(line: &str) -> Option<RttSummary> {
    let caps = RTT_LINE_REGEX.captures(line)?;
    Some(RttSummary {
        min: caps["min"].parse().ok()?,
        avg: caps["avg"].parse().ok()?,
        max: caps["max"].parse().ok()?,
        mdev: caps["mdev"].parse().ok()?,
    })
}

/// Line-by-line state machine for one latency log.
///
/// Within a block the packet summary only feeds the loss series, and only
/// when loss is above zero. The RTT summary closes the block. Timestamp
/// lines are ignored while a block is open.
pub struct LatencyScanner<'a> {
    path: &'a Path,
    state: ScanState,
    loss: Series,
    min: Series,
    avg: Series,
    max: Series,
    mdev: Series,
}

impl<'a> LatencyScanner<'a> {
    pub fn new(path: &'a Path, dimension: &Dimension) -> Self {
        LatencyScanner {
            path,
            state: ScanState::AwaitingTimestamp,
            loss: Series::discrete(dimension.with(LOSS_METRIC), Unit::percent()),
            min: Series::new(dimension.with(MIN_METRIC), Unit::milliseconds()),
            avg: Series::new(dimension.with(AVG_METRIC), Unit::milliseconds()),
            max: Series::new(dimension.with(MAX_METRIC), Unit::milliseconds()),
            mdev: Series::new(dimension.with(MDEV_METRIC), Unit::milliseconds()),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn feed(&mut self, line: &str) {
        self.state = match self.state {
            ScanState::AwaitingTimestamp => match parse_timestamp_line(line) {
                Some(pending) => ScanState::AwaitingPayload { pending },
                None => ScanState::AwaitingTimestamp,
            },
            ScanState::AwaitingPayload { pending } => {
                let index = LographDateTime::from_unix_seconds_i64(pending);
                if let Some(packets) = parse_packets_line(line) {
                    if packets.loss_percent > 0.0 {
                        self.loss.append(index, packets.loss_percent);
                    }
                    self.state
                } else if let Some(rtt) = parse_rtt_line(line) {
                    self.min.append(index, rtt.min);
                    self.avg.append(index, rtt.avg);
                    self.max.append(index, rtt.max);
                    self.mdev.append(index, rtt.mdev);
                    ScanState::AwaitingTimestamp
                } else {
                    self.state
                }
            }
        };
    }

    /// Ends the scan and returns `loss`, `min`, `avg`, `max`, `mdev` in that
    /// order. A block still open is dropped.
    pub fn finish(self) -> Vec<Series> {
        if let Some(pending) = self.state.pending() {
            event!(
                Level::DEBUG,
                "{}: end of file, block at {} has no rtt summary",
                self.path.display(),
                pending
            );
        }
        vec![self.loss, self.min, self.avg, self.max, self.mdev]
    }
}

/// Parser for `pingtest*` latency logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LatencyParser;

impl LogParser for LatencyParser {
    fn family(&self) -> &'static str {
        "pingtest"
    }

    fn parse_lines(
        &self,
        path: &Path,
        dimension: &Dimension,
        reader: &mut dyn BufRead,
        _diagnostics: &mut dyn Diagnostics,
    ) -> Result<Vec<Series>> {
        let mut scanner = LatencyScanner::new(path, dimension);
        for line in LossyLines::new(reader) {
            let (_, line) = line.map_err(|e| LographError::io(path, e))?;
            scanner.feed(&line);
        }
        Ok(scanner.finish())
    }
}
