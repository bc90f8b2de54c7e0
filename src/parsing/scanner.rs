use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, BufRead};

/// `[1704067200] Mon Jan 01 00:00:00 UTC 2024`
static TIMESTAMP_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\[(?P<timestamp>\d+)\]\s+(?P<dow>[A-Za-z]{3})\s+(?P<month>[A-Za-z]{3})\s+(?P<date>\d+)\s+(?P<time>\d\d:\d\d:\d\d)\s+(?P<timezone>[A-Z]{3})\s+(?P<year>\d+)$",
    )
    .expect("Failed to compile timestamp line regex")
});

/// State of a line scanner. A timestamp line opens a block, payload lines
/// attach samples to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    AwaitingTimestamp,
    AwaitingPayload {
        /// Unix seconds of the block being filled
        pending: i64,
    },
}

impl ScanState {
    pub fn pending(&self) -> Option<i64> {
        match self {
            ScanState::AwaitingTimestamp => None,
            ScanState::AwaitingPayload { pending } => Some(*pending),
        }
    }
}

/// Last second of year 9999. Later epochs would saturate the time index.
pub const MAX_TIMESTAMP_SECONDS: i64 = 253_402_300_799;

/// Returns the epoch seconds of a timestamp line, `None` for any other line.
/// An epoch past [`MAX_TIMESTAMP_SECONDS`] makes the line noise.
pub fn parse_timestamp_line(line: &str) -> Option<i64> {
    TIMESTAMP_LINE_REGEX
        .captures(line)
        .and_then(|caps| caps["timestamp"].parse().ok())
        .filter(|seconds| *seconds <= MAX_TIMESTAMP_SECONDS)
}

/// Reads lines as bytes and decodes them lossily, so that binary noise in a
/// log does not abort the parse. Line endings (`\n`, `\r\n`) are removed.
pub struct LossyLines<'a> {
    reader: &'a mut dyn BufRead,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<'a> LossyLines<'a> {
    pub fn new(reader: &'a mut dyn BufRead) -> Self {
        LossyLines {
            reader,
            buffer: Vec::with_capacity(256),
            line_number: 0,
        }
    }
}

impl Iterator for LossyLines<'_> {
    /// One-based line number and line text
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
                    self.buffer.pop();
                }
                let line = String::from_utf8_lossy(&self.buffer).into_owned();
                Some(Ok((self.line_number, line)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
