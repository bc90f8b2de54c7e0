use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, event};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{LographError, Result};
use crate::parsing::LogParser;
use crate::store::SeriesStore;

/// What happened to the files of one `load` call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    /// Files accepted by a parser, with the parser family
    pub parsed: Vec<(PathBuf, &'static str)>,
    pub unrecognized: Vec<PathBuf>,
    /// Number of series merged into the store
    pub series: usize,
}

impl LoadReport {
    fn absorb(&mut self, other: LoadReport) {
        self.parsed.extend(other.parsed);
        self.unrecognized.extend(other.unrecognized);
        self.series += other.series;
    }
}

/// Loads a file, or every regular file directly inside a directory, into the
/// store. Anything else is ignored.
///
/// Directory entries are visited in file name order. Sub-directories are not
/// descended into.
pub fn load(
    store: &mut SeriesStore,
    parsers: &[Box<dyn LogParser>],
    source_path: &Path,
    diagnostics: &mut dyn Diagnostics,
) -> Result<LoadReport> {
    let mut report = LoadReport::default();

    if source_path.is_dir() {
        let mut entries = fs::read_dir(source_path)
            .map_err(|e| LographError::io(source_path, e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| LographError::io(source_path, e))?;
        entries.sort();

        for path in entries {
            if path.is_file() {
                report.absorb(load_from_file(store, parsers, &path, diagnostics)?);
            } else {
                diagnostics.report(Diagnostic::SkippedEntry { path });
            }
        }
    } else if source_path.is_file() {
        report.absorb(load_from_file(store, parsers, source_path, diagnostics)?);
    } else {
        event!(
            Level::WARN,
            "Source path is neither a file nor a directory: {}",
            source_path.display()
        );
    }

    Ok(report)
}

/// Gives the file to the first parser that can handle it and merges what it
/// yields. A file no parser accepts is reported and skipped.
pub fn load_from_file(
    store: &mut SeriesStore,
    parsers: &[Box<dyn LogParser>],
    filepath: &Path,
    diagnostics: &mut dyn Diagnostics,
) -> Result<LoadReport> {
    let mut report = LoadReport::default();

    for parser in parsers.iter().filter(|p| p.can_parse(filepath)) {
        let series_list = match parser.parse_file(filepath, diagnostics) {
            Ok(series_list) => series_list,
            // The name matched the family but yields no dimension
            Err(err) if err.is_unsupported_format() => continue,
            Err(err) => return Err(err),
        };

        event!(
            Level::DEBUG,
            "{} parsed {} ({} series)",
            parser.family(),
            filepath.display(),
            series_list.len()
        );

        store.add_source(filepath);
        report.parsed.push((filepath.to_path_buf(), parser.family()));
        for series in series_list {
            store.merge(series)?;
            report.series += 1;
        }
        return Ok(report);
    }

    diagnostics.report(Diagnostic::UnrecognizedFile {
        path: filepath.to_path_buf(),
    });
    report.unrecognized.push(filepath.to_path_buf());
    Ok(report)
}
