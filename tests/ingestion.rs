mod common;

use anyhow::Result;
use common::{LogDir, fixtures};
use lograph::datamodel::{Dimension, LographDateTimeExt};
use lograph::diagnostics::{CollectedDiagnostics, Diagnostic};
use lograph::exporters::{ExportFormat, export_to_file};
use lograph::importers::{load, load_from_file};
use lograph::parsing::default_parsers;
use lograph::store::SeriesStore;
use std::fs;

fn samples(store: &SeriesStore, labels: &[&str]) -> Vec<(i64, f64)> {
    store
        .get(&Dimension::new(labels.iter().copied()))
        .map(|s| {
            s.samples()
                .iter()
                .map(|sample| (sample.key.to_unix_seconds_i64(), sample.value))
                .collect()
        })
        .unwrap_or_default()
}

/// Test loading a directory with both log families end-to-end
#[test]
fn test_load_directory() -> Result<()> {
    // Given: A directory with a bandwidth log, a latency log and an unrelated file
    let dir = LogDir::new()?;
    dir.write("erftest_X.log", fixtures::erftest_log())?;
    dir.write("pingtest_hostA.log", fixtures::pingtest_log())?;
    dir.write("notes.txt", fixtures::unrelated_file())?;
    fs::create_dir(dir.path().join("archive"))?;

    // When: We load it
    let mut store = SeriesStore::new();
    let mut diagnostics = CollectedDiagnostics::new();
    let report = load(&mut store, &default_parsers(), dir.path(), &mut diagnostics)?;

    // Then: Both logs are parsed and the text file is skipped
    assert_eq!(report.parsed.len(), 2);
    assert_eq!(report.unrecognized, vec![dir.path().join("notes.txt")]);
    assert_eq!(report.series, 6);
    assert_eq!(store.len(), 6);
    assert_eq!(store.sources().len(), 2);
    assert!(store.has_source(&dir.path().join("erftest_X.log")));

    // And: Bandwidth samples are converted to bits per second
    assert_eq!(
        samples(&store, &["erftest", "X", "Bandwidth"]),
        vec![
            (1704067200, 942.0 * 1024.0 * 1024.0),
            (1704067260, 430.0 * 1024.0 * 1024.0),
            (1704067320, 1024.0 * 1024.0 * 1024.0),
        ]
    );

    // And: Loss is only recorded for the lossy block
    assert_eq!(
        samples(&store, &["pingtest", "hostA", "loss"]),
        vec![(1704067260, 20.0)]
    );
    assert_eq!(
        samples(&store, &["pingtest", "hostA", "avg"]),
        vec![(1704067200, 0.405), (1704067260, 2.0)]
    );

    // And: The sub-directory and the text file are reported, nothing is a warning
    assert!(diagnostics.diagnostics().contains(&Diagnostic::SkippedEntry {
        path: dir.path().join("archive"),
    }));
    assert!(diagnostics.diagnostics().contains(&Diagnostic::UnrecognizedFile {
        path: dir.path().join("notes.txt"),
    }));
    assert_eq!(diagnostics.warnings().count(), 0);

    Ok(())
}

/// Test merging files that cover the same dimension
#[test]
fn test_same_dimension_from_two_files() -> Result<()> {
    let dir = LogDir::new()?;
    let first = dir.write("erftest_X.log", fixtures::erftest_log())?;
    let later = dir.write("erftest_X_copy.log", fixtures::erftest_log_later())?;

    let mut store = SeriesStore::new();
    let mut diagnostics = CollectedDiagnostics::new();
    load_from_file(&mut store, &default_parsers(), &first, &mut diagnostics)?;
    load_from_file(&mut store, &default_parsers(), &later, &mut diagnostics)?;

    // Different file names give different dimensions
    assert_eq!(store.len(), 2);

    // Feeding a file twice accumulates duplicate samples, merge does not deduplicate
    load_from_file(&mut store, &default_parsers(), &first, &mut diagnostics)?;
    let keys: Vec<_> = samples(&store, &["erftest", "X", "Bandwidth"])
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(
        keys,
        vec![1704067200, 1704067200, 1704067260, 1704067260, 1704067320, 1704067320]
    );
    assert_eq!(store.sources().len(), 3);

    Ok(())
}

/// Test that a file from another directory merges in key order
#[test]
fn test_merge_keeps_key_order() -> Result<()> {
    let first_dir = LogDir::new()?;
    let second_dir = LogDir::new()?;
    first_dir.write("erftest_X.log", fixtures::erftest_log())?;
    second_dir.write("erftest_X.log", fixtures::erftest_log_later())?;

    let mut store = SeriesStore::new();
    let mut diagnostics = CollectedDiagnostics::new();
    load(&mut store, &default_parsers(), first_dir.path(), &mut diagnostics)?;
    load(&mut store, &default_parsers(), second_dir.path(), &mut diagnostics)?;

    assert_eq!(store.len(), 1);
    assert_eq!(
        samples(&store, &["erftest", "X", "Bandwidth"]),
        vec![
            (1704067200, 942.0 * 1024.0 * 1024.0),
            (1704067260, 430.0 * 1024.0 * 1024.0),
            (1704067290, 80.0 * 1024.0),
            (1704067320, 1024.0 * 1024.0 * 1024.0),
        ]
    );

    Ok(())
}

/// Test filtering and exporting one family, as the command line does
#[test]
fn test_filter_and_export() -> Result<()> {
    let dir = LogDir::new()?;
    dir.write("erftest_X.log", fixtures::erftest_log())?;
    dir.write("pingtest_hostA.log", fixtures::pingtest_log())?;

    let mut store = SeriesStore::new();
    let mut diagnostics = CollectedDiagnostics::new();
    load(&mut store, &default_parsers(), dir.path(), &mut diagnostics)?;

    // Push loss series behind the others
    store.filter(|s| s.dimension.contains("loss"));
    for series in store.iter_mut() {
        series.priority = -1;
    }

    store.filter(|s| s.dimension.contains("pingtest"));
    assert_eq!(store.iter().count(), 5);

    let out = LogDir::new()?;
    let path = out.path().join("pingtest.csv");
    let exporter = ExportFormat::Csv.exporter();
    let count = export_to_file(exporter.as_ref(), &store, &path)?;
    assert_eq!(count, 5);

    let csv = fs::read_to_string(&path)?;
    let rows: Vec<_> = csv.lines().skip(1).collect();
    // 1 loss sample and 2 samples for each of the 4 rtt series
    assert_eq!(rows.len(), 9);
    // The loss series comes last
    assert!(rows[8].starts_with("pingtest-hostA-loss,%,-1,false,"));
    assert!(!csv.contains("erftest"));

    // Filtering everything out leaves the store untouched
    store.filter(|_| false);
    assert_eq!(store.iter().count(), 0);
    store.clear_filter();
    assert_eq!(store.iter().count(), 6);

    Ok(())
}
