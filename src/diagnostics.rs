use std::fmt;
use std::path::PathBuf;
use tracing::{Level, event};

/// Something worth reporting that does not stop a parse or a load.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A timestamp line was followed by another one before any payload.
    /// The first timestamp is dropped.
    OrphanedTimestamp {
        path: PathBuf,
        line_number: usize,
        dropped: i64,
    },
    /// A bandwidth figure without a known multiplier, kept as is.
    UnrecognizedBandwidthUnit {
        path: PathBuf,
        line_number: usize,
        unit: Option<String>,
        figure: f64,
    },
    /// No parser accepts this file.
    UnrecognizedFile { path: PathBuf },
    /// A directory entry that is not a regular file.
    SkippedEntry { path: PathBuf },
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::OrphanedTimestamp { .. } | Diagnostic::UnrecognizedBandwidthUnit { .. } => {
                Level::WARN
            }
            Diagnostic::UnrecognizedFile { .. } => Level::INFO,
            Diagnostic::SkippedEntry { .. } => Level::DEBUG,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OrphanedTimestamp {
                path,
                line_number,
                dropped,
            } => write!(
                f,
                "{}:{}: no record for timestamp {}, it will be ignored",
                path.display(),
                line_number,
                dropped
            ),
            Diagnostic::UnrecognizedBandwidthUnit {
                path,
                line_number,
                unit,
                figure,
            } => write!(
                f,
                "{}:{}: invalid unit format '{}', using figure {} literally",
                path.display(),
                line_number,
                unit.as_deref().unwrap_or(""),
                figure
            ),
            Diagnostic::UnrecognizedFile { path } => {
                write!(f, "Unrecognized file: {}", path.display())
            }
            Diagnostic::SkippedEntry { path } => {
                write!(f, "Not a regular file, skipped: {}", path.display())
            }
        }
    }
}

/// Where parsers and importers send their diagnostics.
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to `tracing` at its level.
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        let level = diagnostic.level();
        if level == Level::WARN {
            event!(Level::WARN, "{}", diagnostic);
        } else if level == Level::INFO {
            event!(Level::INFO, "{}", diagnostic);
        } else {
            event!(Level::DEBUG, "{}", diagnostic);
        }
    }
}

/// Keeps diagnostics in memory, optionally forwarding them to `tracing` too.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    forward: bool,
    diagnostics: Vec<Diagnostic>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forwarding_to_tracing() -> Self {
        CollectedDiagnostics {
            forward: true,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level() == Level::WARN)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        if self.forward {
            TracingDiagnostics.report(diagnostic.clone());
        }
        self.diagnostics.push(diagnostic);
    }
}
