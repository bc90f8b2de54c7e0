use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the parsing and aggregation layers
#[derive(Error, Debug)]
pub enum LographError {
    /// The parser does not handle this log family. Recoverable: the importer
    /// moves on to the next parser.
    #[error("Unsupported format: {parser} parser cannot handle {path}")]
    UnsupportedFormat { parser: String, path: PathBuf },

    /// Two series with different dimension or unit were merged.
    #[error("Aggregation key mismatch: expected {expected}, found {found}")]
    AggregationKeyMismatch { expected: String, found: String },

    /// The log file could not be opened or read
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LographError {
    pub fn unsupported_format(parser: &str, path: impl Into<PathBuf>) -> Self {
        LographError::UnsupportedFormat {
            parser: parser.to_string(),
            path: path.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LographError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, LographError::UnsupportedFormat { .. })
    }
}

pub type Result<T, E = LographError> = std::result::Result<T, E>;
