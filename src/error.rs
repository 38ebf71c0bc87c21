use std::path::PathBuf;

use thiserror::Error;

/// Error raised by the matrix pipeline.
///
/// While computing, the only failure is calling a step before the step it
/// depends on. Empty documents, unknown query terms and zero norms are ordinary inputs
/// and never produce an error. The other variants reject deserialized
/// matrices whose shapes do not agree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("cannot compute {step}: {requires} has not been computed yet")]
    NotReady {
        step: &'static str,
        requires: &'static str,
    },

    #[error("a {rows}x{cols} matrix cannot hold {found} cells")]
    CellCount {
        rows: usize,
        cols: usize,
        found: usize,
    },

    #[error("{part} is {found:?} (terms, documents), expected {expected:?}")]
    Shape {
        part: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("{part} has {found} entries, expected {expected}")]
    Length {
        part: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("vocabulary does not match the corpus terms")]
    VocabularyMismatch,
}

/// Errors of the workbook export / import layer
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("workbook io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cbor encoding error: {0}")]
    Cbor(#[from] serde_cbor::Error),

    #[error("json encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("column gutter must be at least 1, got {0}")]
    InvalidGutter(usize),

    #[error("malformed sheet at row {row}, column {col}: {reason}")]
    Layout {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("sheet `{0}` not found in workbook")]
    MissingSheet(String),
}

/// Errors while loading a run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
