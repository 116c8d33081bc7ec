// Error type for the corpus → bigram table pipeline.
//
// Every variant that comes from a note table carries the file path and, where
// applicable, the 1-based line number, so a malformed corpus can be fixed
// without re-running under a debugger. There is no recovery path: the first
// error aborts the run and no output table is written.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: table has no header row")]
    MissingHeader { path: PathBuf },

    #[error("{path}: missing column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}:{line}: expected {expected} fields, found {found}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: missing value for '{column}'")]
    MissingValue {
        path: PathBuf,
        line: usize,
        column: String,
    },

    #[error("{path}:{line}: '{value}' in column '{column}' is not an integer")]
    InvalidInteger {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },

    #[error("{path}:{line}: {value} in column '{column}' is beyond +/-{limit}")]
    OutOfRange {
        path: PathBuf,
        line: usize,
        column: String,
        value: i64,
        limit: i64,
    },

    #[error("{path}:{line}: quoted field contains the delimiter (quoting is not supported)")]
    QuotedDelimiter { path: PathBuf, line: usize },

    #[error("no pieces found under {0}")]
    NoPieces(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot parse configuration {path}: {source}")]
    ConfigJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
