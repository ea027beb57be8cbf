// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Malformed or missing input data.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("line {line}: invalid {column} value {value:?}: {reason}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },
    #[error("unknown month label: {0:?}")]
    UnknownMonth(String),
}

/// An aggregation that is undefined over zero records.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot compute {what} over an empty record set")]
pub struct EmptyResultError {
    pub what: &'static str,
}

impl EmptyResultError {
    pub fn new(what: &'static str) -> Self {
        Self { what }
    }
}
