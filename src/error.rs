//! Error types for the reader and renderer.
//!
//! Loading code reports through `anyhow`; the variants here are the ones a
//! caller may want to match on.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a bicluster results file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// I/O errors while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `pvalue=` or `Lifts=` field that does not hold a number
    #[error("line {line}: invalid number `{value}` for `{key}`")]
    Number {
        line: usize,
        key: &'static str,
        value: String,
    },
}

/// Failures while rendering one bicluster.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The bicluster names a column the dataset does not have
    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    /// The bicluster record lists no columns
    #[error("bicluster has no columns")]
    EmptyBicluster,

    /// A cell could not be coerced to a number
    #[error("column `{column}`, row {row}: `{value}` is not numeric")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// Figure serialization failed
    #[error("serializing figure: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output file failed
    #[error("writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub fn number(line: usize, key: &'static str, value: impl Into<String>) -> Self {
        Self::Number {
            line,
            key,
            value: value.into(),
        }
    }
}

impl RenderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
