//! Error taxonomy for loading the restaurant dataset.
//!
//! [`LoadError`] covers failures that prevent any record set from being built.
//! [`RowIssue`] and [`Coercion`] are non-fatal: the affected row is dropped or
//! the affected field is left absent, and the event is counted in the
//! [`LoadReport`](crate::loader::LoadReport).

use std::{fmt, io, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read dataset {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode dataset with encoding {encoding}")]
    Decode { encoding: String },

    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("Dataset has no header row")]
    EmptyDataset,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Why a data row was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RowIssue {
    TooFewFields,
    EmptyKey,
    InvalidId(String),
    MissingTitle,
    DuplicateId(i64),
}

impl RowIssue {
    pub fn label(&self) -> &'static str {
        match self {
            RowIssue::TooFewFields => "too_few_fields",
            RowIssue::EmptyKey => "empty_key",
            RowIssue::InvalidId(_) => "invalid_id",
            RowIssue::MissingTitle => "missing_title",
            RowIssue::DuplicateId(_) => "duplicate_id",
        }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIssue::TooFewFields => write!(f, "row has fewer than 2 fields"),
            RowIssue::EmptyKey => write!(f, "row has an empty first field"),
            RowIssue::InvalidId(raw) => write!(f, "id '{raw}' is not an integer"),
            RowIssue::MissingTitle => write!(f, "title is empty"),
            RowIssue::DuplicateId(id) => write!(f, "id {id} already seen"),
        }
    }
}

/// A field value that could not be interpreted and was coerced to absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coercion {
    pub record_id: i64,
    pub column: &'static str,
    pub raw: String,
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} column '{}': '{}' has no usable digits",
            self.record_id, self.column, self.raw
        )
    }
}
