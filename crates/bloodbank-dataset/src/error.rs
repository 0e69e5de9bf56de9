use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a dataset load. Per-row problems never surface here;
/// those rows are skipped and counted in [`crate::LoadReport`].
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read dataset at {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("failed to read dataset header row: {0}")]
    Header(#[source] csv::Error),
}

impl DatasetError {
    /// True when the source itself could not be read, as opposed to a file
    /// that was read but has the wrong shape.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Unreadable { .. })
    }
}

/// Why a single row was dropped.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum RowError {
    #[error("column '{0}' is missing from this row")]
    MissingCell(&'static str),

    #[error("column '{0}' is empty")]
    EmptyCell(&'static str),

    #[error("column '{column}' value '{value}' is not a valid coordinate")]
    InvalidCoordinate { column: &'static str, value: String },

    #[error("malformed row: {0}")]
    Malformed(String),
}
