//! Error types for trajectory transforms and CSV handling.

use thiserror::Error;

/// Main error type for trajectory operations.
#[derive(Error, Debug)]
pub enum TrajectoryError {
    /// An expected marker column is absent from the input.
    #[error("Missing marker column: {column}")]
    Schema { column: String },

    /// A row or frame range could not be parsed.
    #[error("Malformed data at row {row}: {detail}")]
    DataFormat { row: usize, detail: String },

    /// Rejection sampling failed to converge within the retry budget.
    #[error(
        "Constrained scramble could not place marker {marker} on axis {axis} \
         within {retries} retries"
    )]
    ConstraintUnsatisfiable {
        marker: usize,
        axis: usize,
        retries: usize,
    },

    /// The pairwise mapping did not assign every marker exactly once.
    #[error("Pairwise permutation assigned {assigned} markers, expected 20")]
    Permutation { assigned: usize },

    /// File I/O failure in a pipeline operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV layer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for trajectory operations.
pub type Result<T> = std::result::Result<T, TrajectoryError>;

impl TrajectoryError {
    /// Create a missing-column error.
    #[must_use]
    pub fn schema(column: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
        }
    }

    /// Create a malformed-data error.
    #[must_use]
    pub fn data_format(row: usize, detail: impl Into<String>) -> Self {
        Self::DataFormat {
            row,
            detail: detail.into(),
        }
    }
}
