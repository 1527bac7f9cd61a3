//! Error type for container operations.

use polars::prelude::PolarsError;
use thiserror::Error;

use survey_model::{LabelConflict, ModelError};

/// Errors raised by survey container operations.
///
/// Every failing operation leaves the container exactly as it was.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Label or question lookup failure.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Failure inside the underlying table engine.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// Assigned value has a different number of rows than the table.
    #[error("height mismatch: table has {expected} rows, value has {actual}")]
    HeightMismatch { expected: usize, actual: usize },

    /// Assigned value has a different number of columns than the targets.
    #[error("width mismatch: {expected} target columns, value has {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    /// Row index past the end of the table.
    #[error("row index {index} out of bounds for {height} rows")]
    RowOutOfBounds { index: usize, height: usize },

    /// Row mask length differs from table height.
    #[error("row mask has {actual} entries, table has {expected} rows")]
    MaskLengthMismatch { expected: usize, actual: usize },

    /// Row-binding tables with different column sets.
    #[error("column sets differ: missing {missing:?}, unexpected {extra:?}")]
    ColumnSetMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    /// Merge without any key columns.
    #[error("merge needs at least one join key")]
    NoJoinKeys,

    /// Strict merge or stack rejected because labels disagreed.
    #[error("{} label conflict(s)", .0.len())]
    LabelConflicts(Vec<LabelConflict>),
}

impl SurveyError {
    /// Inner label/question error, if this is one.
    pub fn model(&self) -> Option<&ModelError> {
        match self {
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
