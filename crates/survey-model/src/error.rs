//! Error types for label and question lookups.

use thiserror::Error;

/// Errors raised by label and question metadata operations.
///
/// These are programmer or data errors: every variant names the offending
/// column or question so the caller can report it directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Column name is not present in the table or label store.
    #[error("unknown column: {name}")]
    UnknownColumn { name: String },

    /// Name is not a question stem over the current columns.
    #[error("unknown question: {name}")]
    UnknownQuestion { name: String },

    /// Selector element resolves neither to a column nor to a question.
    #[error("unknown selector: {name} is neither a column nor a question")]
    UnknownSelector { name: String },

    /// A new column would be introduced without label data.
    #[error("missing label for column: {column}")]
    MissingLabel { column: String },

    /// Column name already in use.
    #[error("duplicate column name: {name}")]
    DuplicateColumn { name: String },

    /// Label vector length does not match the number of columns.
    #[error("label count mismatch: expected {expected}, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },
}

impl ModelError {
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }

    pub fn unknown_question(name: impl Into<String>) -> Self {
        Self::UnknownQuestion { name: name.into() }
    }

    pub fn unknown_selector(name: impl Into<String>) -> Self {
        Self::UnknownSelector { name: name.into() }
    }

    pub fn missing_label(column: impl Into<String>) -> Self {
        Self::MissingLabel {
            column: column.into(),
        }
    }

    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
