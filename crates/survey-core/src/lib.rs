//! Question-aware survey container.
//!
//! - **container**: table plus labels plus grouping rule, extraction, label access
//! - **selector**: row and column selectors
//! - **assign**: assignment, column removal, column-binding
//! - **merge**: relational join and row-binding with label reconciliation
//! - **verbs**: select/filter/arrange/rename/aggregate preserving labels

pub mod assign;
pub mod container;
pub mod error;
pub mod merge;
pub mod selector;
pub mod verbs;

pub use assign::AssignValue;
pub use container::{LabelLookup, SurveyContainer};
pub use error::{Result, SurveyError};
pub use merge::{JoinHow, MergeOptions, MergeResult, merge};
pub use selector::{ColumnSelector, RowSelector};
pub use verbs::Aggregation;

pub use survey_model::{
    LabelConflict, LabelStore, ModelError, QuestionGroup, QuestionIndex, QuestionText,
    SurveyOptions,
};
