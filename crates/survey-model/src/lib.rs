//! Metadata model for labelled survey data.
//!
//! - **labels**: ordered column-to-label store
//! - **pattern**: stem/sub-index classification of column names
//! - **questions**: question index derived from the column list
//! - **text**: common/unique decomposition of question labels
//! - **conflict**: non-fatal label disagreements
//! - **options**: per-container configuration

pub mod conflict;
pub mod error;
pub mod labels;
pub mod options;
pub mod pattern;
pub mod questions;
pub mod text;

pub use conflict::LabelConflict;
pub use error::{ModelError, Result};
pub use labels::{LabelEntry, LabelStore};
pub use options::{DEFAULT_MERGE_SUFFIX, SurveyOptions};
pub use pattern::{ColumnPattern, DEFAULT_SEPARATOR, PatternMatcher};
pub use questions::{QuestionGroup, QuestionIndex};
pub use text::{QuestionText, common_text, split_common_unique, unique_text};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_deserialize_with_defaults() {
        let options: SurveyOptions =
            serde_json::from_str(r#"{"separator": "."}"#).expect("deserialize options");
        assert_eq!(options.separator, ".");
        assert_eq!(options.merge_suffix, DEFAULT_MERGE_SUFFIX);
        assert!(!options.trim_common_suffix);
    }

    #[test]
    fn conflict_only_when_labels_differ() {
        assert!(LabelConflict::between("weight", "Weight", "Weight").is_none());
        let conflict = LabelConflict::between("weight", "Weight (kg)", "Weight").expect("conflict");
        assert_eq!(conflict.kept, "Weight (kg)");
        assert_eq!(
            conflict.to_string(),
            r#"label conflict on weight: kept "Weight (kg)", discarded "Weight""#
        );
    }
}
