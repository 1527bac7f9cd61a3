//! Per-container configuration.

use serde::{Deserialize, Serialize};

use crate::pattern::{DEFAULT_SEPARATOR, PatternMatcher};

/// Suffix appended to clashing non-key columns from the right side of a merge.
pub const DEFAULT_MERGE_SUFFIX: &str = ".y";

/// Per-container settings.
///
/// Carried by every survey container and inherited by every container derived
/// from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyOptions {
    /// Separator between question stem and sub-index (`Q4_1`).
    pub separator: String,
    /// Suffix for clashing right-hand columns in merges. Should not contain
    /// the separator, or suffixed columns would form spurious questions.
    pub merge_suffix: String,
    /// Also strip a shared trailing phrase when computing unique text.
    pub trim_common_suffix: bool,
}

impl Default for SurveyOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            merge_suffix: DEFAULT_MERGE_SUFFIX.to_string(),
            trim_common_suffix: false,
        }
    }
}

impl SurveyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_merge_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.merge_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_trim_common_suffix(mut self, enable: bool) -> Self {
        self.trim_common_suffix = enable;
        self
    }

    pub fn matcher(&self) -> PatternMatcher {
        PatternMatcher::new(self.separator.as_str())
    }
}
