//! Label disagreements found while combining containers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Two sources disagreed on a column's label.
///
/// Recorded rather than raised: the `kept` label wins and `discarded` is
/// reported so strict callers can reject the result themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConflict {
    pub column: String,
    pub kept: String,
    pub discarded: String,
}

impl LabelConflict {
    pub fn new(
        column: impl Into<String>,
        kept: impl Into<String>,
        discarded: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            kept: kept.into(),
            discarded: discarded.into(),
        }
    }

    /// Conflict between two labels, if they differ.
    pub fn between(column: &str, kept: &str, discarded: &str) -> Option<Self> {
        (kept != discarded).then(|| Self::new(column, kept, discarded))
    }
}

impl fmt::Display for LabelConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "label conflict on {}: kept {:?}, discarded {:?}",
            self.column, self.kept, self.discarded
        )
    }
}
