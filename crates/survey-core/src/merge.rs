//! Relational merge and row-binding with label reconciliation.

use polars::prelude::{
    Expr, IntoLazy, JoinArgs, JoinCoalesce, JoinType, PlSmallStr, col,
};
use tracing::{debug, warn};

use survey_model::{LabelConflict, LabelStore, ModelError};

use crate::container::{SurveyContainer, column_names};
use crate::error::{Result, SurveyError};

/// Join flavour for [`merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinHow {
    #[default]
    Inner,
    Left,
    Full,
}

impl From<JoinHow> for JoinType {
    fn from(how: JoinHow) -> Self {
        match how {
            JoinHow::Inner => JoinType::Inner,
            JoinHow::Left => JoinType::Left,
            JoinHow::Full => JoinType::Full,
        }
    }
}

/// Merge settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Join keys; defaults to the columns both sides share, in left order.
    pub keys: Option<Vec<String>>,
    pub how: JoinHow,
    /// Suffix for clashing right-hand columns; defaults to the left
    /// container's configured merge suffix.
    pub suffix: Option<String>,
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn how(mut self, how: JoinHow) -> Self {
        self.how = how;
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// Merged or stacked container plus the label disagreements found on the way.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub container: SurveyContainer,
    pub conflicts: Vec<LabelConflict>,
}

impl MergeResult {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn into_container(self) -> SurveyContainer {
        self.container
    }

    /// The container, or [`SurveyError::LabelConflicts`] if any were recorded.
    pub fn into_strict(self) -> Result<SurveyContainer> {
        if self.conflicts.is_empty() {
            Ok(self.container)
        } else {
            Err(SurveyError::LabelConflicts(self.conflicts))
        }
    }
}

/// Join two containers on key columns.
///
/// Result labels are the union of both sides. Where both sides label the
/// same surviving column (the join keys) differently, the left label is kept
/// and the disagreement is recorded as a [`LabelConflict`]. Clashing non-key
/// columns from the right get the merge suffix and keep their own label.
pub fn merge(
    left: &SurveyContainer,
    right: &SurveyContainer,
    options: &MergeOptions,
) -> Result<MergeResult> {
    let keys = match &options.keys {
        Some(keys) => keys.clone(),
        None => left
            .columns()
            .into_iter()
            .filter(|column| right.has_column(column))
            .collect(),
    };
    if keys.is_empty() {
        return Err(SurveyError::NoJoinKeys);
    }
    for key in &keys {
        if !left.has_column(key) || !right.has_column(key) {
            return Err(ModelError::unknown_column(key.as_str()).into());
        }
    }
    let suffix = options
        .suffix
        .clone()
        .unwrap_or_else(|| left.options().merge_suffix.clone());

    let key_exprs: Vec<Expr> = keys.iter().map(|key| col(key.as_str())).collect();
    let args = JoinArgs::new(options.how.into())
        .with_suffix(Some(PlSmallStr::from(suffix.as_str())))
        .with_coalesce(JoinCoalesce::CoalesceColumns);
    let table = left
        .table()
        .clone()
        .lazy()
        .join(right.table().clone().lazy(), &key_exprs, &key_exprs, args)
        .collect()?;

    let mut labels = LabelStore::new();
    let mut conflicts = Vec::new();
    for column in column_names(&table) {
        let label = if let Ok(kept) = left.labels().get(&column) {
            if keys.contains(&column)
                && let Ok(other) = right.labels().get(&column)
                && let Some(conflict) = LabelConflict::between(&column, kept, other)
            {
                warn!(
                    column = %conflict.column,
                    kept = %conflict.kept,
                    discarded = %conflict.discarded,
                    "label conflict in merge; keeping left label"
                );
                conflicts.push(conflict);
            }
            kept
        } else if let Ok(label) = right.labels().get(&column) {
            label
        } else {
            column
                .strip_suffix(suffix.as_str())
                .and_then(|base| right.labels().get(base).ok())
                .ok_or_else(|| ModelError::missing_label(column.as_str()))?
        };
        labels.set(column.as_str(), label);
    }

    debug!(
        keys = ?keys,
        rows = table.height(),
        columns = table.width(),
        conflicts = conflicts.len(),
        "merged containers"
    );
    Ok(MergeResult {
        container: left.derive(table, labels),
        conflicts,
    })
}

impl SurveyContainer {
    /// Join with another container; see [`merge`].
    pub fn merge(&self, other: &SurveyContainer, options: &MergeOptions) -> Result<MergeResult> {
        merge(self, other, options)
    }

    /// Append the rows of another container with the same columns.
    ///
    /// The other container's columns are reordered to this one's. Labels
    /// that disagree keep this container's text and are recorded as
    /// conflicts.
    pub fn vstack(&self, other: &SurveyContainer) -> Result<MergeResult> {
        let columns = self.columns();
        let missing: Vec<String> = columns
            .iter()
            .filter(|column| !other.has_column(column))
            .cloned()
            .collect();
        let extra: Vec<String> = other
            .columns()
            .into_iter()
            .filter(|column| !self.has_column(column))
            .collect();
        if !missing.is_empty() || !extra.is_empty() {
            return Err(SurveyError::ColumnSetMismatch { missing, extra });
        }

        let mut conflicts = Vec::new();
        for (column, kept) in self.labels().iter() {
            let other_label = other.labels().get(column)?;
            if let Some(conflict) = LabelConflict::between(column, kept, other_label) {
                warn!(
                    column = %conflict.column,
                    kept = %conflict.kept,
                    discarded = %conflict.discarded,
                    "label conflict in row bind; keeping first label"
                );
                conflicts.push(conflict);
            }
        }

        let aligned = other.table().select(columns.iter().cloned())?;
        let table = self.table().vstack(&aligned)?;
        Ok(MergeResult {
            container: self.derive(table, self.labels().clone()),
            conflicts,
        })
    }
}
