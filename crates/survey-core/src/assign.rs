//! Column assignment, removal and column-binding.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, PlSmallStr, Series};
use tracing::debug;

use survey_model::ModelError;

use crate::container::SurveyContainer;
use crate::error::{Result, SurveyError};
use crate::selector::ColumnSelector;

/// Value assigned into a container.
///
/// A labelled value brings its labels along and they overwrite the target
/// columns' labels. A plain value keeps existing labels and may not introduce
/// new columns.
#[derive(Debug, Clone)]
pub enum AssignValue {
    Plain(DataFrame),
    Labelled(SurveyContainer),
}

impl AssignValue {
    fn table(&self) -> &DataFrame {
        match self {
            Self::Plain(table) => table,
            Self::Labelled(container) => container.table(),
        }
    }

    fn label(&self, position: usize) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Labelled(container) => container
                .labels()
                .columns()
                .get(position)
                .and_then(|column| container.labels().get(column).ok()),
        }
    }
}

impl From<DataFrame> for AssignValue {
    fn from(table: DataFrame) -> Self {
        Self::Plain(table)
    }
}

impl From<SurveyContainer> for AssignValue {
    fn from(container: SurveyContainer) -> Self {
        Self::Labelled(container)
    }
}

impl From<Series> for AssignValue {
    fn from(series: Series) -> Self {
        Self::Plain(series.into_frame())
    }
}

impl SurveyContainer {
    /// Assign columns of `value` to the target columns, positionally.
    ///
    /// Targets resolve like extraction selectors except that an unknown name
    /// is a new column rather than an error. New columns need labels, so a
    /// plain value targeting a new column fails with
    /// [`ModelError::MissingLabel`]. Nothing changes unless every target is
    /// written.
    pub fn assign(
        &mut self,
        targets: impl Into<ColumnSelector>,
        value: impl Into<AssignValue>,
    ) -> Result<()> {
        let value = value.into();
        let targets = self.resolve_targets(&targets.into());
        let source = value.table();
        if source.width() != targets.len() {
            return Err(SurveyError::WidthMismatch {
                expected: targets.len(),
                actual: source.width(),
            });
        }
        if self.width() > 0 && source.height() != self.height() {
            return Err(SurveyError::HeightMismatch {
                expected: self.height(),
                actual: source.height(),
            });
        }

        let mut labels = self.labels().clone();
        let mut added = 0usize;
        for (position, target) in targets.iter().enumerate() {
            let exists = labels.contains(target);
            match value.label(position) {
                Some(label) => labels.set(target.as_str(), label),
                None if exists => {}
                None => return Err(ModelError::missing_label(target.as_str()).into()),
            }
            if !exists {
                added += 1;
            }
        }

        let mut table = self.table().clone();
        for (column, target) in source.get_columns().iter().zip(&targets) {
            table.with_column(column.clone().with_name(PlSmallStr::from(target.as_str())))?;
        }
        if added > 0 {
            debug!(added, total = table.width(), "columns added; question index rebuilt");
        }
        debug!(columns = targets.len(), "assigned columns");
        self.commit(table, labels);
        Ok(())
    }

    /// Remove columns; question names remove every column of the question.
    pub fn drop_columns(&mut self, selector: impl Into<ColumnSelector>) -> Result<()> {
        let dropped: BTreeSet<String> = self
            .resolve_columns(&selector.into())?
            .into_iter()
            .collect();
        let survivors: Vec<String> = self
            .columns()
            .into_iter()
            .filter(|column| !dropped.contains(column))
            .collect();
        let table = self.table().select(survivors.iter().cloned())?;
        let labels = self.labels().subset(&survivors)?;
        debug!(dropped = dropped.len(), "dropped columns");
        self.commit(table, labels);
        Ok(())
    }

    /// Append the columns of another container, labels included.
    pub fn hstack(&mut self, other: &SurveyContainer) -> Result<()> {
        if let Some(duplicate) = other.columns().into_iter().find(|column| self.has_column(column)) {
            return Err(ModelError::duplicate_column(duplicate).into());
        }
        self.assign(ColumnSelector::Names(other.columns()), other.clone())
    }

    /// Targets for assignment: existing columns, expanded questions, or new names.
    fn resolve_targets(&self, selector: &ColumnSelector) -> Vec<String> {
        let names = match selector {
            ColumnSelector::All => return self.columns(),
            ColumnSelector::Names(names) => names,
        };
        let index = self.question_index();
        let mut seen = BTreeSet::new();
        let mut targets = Vec::new();
        for name in names {
            let expanded: &[String] = if self.has_column(name) {
                std::slice::from_ref(name)
            } else if let Ok(columns) = index.columns_of(name) {
                columns
            } else {
                std::slice::from_ref(name)
            };
            for column in expanded {
                if seen.insert(column.clone()) {
                    targets.push(column.clone());
                }
            }
        }
        targets
    }
}
