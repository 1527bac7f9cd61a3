//! The survey container: a table bound to its column labels.

use std::collections::BTreeSet;

use polars::prelude::{BooleanChunked, DataFrame, IdxCa, IdxSize, IntoLazy, NewChunkedArray, PlSmallStr};
use tracing::debug;

use survey_model::{
    LabelStore, ModelError, QuestionIndex, QuestionText, SurveyOptions, split_common_unique,
};

use crate::error::{Result, SurveyError};
use crate::selector::{ColumnSelector, RowSelector};

/// Label lookup result: a column has one label, a question has one per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelLookup<'a> {
    Column(&'a str),
    Question(Vec<&'a str>),
}

impl<'a> LabelLookup<'a> {
    pub fn into_vec(self) -> Vec<&'a str> {
        match self {
            Self::Column(label) => vec![label],
            Self::Question(labels) => labels,
        }
    }
}

/// Survey data with one label per column and a sub-question grouping rule.
///
/// The label store always holds exactly the table's columns, in table order.
/// Every extraction returns another container, even for a single column, and
/// every mutation either completes or leaves the container untouched.
///
/// The question index is derived from the current columns on every call,
/// so it can never go stale after a structural change.
#[derive(Debug, Clone)]
pub struct SurveyContainer {
    table: DataFrame,
    labels: LabelStore,
    options: SurveyOptions,
}

impl PartialEq for SurveyContainer {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
            && self.options == other.options
            && self.table.equals_missing(&other.table)
    }
}

impl SurveyContainer {
    /// Wrap a table, labelling every column with its own name.
    pub fn new(table: DataFrame) -> Self {
        let mut labels = LabelStore::new();
        for name in column_names(&table) {
            labels.set(name.clone(), name);
        }
        Self::from_parts(table, labels, SurveyOptions::default())
    }

    /// Wrap a table with one label per column, in column order.
    pub fn with_labels<S: Into<String>>(table: DataFrame, labels: Vec<S>) -> Result<Self> {
        let columns = column_names(&table);
        if columns.len() != labels.len() {
            return Err(ModelError::LabelCountMismatch {
                expected: columns.len(),
                actual: labels.len(),
            }
            .into());
        }
        let store = LabelStore::from_pairs(columns.into_iter().zip(labels))?;
        Ok(Self::from_parts(table, store, SurveyOptions::default()))
    }

    /// Attach a previously detached label store.
    ///
    /// The store is reordered to the table's column order; it must cover
    /// every column and nothing else.
    pub fn with_label_store(table: DataFrame, labels: &LabelStore) -> Result<Self> {
        let store = labels.aligned_to(&column_names(&table))?;
        Ok(Self::from_parts(table, store, SurveyOptions::default()))
    }

    #[must_use]
    pub fn with_options(mut self, options: SurveyOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.set_separator(separator);
        self
    }

    pub(crate) fn from_parts(table: DataFrame, labels: LabelStore, options: SurveyOptions) -> Self {
        debug_assert!(labels.matches_columns(&column_names(&table)));
        Self {
            table,
            labels,
            options,
        }
    }

    /// Derived container sharing this one's options.
    pub(crate) fn derive(&self, table: DataFrame, labels: LabelStore) -> Self {
        Self::from_parts(table, labels, self.options.clone())
    }

    /// Replace table and labels together.
    pub(crate) fn commit(&mut self, table: DataFrame, labels: LabelStore) {
        debug_assert!(labels.matches_columns(&column_names(&table)));
        self.table = table;
        self.labels = labels;
    }

    pub fn table(&self) -> &DataFrame {
        &self.table
    }

    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    pub fn options(&self) -> &SurveyOptions {
        &self.options
    }

    pub fn separator(&self) -> &str {
        &self.options.separator
    }

    /// Change the sub-question separator; grouping follows immediately.
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.options.separator = separator.into();
    }

    /// Split into the plain table and its labels.
    pub fn into_parts(self) -> (DataFrame, LabelStore) {
        (self.table, self.labels)
    }

    pub fn height(&self) -> usize {
        self.table.height()
    }

    pub fn width(&self) -> usize {
        self.table.width()
    }

    /// Column names in table order.
    pub fn columns(&self) -> Vec<String> {
        column_names(&self.table)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.labels.contains(name)
    }

    /// Question index over the current columns.
    pub fn question_index(&self) -> QuestionIndex {
        QuestionIndex::build_with(&self.options.matcher(), self.labels.columns())
    }

    /// Question names in order of first appearance.
    pub fn questions(&self) -> Vec<String> {
        self.question_index()
            .questions()
            .map(str::to_string)
            .collect()
    }

    /// Columns realising a question.
    pub fn which_columns(&self, question: &str) -> Result<Vec<String>> {
        Ok(self.question_index().columns_of(question)?.to_vec())
    }

    /// Label of a column, or the labels of a question's columns.
    ///
    /// A literal column name takes precedence over a question of the same
    /// name.
    pub fn label(&self, name: &str) -> Result<LabelLookup<'_>> {
        if let Ok(label) = self.labels.get(name) {
            return Ok(LabelLookup::Column(label));
        }
        let index = self.question_index();
        let columns = index
            .columns_of(name)
            .map_err(|_| ModelError::unknown_selector(name))?;
        Ok(LabelLookup::Question(self.labels.labels_for(columns)?))
    }

    /// Labels of the columns a selector resolves to.
    pub fn labels_of(&self, selector: impl Into<ColumnSelector>) -> Result<Vec<&str>> {
        let columns = self.resolve_columns(&selector.into())?;
        Ok(self.labels.labels_for(&columns)?)
    }

    /// Set one column's label.
    pub fn set_label(&mut self, column: &str, label: impl Into<String>) -> Result<()> {
        if !self.labels.contains(column) {
            return Err(ModelError::unknown_column(column).into());
        }
        self.labels.set(column, label);
        Ok(())
    }

    /// Set several labels at once; any unknown column aborts the whole update.
    pub fn set_labels<I, K, V>(&mut self, mapping: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(self.labels.bulk_set(mapping)?)
    }

    /// Common and unique label text of a question.
    pub fn question_text(&self, question: &str) -> Result<QuestionText> {
        let index = self.question_index();
        let labels = self.labels.labels_for(index.columns_of(question)?)?;
        Ok(split_common_unique(
            &labels,
            self.options.trim_common_suffix,
        ))
    }

    /// Label text shared by all columns of a question.
    pub fn common_text(&self, question: &str) -> Result<String> {
        Ok(self.question_text(question)?.common)
    }

    /// Per-column label text after removing the common text.
    pub fn unique_text(&self, question: &str) -> Result<Vec<String>> {
        Ok(self.question_text(question)?.unique)
    }

    /// Resolve a selector to physical columns.
    ///
    /// Each name is matched as a literal column first, then expanded as a
    /// question; anything else is [`ModelError::UnknownSelector`]. Duplicates
    /// are dropped, keeping the first position.
    pub fn resolve_columns(&self, selector: &ColumnSelector) -> Result<Vec<String>> {
        let names = match selector {
            ColumnSelector::All => return Ok(self.columns()),
            ColumnSelector::Names(names) => names,
        };
        let index = self.question_index();
        let mut seen = BTreeSet::new();
        let mut resolved = Vec::new();
        for name in names {
            let expanded: &[String] = if self.labels.contains(name) {
                std::slice::from_ref(name)
            } else if let Ok(columns) = index.columns_of(name) {
                debug!(question = %name, columns = columns.len(), "expanded question selector");
                columns
            } else {
                return Err(ModelError::unknown_selector(name.as_str()).into());
            };
            for column in expanded {
                if seen.insert(column.clone()) {
                    resolved.push(column.clone());
                }
            }
        }
        Ok(resolved)
    }

    /// Extract rows and columns into a new container.
    ///
    /// Rows are selected before columns, so a predicate may reference columns
    /// that are not kept. The result carries exactly the labels of the
    /// surviving columns, even when only one column survives.
    pub fn extract(
        &self,
        rows: impl Into<RowSelector>,
        columns: impl Into<ColumnSelector>,
    ) -> Result<Self> {
        let columns = self.resolve_columns(&columns.into())?;
        let table = take_rows(&self.table, &rows.into())?.select(columns.iter().cloned())?;
        let labels = self.labels.subset(&columns)?;
        Ok(self.derive(table, labels))
    }

    /// One `question: column, column` line per question.
    pub fn summary(&self) -> String {
        self.question_index()
            .groups()
            .iter()
            .map(|group| format!("{}: {}", group.name, group.columns.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub(crate) fn column_names(table: &DataFrame) -> Vec<String> {
    table
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn take_rows(table: &DataFrame, rows: &RowSelector) -> Result<DataFrame> {
    match rows {
        RowSelector::All => Ok(table.clone()),
        RowSelector::Indices(indices) => {
            let height = table.height();
            let mut positions = Vec::with_capacity(indices.len());
            for &index in indices {
                if index >= height {
                    return Err(SurveyError::RowOutOfBounds { index, height });
                }
                positions.push(index as IdxSize);
            }
            let positions = IdxCa::from_vec(PlSmallStr::from_static("rows"), positions);
            Ok(table.take(&positions)?)
        }
        RowSelector::Mask(mask) => {
            if mask.len() != table.height() {
                return Err(SurveyError::MaskLengthMismatch {
                    expected: table.height(),
                    actual: mask.len(),
                });
            }
            let mask = BooleanChunked::from_slice(PlSmallStr::from_static("mask"), mask);
            Ok(table.filter(&mask)?)
        }
        RowSelector::Predicate(predicate) => {
            Ok(table.clone().lazy().filter(predicate.clone()).collect()?)
        }
    }
}
