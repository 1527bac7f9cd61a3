//! Relational verbs that keep labels in step with the table.
//!
//! Every verb routes through extraction, assignment or a full relabelling of
//! the result, so the returned container always has one label per column.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, Expr, IntoLazy, PlSmallStr, SortMultipleOptions, col};
use tracing::debug;

use survey_model::{LabelStore, ModelError};

use crate::assign::AssignValue;
use crate::container::{SurveyContainer, column_names};
use crate::error::Result;
use crate::selector::{ColumnSelector, RowSelector};

/// One aggregation output for [`SurveyContainer::aggregate`].
///
/// An output column named like an input column inherits that column's label;
/// any other output needs an explicit label.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub expr: Expr,
    pub label: Option<String>,
}

impl Aggregation {
    pub fn new(expr: Expr) -> Self {
        Self { expr, label: None }
    }

    pub fn labelled(expr: Expr, label: impl Into<String>) -> Self {
        Self {
            expr,
            label: Some(label.into()),
        }
    }
}

impl SurveyContainer {
    /// Keep the selected columns or questions.
    pub fn select(&self, columns: impl Into<ColumnSelector>) -> Result<Self> {
        self.extract(RowSelector::All, columns)
    }

    /// Keep the rows where `predicate` holds.
    pub fn filter(&self, predicate: Expr) -> Result<Self> {
        self.extract(RowSelector::Predicate(predicate), ColumnSelector::All)
    }

    /// Keep `length` rows starting at `offset` (negative counts from the end).
    pub fn slice(&self, offset: i64, length: usize) -> Self {
        self.derive(self.table().slice(offset, length), self.labels().clone())
    }

    /// Sort rows by the given columns or questions.
    pub fn arrange(&self, by: impl Into<ColumnSelector>, descending: bool) -> Result<Self> {
        let by: Vec<PlSmallStr> = self
            .resolve_columns(&by.into())?
            .into_iter()
            .map(PlSmallStr::from)
            .collect();
        let options = SortMultipleOptions::default()
            .with_order_descending(descending)
            .with_maintain_order(true);
        let table = self.table().sort(by, options)?;
        Ok(self.derive(table, self.labels().clone()))
    }

    /// Rename columns; labels move with their columns.
    ///
    /// Renames apply simultaneously. An unknown source or a name collision
    /// fails and leaves the container unchanged.
    pub fn rename(&mut self, mapping: &BTreeMap<String, String>) -> Result<()> {
        let mut labels = self.labels().clone();
        labels.rename(mapping)?;
        let columns: Vec<Column> = self
            .table()
            .get_columns()
            .iter()
            .map(|column| match mapping.get(column.name().as_str()) {
                Some(new) => column.clone().with_name(PlSmallStr::from(new.as_str())),
                None => column.clone(),
            })
            .collect();
        let table = DataFrame::new(columns)?;
        debug!(renamed = mapping.len(), "renamed columns");
        self.commit(table, labels);
        Ok(())
    }

    /// Add or replace a column; alias of [`SurveyContainer::assign`].
    pub fn mutate(
        &mut self,
        targets: impl Into<ColumnSelector>,
        value: impl Into<AssignValue>,
    ) -> Result<()> {
        self.assign(targets, value)
    }

    /// Group by columns and aggregate.
    ///
    /// `ColumnSelector::All` means no grouping: the whole table is one group.
    /// Group columns keep their labels. Aggregation outputs are labelled by
    /// their explicit label, else by the label of a same-named input column,
    /// else the call fails with [`ModelError::MissingLabel`].
    pub fn aggregate(
        &self,
        by: impl Into<ColumnSelector>,
        aggregations: &[Aggregation],
    ) -> Result<Self> {
        let keys = match by.into() {
            ColumnSelector::All => Vec::new(),
            selector => self.resolve_columns(&selector)?,
        };
        let exprs: Vec<Expr> = aggregations.iter().map(|agg| agg.expr.clone()).collect();
        let lazy = self.table().clone().lazy();
        let table = if keys.is_empty() {
            lazy.select(exprs).collect()?
        } else {
            let key_exprs: Vec<Expr> = keys.iter().map(|key| col(key.as_str())).collect();
            lazy.group_by_stable(key_exprs).agg(exprs).collect()?
        };

        let outputs = column_names(&table);
        let positional = outputs.len() == keys.len() + aggregations.len();
        let mut labels = LabelStore::new();
        for (position, column) in outputs.iter().enumerate() {
            let explicit = position
                .checked_sub(keys.len())
                .filter(|_| positional)
                .and_then(|idx| aggregations[idx].label.as_deref());
            let label = match explicit {
                Some(label) => label,
                None => self
                    .labels()
                    .get(column)
                    .map_err(|_| ModelError::missing_label(column.as_str()))?,
            };
            labels.set(column.as_str(), label);
        }
        debug!(groups = table.height(), outputs = outputs.len(), "aggregated");
        Ok(self.derive(table, labels))
    }
}
