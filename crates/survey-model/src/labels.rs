//! Ordered column-to-label mapping.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Serialized form of a single label entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub column: String,
    pub label: String,
}

/// Ordered mapping from column name to questionnaire label.
///
/// Entry order follows the column order of the table the store is attached
/// to. Column names are unique; every lookup for a foreign name fails with
/// [`ModelError::UnknownColumn`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LabelEntry>", into = "Vec<LabelEntry>")]
pub struct LabelStore {
    order: Vec<String>,
    labels: BTreeMap<String, String>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store where every column is labelled with its own name.
    pub fn from_column_names<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_pairs(columns.into_iter().map(|name| {
            let name = name.into();
            (name.clone(), name)
        }))
    }

    /// Build a store from `(column, label)` pairs, rejecting duplicate columns.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Self::new();
        for (column, label) in pairs {
            let column = column.into();
            if store.contains(&column) {
                return Err(ModelError::duplicate_column(column));
            }
            store.order.push(column.clone());
            store.labels.insert(column, label.into());
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.labels.contains_key(column)
    }

    /// Column names in store order.
    pub fn columns(&self) -> &[String] {
        &self.order
    }

    /// Label for a column.
    pub fn get(&self, column: &str) -> Result<&str> {
        self.labels
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| ModelError::unknown_column(column))
    }

    /// Labels in store order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter_map(|column| self.labels.get(column).map(String::as_str))
    }

    /// `(column, label)` pairs in store order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> {
        self.order.iter().filter_map(|column| {
            self.labels
                .get(column)
                .map(|label| (column.as_str(), label.as_str()))
        })
    }

    /// Labels for the given columns, in the order requested.
    pub fn labels_for<S: AsRef<str>>(&self, columns: &[S]) -> Result<Vec<&str>> {
        columns
            .iter()
            .map(|column| self.get(column.as_ref()))
            .collect()
    }

    /// Set the label of a column, appending the column if it is new.
    pub fn set(&mut self, column: impl Into<String>, label: impl Into<String>) {
        let column = column.into();
        if !self.labels.contains_key(&column) {
            self.order.push(column.clone());
        }
        self.labels.insert(column, label.into());
    }

    /// Replace the labels of existing columns.
    ///
    /// Either every entry is applied or none is: a single foreign column
    /// aborts the whole update and leaves the store untouched.
    pub fn bulk_set<I, K, V>(&mut self, mapping: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let updates: Vec<(String, String)> = mapping
            .into_iter()
            .map(|(column, label)| (column.into(), label.into()))
            .collect();
        if let Some((column, _)) = updates.iter().find(|(column, _)| !self.contains(column)) {
            return Err(ModelError::unknown_column(column.clone()));
        }
        for (column, label) in updates {
            self.labels.insert(column, label);
        }
        Ok(())
    }

    /// Rename columns, carrying each label along with its column.
    ///
    /// Renames are applied simultaneously, so swapping two names is allowed.
    /// Fails without modifying the store if a source column is unknown or the
    /// renamed column set would contain duplicates.
    pub fn rename(&mut self, mapping: &BTreeMap<String, String>) -> Result<()> {
        if let Some(old) = mapping.keys().find(|old| !self.contains(old)) {
            return Err(ModelError::unknown_column(old.clone()));
        }
        let renamed: Vec<String> = self
            .order
            .iter()
            .map(|column| mapping.get(column).unwrap_or(column).clone())
            .collect();
        let mut seen = BTreeSet::new();
        for column in &renamed {
            if !seen.insert(column.as_str()) {
                return Err(ModelError::duplicate_column(column.clone()));
            }
        }
        let mut labels = BTreeMap::new();
        for (old, new) in self.order.iter().zip(&renamed) {
            if let Some(label) = self.labels.get(old) {
                labels.insert(new.clone(), label.clone());
            }
        }
        self.order = renamed;
        self.labels = labels;
        Ok(())
    }

    /// Remove a column's entry, returning its label.
    pub fn remove(&mut self, column: &str) -> Option<String> {
        let label = self.labels.remove(column)?;
        self.order.retain(|name| name != column);
        Some(label)
    }

    /// New store restricted to `columns`, in that order.
    pub fn subset<S: AsRef<str>>(&self, columns: &[S]) -> Result<Self> {
        let mut subset = Self::new();
        for column in columns {
            let column = column.as_ref();
            let label = self.get(column)?;
            if subset.contains(column) {
                return Err(ModelError::duplicate_column(column));
            }
            subset.set(column, label);
        }
        Ok(subset)
    }

    /// Reorder the store to match `columns` exactly.
    ///
    /// Columns without an entry fail with [`ModelError::MissingLabel`];
    /// entries for columns not listed fail with [`ModelError::UnknownColumn`].
    pub fn aligned_to<S: AsRef<str>>(&self, columns: &[S]) -> Result<Self> {
        if let Some(column) = columns.iter().find(|column| !self.contains(column.as_ref())) {
            return Err(ModelError::missing_label(column.as_ref()));
        }
        let wanted: BTreeSet<&str> = columns.iter().map(|column| column.as_ref()).collect();
        if let Some(extra) = self.order.iter().find(|column| !wanted.contains(column.as_str())) {
            return Err(ModelError::unknown_column(extra.clone()));
        }
        self.subset(columns)
    }

    /// True when the store's keys equal `columns`, order included.
    pub fn matches_columns<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        self.order.len() == columns.len()
            && self
                .order
                .iter()
                .zip(columns)
                .all(|(ours, theirs)| ours == theirs.as_ref())
    }
}

impl TryFrom<Vec<LabelEntry>> for LabelStore {
    type Error = ModelError;

    fn try_from(entries: Vec<LabelEntry>) -> Result<Self> {
        Self::from_pairs(entries.into_iter().map(|entry| (entry.column, entry.label)))
    }
}

impl From<LabelStore> for Vec<LabelEntry> {
    fn from(store: LabelStore) -> Self {
        let LabelStore { order, mut labels } = store;
        order
            .into_iter()
            .map(|column| {
                let label = labels.remove(&column).unwrap_or_default();
                LabelEntry { column, label }
            })
            .collect()
    }
}
