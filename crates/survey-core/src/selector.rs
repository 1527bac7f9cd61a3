//! Row and column selectors for extraction.

use std::ops::Range;

use polars::prelude::Expr;

/// Columns to extract: literal column names and/or question names.
///
/// Each name is resolved against the exact column names first and only then
/// against the question index, so a literal column always wins over a
/// question of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColumnSelector {
    #[default]
    All,
    Names(Vec<String>),
}

impl ColumnSelector {
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        Self::Names(vec![name.to_string()])
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        Self::Names(vec![name])
    }
}

impl From<&String> for ColumnSelector {
    fn from(name: &String) -> Self {
        Self::Names(vec![name.clone()])
    }
}

impl From<Vec<String>> for ColumnSelector {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names)
    }
}

impl From<Vec<&str>> for ColumnSelector {
    fn from(names: Vec<&str>) -> Self {
        Self::names(names)
    }
}

impl From<&[&str]> for ColumnSelector {
    fn from(names: &[&str]) -> Self {
        Self::names(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSelector {
    fn from(names: [&str; N]) -> Self {
        Self::names(names)
    }
}

/// Rows to extract.
#[derive(Debug, Clone, Default)]
pub enum RowSelector {
    #[default]
    All,
    /// Row positions, in output order. Repeats are allowed.
    Indices(Vec<usize>),
    /// One flag per row.
    Mask(Vec<bool>),
    /// Boolean expression evaluated against the table.
    Predicate(Expr),
}

impl From<Vec<usize>> for RowSelector {
    fn from(indices: Vec<usize>) -> Self {
        Self::Indices(indices)
    }
}

impl From<Range<usize>> for RowSelector {
    fn from(range: Range<usize>) -> Self {
        Self::Indices(range.collect())
    }
}

impl From<Vec<bool>> for RowSelector {
    fn from(mask: Vec<bool>) -> Self {
        Self::Mask(mask)
    }
}

impl From<Expr> for RowSelector {
    fn from(predicate: Expr) -> Self {
        Self::Predicate(predicate)
    }
}
