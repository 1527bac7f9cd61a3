//! Logical questions derived from the column list.

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};
use crate::pattern::PatternMatcher;

/// One logical question and the physical columns that realise it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionGroup {
    pub name: String,
    pub columns: Vec<String>,
    /// The stem itself is also a literal column name.
    pub has_stem_column: bool,
}

impl QuestionGroup {
    /// Stem column coexists with sub-question columns (`Q1` next to `Q1_1`).
    pub fn is_overlapping(&self) -> bool {
        self.has_stem_column && self.columns.len() > 1
    }
}

/// Mapping from question name to its ordered columns.
///
/// Always built from scratch from the current column list; never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionIndex {
    groups: Vec<QuestionGroup>,
    positions: BTreeMap<String, usize>,
}

impl QuestionIndex {
    pub fn build<I, S>(columns: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_with(&PatternMatcher::new(separator), columns)
    }

    pub fn build_with<I, S>(matcher: &PatternMatcher, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let grouped = matcher.group_by_stem(columns);
        let mut positions = BTreeMap::new();
        let mut groups = Vec::with_capacity(grouped.len());
        for (idx, (name, columns)) in grouped.into_iter().enumerate() {
            let has_stem_column = columns.iter().any(|column| *column == name);
            positions.insert(name.clone(), idx);
            groups.push(QuestionGroup {
                name,
                columns,
                has_stem_column,
            });
        }
        Self { groups, positions }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains(&self, question: &str) -> bool {
        self.positions.contains_key(question)
    }

    pub fn group(&self, question: &str) -> Result<&QuestionGroup> {
        self.positions
            .get(question)
            .map(|&idx| &self.groups[idx])
            .ok_or_else(|| ModelError::unknown_question(question))
    }

    /// Ordered columns of a question.
    pub fn columns_of(&self, question: &str) -> Result<&[String]> {
        self.group(question).map(|group| group.columns.as_slice())
    }

    /// Question names in order of first appearance.
    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.name.as_str())
    }

    pub fn groups(&self) -> &[QuestionGroup] {
        &self.groups
    }

    /// Questions whose stem is also a literal column alongside sub-columns.
    pub fn overlapping(&self) -> impl Iterator<Item = &QuestionGroup> {
        self.groups.iter().filter(|group| group.is_overlapping())
    }
}
