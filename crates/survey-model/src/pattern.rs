//! Column-name classification into question stems and sub-indices.

use std::collections::BTreeMap;

/// Default separator between a question stem and its sub-index.
pub const DEFAULT_SEPARATOR: &str = "_";

/// A column name split into stem and optional sub-index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPattern<'a> {
    pub stem: &'a str,
    pub sub_index: Option<&'a str>,
}

impl ColumnPattern<'_> {
    pub fn is_sub_question(&self) -> bool {
        self.sub_index.is_some()
    }
}

/// Splits column names on the last occurrence of a separator.
///
/// `Q4_1` with separator `_` is stem `Q4`, sub-index `1`. A name is only split
/// when both the stem and the remainder are non-empty; anything else (`Q10`,
/// `_1`, `Q4_`) is its own stem. Classification never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternMatcher {
    separator: String,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl PatternMatcher {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn classify<'a>(&self, column: &'a str) -> ColumnPattern<'a> {
        let whole = ColumnPattern {
            stem: column,
            sub_index: None,
        };
        if self.separator.is_empty() {
            return whole;
        }
        match column.rsplit_once(self.separator.as_str()) {
            Some((stem, sub_index)) if !stem.is_empty() && !sub_index.is_empty() => {
                ColumnPattern {
                    stem,
                    sub_index: Some(sub_index),
                }
            }
            _ => whole,
        }
    }

    pub fn stem<'a>(&self, column: &'a str) -> &'a str {
        self.classify(column).stem
    }

    /// Group column names by stem.
    ///
    /// Stems appear in order of their first column; columns within a stem
    /// keep their original relative order.
    pub fn group_by_stem<I, S>(&self, columns: I) -> Vec<(String, Vec<String>)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        let mut positions: BTreeMap<String, usize> = BTreeMap::new();
        for column in columns {
            let column = column.as_ref();
            let stem = self.stem(column);
            match positions.get(stem) {
                Some(&idx) => groups[idx].1.push(column.to_string()),
                None => {
                    positions.insert(stem.to_string(), groups.len());
                    groups.push((stem.to_string(), vec![column.to_string()]));
                }
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_on_last_separator() {
        let matcher = PatternMatcher::default();
        assert_eq!(
            matcher.classify("Q4_1"),
            ColumnPattern {
                stem: "Q4",
                sub_index: Some("1")
            }
        );
        assert_eq!(matcher.classify("Q4_1_other").stem, "Q4_1");
        assert_eq!(matcher.classify("Q4_1_other").sub_index, Some("other"));
    }

    #[test]
    fn names_without_usable_split_are_their_own_stem() {
        let matcher = PatternMatcher::default();
        for name in ["Q10", "_1", "Q4_", "_", ""] {
            let pattern = matcher.classify(name);
            assert_eq!(pattern.stem, name);
            assert!(!pattern.is_sub_question());
        }
    }

    #[test]
    fn supports_multi_character_separators() {
        let matcher = PatternMatcher::new("..");
        assert_eq!(matcher.stem("Q2..a"), "Q2");
        assert_eq!(matcher.stem("Q2.a"), "Q2.a");
    }

    #[test]
    fn empty_separator_never_splits() {
        let matcher = PatternMatcher::new("");
        assert_eq!(matcher.stem("Q4_1"), "Q4_1");
    }

    #[test]
    fn groups_by_first_appearance() {
        let matcher = PatternMatcher::default();
        let groups = matcher.group_by_stem(["Q1", "Q4_1", "Q4_2", "Q10", "Q4_3"]);
        assert_eq!(
            groups,
            vec![
                ("Q1".to_string(), vec!["Q1".to_string()]),
                (
                    "Q4".to_string(),
                    vec!["Q4_1".to_string(), "Q4_2".to_string(), "Q4_3".to_string()]
                ),
                ("Q10".to_string(), vec!["Q10".to_string()]),
            ]
        );
    }

    proptest! {
        #[test]
        fn classification_reassembles_the_name(name in "[A-Za-z0-9_]{0,12}") {
            let matcher = PatternMatcher::default();
            let pattern = matcher.classify(&name);
            let rebuilt = match pattern.sub_index {
                Some(sub) => format!("{}_{}", pattern.stem, sub),
                None => pattern.stem.to_string(),
            };
            prop_assert_eq!(rebuilt, name);
        }

        #[test]
        fn grouping_keeps_every_column_once(
            names in proptest::collection::btree_set("[A-C][0-9]{0,2}(_[0-9]{1,2})?", 0..20)
        ) {
            let matcher = PatternMatcher::default();
            let groups = matcher.group_by_stem(&names);
            let total: usize = groups.iter().map(|(_, columns)| columns.len()).sum();
            prop_assert_eq!(total, names.len());
        }
    }
}
