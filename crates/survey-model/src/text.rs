//! Decomposition of sub-question labels into shared and varying text.
//!
//! Labels of the columns under one stem usually repeat the question wording
//! and differ only in the item: `"Question 4: red"`, `"Question 4: green"`.
//! The shared prefix is the common text; the per-column remainder is the
//! unique text. Prefixes are cut on token boundaries so a shared word is
//! never split in half.

/// Common and unique parts of a question's labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionText {
    /// Text shared by every label, trimmed.
    pub common: String,
    /// Trailing text shared by every residual, when suffix trimming is on.
    pub common_suffix: String,
    /// Per-label residual in input order.
    pub unique: Vec<String>,
}

/// Split labels into common prefix and per-label unique text.
///
/// A single label is entirely common and has empty unique text. With
/// `trim_common_suffix`, a token-aligned suffix shared by all residuals is
/// also removed from the unique parts and reported in `common_suffix`.
pub fn split_common_unique<S: AsRef<str>>(labels: &[S], trim_common_suffix: bool) -> QuestionText {
    let Some(first) = labels.first().map(|label| label.as_ref()) else {
        return QuestionText::default();
    };
    if labels.len() == 1 {
        return QuestionText {
            common: first.trim().to_string(),
            common_suffix: String::new(),
            unique: vec![String::new()],
        };
    }

    let prefix_end = common_prefix_len(labels);
    let residuals: Vec<&str> = labels
        .iter()
        .map(|label| &label.as_ref()[prefix_end..])
        .collect();

    let suffix_len = if trim_common_suffix {
        common_suffix_len(&residuals)
    } else {
        0
    };
    let common_suffix = residuals
        .first()
        .map(|residual| residual[residual.len() - suffix_len..].trim().to_string())
        .unwrap_or_default();

    QuestionText {
        common: first[..prefix_end].trim().to_string(),
        common_suffix,
        unique: residuals
            .iter()
            .map(|residual| residual[..residual.len() - suffix_len].trim().to_string())
            .collect(),
    }
}

/// Token-aligned common prefix of all labels.
pub fn common_text<S: AsRef<str>>(labels: &[S]) -> String {
    split_common_unique(labels, false).common
}

/// Per-label residual after removing the common prefix.
pub fn unique_text<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    split_common_unique(labels, false).unique
}

/// Byte length of the longest token-aligned prefix shared by all labels.
fn common_prefix_len<S: AsRef<str>>(labels: &[S]) -> usize {
    let Some(first) = labels.first().map(|label| label.as_ref()) else {
        return 0;
    };
    let mut end = first.len();
    for label in &labels[1..] {
        end = shared_prefix_len(&first[..end], label.as_ref());
    }
    while end > 0
        && !labels
            .iter()
            .all(|label| is_token_boundary(label.as_ref(), end))
    {
        end = previous_char_boundary(first, end);
    }
    end
}

/// Byte length of the longest token-aligned suffix shared by all residuals.
///
/// Zero when the suffix would swallow any non-empty residual entirely.
fn common_suffix_len(residuals: &[&str]) -> usize {
    let Some(first) = residuals.first() else {
        return 0;
    };
    let mut len = first.len();
    for residual in &residuals[1..] {
        len = shared_suffix_len(&first[first.len() - len..], residual);
    }
    while len > 0
        && !residuals
            .iter()
            .all(|residual| is_token_boundary(residual, residual.len() - len))
    {
        let start = first.len() - len;
        len = first.len() - next_char_boundary(first, start);
    }
    if residuals
        .iter()
        .any(|residual| !residual.trim().is_empty() && residual.len() == len)
    {
        return 0;
    }
    len
}

fn shared_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            break;
        }
        len += x.len_utf8();
    }
    len
}

fn shared_suffix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (x, y) in a.chars().rev().zip(b.chars().rev()) {
        if x != y {
            break;
        }
        len += x.len_utf8();
    }
    len
}

/// A cut at `idx` does not fall inside a word.
fn is_token_boundary(text: &str, idx: usize) -> bool {
    if idx == 0 || idx >= text.len() {
        return true;
    }
    let before = text[..idx].chars().next_back();
    let after = text[idx..].chars().next();
    match (before, after) {
        (Some(before), Some(after)) => !(is_word_char(before) && is_word_char(after)),
        _ => true,
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

fn previous_char_boundary(text: &str, idx: usize) -> usize {
    text[..idx]
        .char_indices()
        .next_back()
        .map(|(pos, _)| pos)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, idx: usize) -> usize {
    text[idx..]
        .chars()
        .next()
        .map(|ch| idx + ch.len_utf8())
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_shared_question_wording() {
        let text = split_common_unique(
            &["Question 4: red", "Question 4: green", "Question 4: blue"],
            false,
        );
        assert_eq!(text.common, "Question 4:");
        assert_eq!(text.unique, ["red", "green", "blue"]);
    }

    #[test]
    fn does_not_cut_inside_a_word() {
        let text = split_common_unique(&["Rate the redness", "Rate the reliability"], false);
        assert_eq!(text.common, "Rate the");
        assert_eq!(text.unique, ["redness", "reliability"]);

        let text = split_common_unique(&["Brand red", "Brand redder"], false);
        assert_eq!(text.common, "Brand");
        assert_eq!(text.unique, ["red", "redder"]);
    }

    #[test]
    fn punctuation_is_a_token_boundary() {
        let text = split_common_unique(&["Q4-red", "Q4-blue"], false);
        assert_eq!(text.common, "Q4-");
        assert_eq!(text.unique, ["red", "blue"]);
    }

    #[test]
    fn single_label_is_all_common() {
        let text = split_common_unique(&["How old are you?"], false);
        assert_eq!(text.common, "How old are you?");
        assert_eq!(text.unique, [""]);
    }

    #[test]
    fn identical_labels_leave_empty_unique_text() {
        let text = split_common_unique(&["Same", "Same"], false);
        assert_eq!(text.common, "Same");
        assert_eq!(text.unique, ["", ""]);
    }

    #[test]
    fn nothing_in_common() {
        let text = split_common_unique(&["Apples", "Oranges"], false);
        assert_eq!(text.common, "");
        assert_eq!(text.unique, ["Apples", "Oranges"]);
    }

    #[test]
    fn optional_suffix_trim() {
        let labels = [
            "Which brands: Acme (select all)",
            "Which brands: Globex (select all)",
        ];
        let text = split_common_unique(&labels, true);
        assert_eq!(text.common, "Which brands:");
        assert_eq!(text.common_suffix, "(select all)");
        assert_eq!(text.unique, ["Acme", "Globex"]);

        let untrimmed = split_common_unique(&labels, false);
        assert_eq!(untrimmed.unique, ["Acme (select all)", "Globex (select all)"]);
    }

    #[test]
    fn suffix_trim_never_empties_a_residual() {
        let text = split_common_unique(&["Q: done", "Q: not done"], true);
        assert_eq!(text.unique, ["done", "not done"]);
        assert_eq!(text.common_suffix, "");
    }

    #[test]
    fn handles_multibyte_characters() {
        let text = split_common_unique(&["Frage 5: Größe", "Frage 5: Grün"], false);
        assert_eq!(text.common, "Frage 5:");
        assert_eq!(text.unique, ["Größe", "Grün"]);
    }

    #[test]
    fn empty_input() {
        let labels: [&str; 0] = [];
        assert_eq!(split_common_unique(&labels, true), QuestionText::default());
    }
}
