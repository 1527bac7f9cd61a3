//! Table rendering for the question index and label decomposition.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use survey_core::{QuestionGroup, SurveyContainer};

/// One question with its columns and shared label text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRow {
    pub question: String,
    pub columns: Vec<String>,
    pub common: String,
}

/// One column with its question, label and the label text unique to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRow {
    pub column: String,
    pub question: String,
    pub label: String,
    pub unique: String,
}

pub fn question_rows(survey: &SurveyContainer) -> survey_core::Result<Vec<QuestionRow>> {
    survey
        .question_index()
        .groups()
        .iter()
        .map(|group| {
            Ok(QuestionRow {
                question: group.name.clone(),
                columns: group.columns.clone(),
                common: survey.common_text(&group.name)?,
            })
        })
        .collect()
}

/// Label rows for every question, or only for `question`.
pub fn label_rows(
    survey: &SurveyContainer,
    question: Option<&str>,
) -> survey_core::Result<Vec<LabelRow>> {
    let index = survey.question_index();
    let groups: Vec<&QuestionGroup> = match question {
        Some(name) => vec![index.group(name)?],
        None => index.groups().iter().collect(),
    };
    let mut rows = Vec::new();
    for group in groups {
        let text = survey.question_text(&group.name)?;
        for (column, unique) in group.columns.iter().zip(text.unique) {
            rows.push(LabelRow {
                column: column.clone(),
                question: group.name.clone(),
                label: survey.labels().get(column)?.to_string(),
                unique,
            });
        }
    }
    Ok(rows)
}

pub fn question_table(rows: &[QuestionRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Question"),
        header_cell("Columns"),
        header_cell("Common text"),
    ]);
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.question).add_attribute(Attribute::Bold),
            Cell::new(row.columns.join(", ")),
            text_cell(&row.common),
        ]);
    }
    table
}

pub fn label_table(rows: &[LabelRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Question"),
        header_cell("Label"),
        header_cell("Unique text"),
    ]);
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.column).add_attribute(Attribute::Bold),
            Cell::new(&row.question),
            Cell::new(&row.label),
            text_cell(&row.unique),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn text_cell(text: &str) -> Cell {
    if text.is_empty() {
        Cell::new("-").fg(Color::DarkGrey)
    } else {
        Cell::new(text)
    }
}
