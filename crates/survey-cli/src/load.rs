//! Loading a survey from a CSV table and an optional JSON label file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use serde::Deserialize;
use tracing::info;

use survey_core::{LabelStore, SurveyContainer, SurveyOptions};

/// Label file contents.
///
/// Either an ordered list of `{"column": .., "label": ..}` entries or a plain
/// `{"column": "label"}` object. Columns the file does not mention keep their
/// own name as label.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LabelFile {
    Entries(LabelStore),
    Map(BTreeMap<String, String>),
}

impl LabelFile {
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read label file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parse label file {}", path.display()))
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        match self {
            Self::Entries(store) => store
                .iter()
                .map(|(column, label)| (column.to_string(), label.to_string()))
                .collect(),
            Self::Map(map) => map.into_iter().collect(),
        }
    }
}

/// Read a CSV file with a single header row.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open {}", path.display()))?
        .finish()
        .with_context(|| format!("read {}", path.display()))
}

/// Load a survey container, applying labels from `labels` when given.
///
/// A label for a column the table does not have fails the whole load.
pub fn load_survey(
    csv: &Path,
    labels: Option<&Path>,
    options: SurveyOptions,
) -> Result<SurveyContainer> {
    let table = read_table(csv)?;
    info!(
        path = %csv.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded table"
    );
    let mut survey = SurveyContainer::new(table).with_options(options);
    if let Some(path) = labels {
        let pairs = LabelFile::read(path)?.into_pairs();
        let count = pairs.len();
        survey
            .set_labels(pairs)
            .with_context(|| format!("apply labels from {}", path.display()))?;
        info!(labels = count, "applied labels");
    }
    Ok(survey)
}
