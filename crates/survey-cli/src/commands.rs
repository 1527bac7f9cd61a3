use anyhow::Result;
use tracing::{info_span, warn};

use survey_cli::load::load_survey;
use survey_cli::render::{label_rows, label_table, question_rows, question_table};
use survey_core::{SurveyContainer, SurveyOptions};

use crate::cli::{LabelsArgs, SurveyArgs};

pub fn run_questions(args: &SurveyArgs) -> Result<()> {
    let survey = load(args)?;
    let rows = question_rows(&survey)?;
    println!("{}", question_table(&rows));
    Ok(())
}

pub fn run_labels(args: &LabelsArgs) -> Result<()> {
    let survey = load(&args.survey)?;
    let rows = label_rows(&survey, args.question.as_deref())?;
    println!("{}", label_table(&rows));
    Ok(())
}

fn load(args: &SurveyArgs) -> Result<SurveyContainer> {
    let span = info_span!("survey", path = %args.csv.display());
    let _guard = span.enter();
    let options = SurveyOptions::new()
        .with_separator(args.separator.as_str())
        .with_trim_common_suffix(args.trim_common_suffix);
    let survey = load_survey(&args.csv, args.labels.as_deref(), options)?;
    for group in survey.question_index().overlapping() {
        warn!(
            question = %group.name,
            columns = group.columns.len(),
            "question has both a bare stem column and sub-question columns"
        );
    }
    Ok(survey)
}
