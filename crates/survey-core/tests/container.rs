//! Container construction, question resolution and extraction.

use polars::prelude::{DataFrame, col, lit};

use survey_core::{
    ColumnSelector, LabelLookup, LabelStore, ModelError, RowSelector, SurveyContainer,
    SurveyError, SurveyOptions,
};

fn survey_frame() -> DataFrame {
    polars::df!(
        "Q1" => [34i32, 51, 27, 45],
        "Q4_1" => ["yes", "no", "yes", "no"],
        "Q4_2" => ["no", "no", "yes", "yes"],
        "Q4_3" => ["yes", "yes", "no", "no"],
        "Q10" => [61.5f64, 80.0, 55.2, 90.1],
    )
    .expect("frame")
}

fn survey() -> SurveyContainer {
    SurveyContainer::with_labels(
        survey_frame(),
        vec![
            "Age",
            "Question 4: red",
            "Question 4: green",
            "Question 4: blue",
            "Weight",
        ],
    )
    .expect("labels")
}

fn assert_labels_match_columns(container: &SurveyContainer) {
    assert!(
        container.labels().matches_columns(&container.columns()),
        "labels {:?} do not match columns {:?}",
        container.labels().columns(),
        container.columns()
    );
}

#[test]
fn groups_columns_into_questions() {
    let survey = survey();
    assert_eq!(survey.questions(), ["Q1", "Q4", "Q10"]);
    assert_eq!(survey.which_columns("Q4").unwrap(), ["Q4_1", "Q4_2", "Q4_3"]);
    assert_eq!(survey.which_columns("Q1").unwrap(), ["Q1"]);
}

#[test]
fn unknown_question_is_reported() {
    let err = survey().which_columns("Q99").unwrap_err();
    assert_eq!(err.model(), Some(&ModelError::unknown_question("Q99")));
}

#[test]
fn labels_default_to_column_names() {
    let survey = SurveyContainer::new(survey_frame());
    assert_eq!(survey.labels().get("Q4_2").unwrap(), "Q4_2");
    assert_labels_match_columns(&survey);
}

#[test]
fn label_vector_must_match_width() {
    let err = SurveyContainer::with_labels(survey_frame(), vec!["Age"]).unwrap_err();
    assert_eq!(
        err.model(),
        Some(&ModelError::LabelCountMismatch {
            expected: 5,
            actual: 1
        })
    );
}

#[test]
fn attaches_detached_label_store_in_column_order() {
    let (table, labels) = survey().into_parts();
    let reversed: Vec<(String, String)> = labels
        .iter()
        .rev()
        .map(|(column, label)| (column.to_string(), label.to_string()))
        .collect();
    let store = LabelStore::from_pairs(reversed).expect("store");
    let survey = SurveyContainer::with_label_store(table, &store).expect("attach");
    assert_eq!(survey.labels().columns(), survey.columns().as_slice());
    assert_eq!(survey.labels().get("Q1").unwrap(), "Age");
}

#[test]
fn detached_store_must_cover_every_column() {
    let store = LabelStore::from_pairs([("Q1", "Age")]).expect("store");
    let err = SurveyContainer::with_label_store(survey_frame(), &store).unwrap_err();
    assert_eq!(err.model(), Some(&ModelError::missing_label("Q4_1")));
}

#[test]
fn single_column_question_extracts_to_container() {
    let extracted = survey().select("Q1").expect("select");
    assert_eq!(extracted.columns(), ["Q1"]);
    assert_eq!(extracted.height(), 4);
    assert_eq!(extracted.labels().get("Q1").unwrap(), "Age");
    assert_labels_match_columns(&extracted);
}

#[test]
fn single_sub_column_extracts_to_container() {
    let extracted = survey().select("Q4_2").expect("select");
    assert_eq!(extracted.width(), 1);
    assert_eq!(extracted.labels().get("Q4_2").unwrap(), "Question 4: green");
}

#[test]
fn question_selector_expands_in_order() {
    let extracted = survey().select(["Q10", "Q4"]).expect("select");
    assert_eq!(extracted.columns(), ["Q10", "Q4_1", "Q4_2", "Q4_3"]);
    assert_eq!(
        extracted.labels().labels().collect::<Vec<_>>(),
        ["Weight", "Question 4: red", "Question 4: green", "Question 4: blue"]
    );
}

#[test]
fn duplicate_selections_collapse() {
    let extracted = survey().select(["Q4", "Q4_2", "Q1"]).expect("select");
    assert_eq!(extracted.columns(), ["Q4_1", "Q4_2", "Q4_3", "Q1"]);
}

#[test]
fn unknown_selector_fails() {
    let err = survey().select(["Q1", "nope"]).unwrap_err();
    assert_eq!(err.model(), Some(&ModelError::unknown_selector("nope")));
}

#[test]
fn exact_column_wins_over_question_of_same_name() {
    let table = polars::df!(
        "Q1" => [1i32, 2],
        "Q1_1" => [3i32, 4],
        "Q1_2" => [5i32, 6],
    )
    .expect("frame");
    let survey = SurveyContainer::new(table);

    assert_eq!(survey.which_columns("Q1").unwrap(), ["Q1", "Q1_1", "Q1_2"]);
    assert_eq!(survey.select("Q1").unwrap().columns(), ["Q1"]);
    let overlapping: Vec<String> = survey
        .question_index()
        .overlapping()
        .map(|group| group.name.clone())
        .collect();
    assert_eq!(overlapping, ["Q1"]);
}

#[test]
fn extracts_rows_by_index_mask_and_predicate() {
    let survey = survey();

    let by_index = survey
        .extract(vec![3usize, 0], ColumnSelector::from("Q1"))
        .expect("indices");
    let ages: Vec<Option<i32>> = by_index
        .table()
        .column("Q1")
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(ages, [Some(45), Some(34)]);

    let by_mask = survey
        .extract(vec![true, false, true, false], "Q4")
        .expect("mask");
    assert_eq!(by_mask.height(), 2);
    assert_eq!(by_mask.width(), 3);

    // Predicate may reference a column that is not kept.
    let by_predicate = survey
        .extract(col("Q1").gt(lit(40)), "Q4")
        .expect("predicate");
    assert_eq!(by_predicate.height(), 2);
    assert_eq!(by_predicate.columns(), ["Q4_1", "Q4_2", "Q4_3"]);
    assert_labels_match_columns(&by_predicate);
}

#[test]
fn row_selection_errors() {
    let survey = survey();
    let err = survey.extract(vec![4usize], ColumnSelector::All).unwrap_err();
    assert!(matches!(
        err,
        SurveyError::RowOutOfBounds {
            index: 4,
            height: 4
        }
    ));
    let err = survey.extract(vec![true], ColumnSelector::All).unwrap_err();
    assert!(matches!(err, SurveyError::MaskLengthMismatch { .. }));
}

#[test]
fn extracting_everything_round_trips() {
    let survey = survey();
    assert_eq!(
        survey.extract(RowSelector::All, ColumnSelector::All).unwrap(),
        survey
    );
    let every_column = ColumnSelector::names(survey.columns());
    assert_eq!(survey.extract(RowSelector::All, every_column).unwrap(), survey);
}

#[test]
fn label_lookup_by_column_or_question() {
    let survey = survey();
    assert_eq!(survey.label("Q10").unwrap(), LabelLookup::Column("Weight"));
    assert_eq!(
        survey.label("Q4").unwrap().into_vec(),
        ["Question 4: red", "Question 4: green", "Question 4: blue"]
    );
    assert_eq!(
        survey.label("Q7").unwrap_err().model(),
        Some(&ModelError::unknown_selector("Q7"))
    );
}

#[test]
fn decomposes_question_text() {
    let survey = survey();
    assert_eq!(survey.common_text("Q4").unwrap(), "Question 4:");
    assert_eq!(survey.unique_text("Q4").unwrap(), ["red", "green", "blue"]);
    assert_eq!(survey.common_text("Q1").unwrap(), "Age");
    assert_eq!(survey.unique_text("Q1").unwrap(), [""]);
    assert_eq!(
        survey.common_text("Q99").unwrap_err().model(),
        Some(&ModelError::unknown_question("Q99"))
    );
}

#[test]
fn suffix_trimming_follows_options() {
    let table = polars::df!(
        "B_1" => [1i32],
        "B_2" => [0i32],
    )
    .expect("frame");
    let survey = SurveyContainer::with_labels(
        table,
        vec!["Brands: Acme (select all)", "Brands: Globex (select all)"],
    )
    .expect("labels")
    .with_options(SurveyOptions::default().with_trim_common_suffix(true));
    let text = survey.question_text("B").unwrap();
    assert_eq!(text.unique, ["Acme", "Globex"]);
    assert_eq!(text.common_suffix, "(select all)");
}

#[test]
fn bulk_label_update_is_atomic() {
    let mut survey = survey();
    let err = survey
        .set_labels([("Q1", "Age (years)"), ("Q2", "Missing")])
        .unwrap_err();
    assert_eq!(err.model(), Some(&ModelError::unknown_column("Q2")));
    assert_eq!(survey.labels().get("Q1").unwrap(), "Age");

    survey
        .set_labels([("Q1", "Age (years)"), ("Q10", "Weight (kg)")])
        .expect("bulk set");
    assert_eq!(survey.labels().get("Q10").unwrap(), "Weight (kg)");
}

#[test]
fn set_label_rejects_unknown_columns() {
    let mut survey = survey();
    assert!(survey.set_label("Q4", "not a column").is_err());
    survey.set_label("Q4_1", "Colour: red").expect("set label");
    assert_eq!(survey.labels().get("Q4_1").unwrap(), "Colour: red");
}

#[test]
fn separator_change_regroups_columns() {
    let table = polars::df!(
        "Q4.1" => [1i32],
        "Q4.2" => [2i32],
        "Q5_1" => [3i32],
    )
    .expect("frame");
    let mut survey = SurveyContainer::new(table);
    assert_eq!(survey.questions(), ["Q4.1", "Q4.2", "Q5"]);

    survey.set_separator(".");
    assert_eq!(survey.separator(), ".");
    assert_eq!(survey.questions(), ["Q4", "Q5_1"]);
    assert_eq!(survey.which_columns("Q4").unwrap(), ["Q4.1", "Q4.2"]);
}

#[test]
fn derived_containers_keep_options() {
    let survey = survey().with_separator("-");
    let extracted = survey.select(["Q1", "Q10"]).unwrap();
    assert_eq!(extracted.separator(), "-");
}

#[test]
fn summary_lists_questions() {
    insta::assert_snapshot!(survey().summary(), @r"
    Q1: Q1
    Q4: Q4_1, Q4_2, Q4_3
    Q10: Q10
    ");
}
