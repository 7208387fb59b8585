// tests/labels.rs
use cxr_prep::testing::{label_line, sample_codes, sample_key};
use cxr_prep::{DataError, LABEL_COLUMNS, LabelCode, View, parse_label_line};

#[test]
fn chexpert_codes_accept_exactly_four_encodings() {
    assert_eq!(LabelCode::from_chexpert("").unwrap(), LabelCode::NotMentioned);
    assert_eq!(LabelCode::from_chexpert("1.0").unwrap(), LabelCode::Positive);
    assert_eq!(
        LabelCode::from_chexpert("-1.0").unwrap(),
        LabelCode::Uncertain
    );
    assert_eq!(LabelCode::from_chexpert("0.0").unwrap(), LabelCode::Negative);

    for raw in ["1", "0", "-1", "2.0", " ", " 1.0", "1.0 ", "nan", "NULL"] {
        let err = LabelCode::from_chexpert(raw).unwrap_err();
        assert_eq!(
            err,
            DataError::UnrecognizedLabelCode {
                raw: raw.to_string()
            },
            "expected rejection for {raw:?}"
        );
    }
}

#[test]
fn label_codes_are_pinned() {
    assert_eq!(LabelCode::NotMentioned.code(), 0);
    assert_eq!(LabelCode::Positive.code(), 1);
    assert_eq!(LabelCode::Uncertain.code(), 2);
    assert_eq!(LabelCode::Negative.code(), 3);
}

#[test]
fn parses_a_well_formed_line() {
    let line = label_line("train/p1/s10/view1_frontal.jpg", "frontal", &sample_codes());
    let (key, labels) = parse_label_line(&line).unwrap();
    assert_eq!(key, sample_key());
    assert_eq!(labels.len(), 14);
    assert_eq!(labels.codes()[0], LabelCode::NotMentioned);
    assert_eq!(labels.codes()[1], LabelCode::Positive);
    assert_eq!(labels.codes()[2], LabelCode::Uncertain);
    assert_eq!(labels.codes()[3], LabelCode::Negative);
    assert!(
        labels.codes()[4..]
            .iter()
            .all(|&c| c == LabelCode::NotMentioned)
    );
}

#[test]
fn quoted_fields_split_correctly() {
    let line = label_line(
        "valid/p2/s3/view1_lateral.jpg",
        "lateral",
        &["\"1.0\"", "", "", "", "", "", "", "", "", "", "", "", "", "0.0"],
    );
    let (key, labels) = parse_label_line(&line).unwrap();
    assert_eq!(key.patient_id, 2);
    assert_eq!(labels.codes()[0], LabelCode::Positive);
    assert_eq!(labels.codes()[13], LabelCode::Negative);
}

#[test]
fn path_wins_over_informational_view_column() {
    // The view column disagrees with the path; the path is ground truth.
    let line = label_line("train/p1/s10/view1_frontal.jpg", "lateral", &sample_codes());
    let (key, _) = parse_label_line(&line).unwrap();
    assert_eq!(key.view, View::Frontal);
}

#[test]
fn wrong_column_count_is_rejected() {
    let short = label_line("train/p1/s10/view1_frontal.jpg", "frontal", &["1.0"]);
    assert_eq!(
        parse_label_line(&short).unwrap_err(),
        DataError::MalformedLabelRow { columns: 3 }
    );

    let long = label_line(
        "train/p1/s10/view1_frontal.jpg",
        "frontal",
        &["", "", "", "", "", "", "", "", "", "", "", "", "", "", ""],
    );
    assert_eq!(
        parse_label_line(&long).unwrap_err(),
        DataError::MalformedLabelRow {
            columns: LABEL_COLUMNS + 1
        }
    );
}

#[test]
fn bad_path_and_bad_code_propagate() {
    let bad_path = label_line("not/a/key.jpg", "frontal", &sample_codes());
    assert!(matches!(
        parse_label_line(&bad_path).unwrap_err(),
        DataError::MalformedPath { .. }
    ));

    let mut codes = sample_codes();
    codes[5] = "2.0";
    let bad_code = label_line("train/p1/s10/view1_frontal.jpg", "frontal", &codes);
    assert_eq!(
        parse_label_line(&bad_code).unwrap_err(),
        DataError::UnrecognizedLabelCode {
            raw: "2.0".to_string()
        }
    );
}

#[test]
fn parsing_is_idempotent() {
    let line = label_line("other/p5/s6/view0_other.jpg", "other", &sample_codes());
    assert_eq!(parse_label_line(&line).unwrap(), parse_label_line(&line).unwrap());
}
