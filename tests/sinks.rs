// tests/sinks.rs
use anyhow::Result;
use cxr_prep::testing::sample_key;
use cxr_prep::{
    BlobSink, JsonlTableWriter, LabelCode, LabelVector, TABLE_FIELDS, TableDest, TableWriter,
    table_row,
};
use std::fs;
use tempfile::tempdir;

fn mixed_labels() -> LabelVector {
    let mut codes = vec![
        LabelCode::NotMentioned,
        LabelCode::Positive,
        LabelCode::Uncertain,
        LabelCode::Negative,
    ];
    codes.resize(14, LabelCode::NotMentioned);
    LabelVector::new(codes)
}

#[test]
fn table_row_matches_the_declared_schema() {
    let row = table_row(&sample_key(), &mixed_labels());
    assert_eq!(row.len(), TABLE_FIELDS.len());
    for field in TABLE_FIELDS {
        assert!(row.contains_key(field), "missing column {field}");
    }
    assert_eq!(row["dataset"], 0);
    assert_eq!(row["patient_id"], 1);
    assert_eq!(row["study_id"], 10);
    assert_eq!(row["image_index"], 1);
    assert_eq!(row["view"], 0);
    assert_eq!(row["no_finding"], 0);
    assert_eq!(row["enlarged_cardiomediastinum"], 1);
    assert_eq!(row["cardiomegaly"], 2);
    assert_eq!(row["airspace_opacity"], 3);
    assert_eq!(row["path"], "train/p1/s10/view1_frontal.jpg");
}

#[test]
fn jsonl_writer_truncates_between_runs() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("labels.jsonl");
    let writer = JsonlTableWriter::new(&path);

    let rows = vec![table_row(&sample_key(), &mixed_labels()); 3];
    assert_eq!(writer.write_truncate(&rows)?, 3);
    assert_eq!(fs::read_to_string(&path)?.lines().count(), 3);

    // Second run replaces, not appends.
    assert_eq!(writer.write_truncate(&rows[..1])?, 1);
    assert_eq!(fs::read_to_string(&path)?.lines().count(), 1);
    Ok(())
}

#[test]
fn table_dest_parses_and_rejects() {
    let dest: TableDest = "proj:cxr.labels".parse().unwrap();
    assert_eq!(
        dest,
        TableDest {
            project: "proj".to_string(),
            dataset: "cxr".to_string(),
            table: "labels".to_string(),
        }
    );
    assert_eq!(dest.default_file_name(), "proj.cxr.labels.jsonl");

    for bad in ["", "proj", "proj:cxr", "proj:.labels", ":cxr.labels", "proj:cxr."] {
        assert!(bad.parse::<TableDest>().is_err(), "accepted {bad:?}");
    }
}

#[test]
fn blob_sink_writes_at_the_canonical_path() -> Result<()> {
    let dir = tempdir()?;
    let sink = BlobSink::new(dir.path());
    let path = sink.write(&sample_key(), b"jpg bytes")?;

    assert_eq!(path, dir.path().join("train/p1/s10/view1_frontal.jpg"));
    assert_eq!(fs::read(path)?, b"jpg bytes");
    Ok(())
}
