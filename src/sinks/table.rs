//! Tabular sink: one flat row per label record.
//!
//! Rows carry the key fields as integer enumeration codes and ids, the 14
//! category codes, and the canonical path -- the schema in [`TABLE_FIELDS`].
//! This branch consumes label records directly and does not wait for the
//! image join.
//!
//! The tabular store itself is an external collaborator; its contract is
//! the [`TableWriter`] trait (truncate-and-replace semantics, flat
//! field-name -> value mappings). [`JsonlTableWriter`] is the bundled
//! implementation, writing rows as JSON Lines to a local file.

use crate::keys::ImageKey;
use crate::labels::{LABEL_CATEGORIES, LabelVector};
use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// One flat table row.
pub type TableRow = Map<String, Value>;

/// Table schema, in column order: key fields, categories, canonical path.
pub const TABLE_FIELDS: [&str; 20] = [
    "dataset",
    "patient_id",
    "study_id",
    "image_index",
    "view",
    "no_finding",
    "enlarged_cardiomediastinum",
    "cardiomegaly",
    "airspace_opacity",
    "lung_lesion",
    "edema",
    "consolidation",
    "pneumonia",
    "atelectasis",
    "pneumothorax",
    "pleural_effusion",
    "pleural_other",
    "fracture",
    "support_devices",
    "path",
];

/// Render one label record as a flat table row.
#[must_use]
pub fn table_row(key: &ImageKey, labels: &LabelVector) -> TableRow {
    let mut row = Map::new();
    row.insert("dataset".to_string(), Value::from(key.split.code()));
    row.insert("patient_id".to_string(), Value::from(key.patient_id));
    row.insert("study_id".to_string(), Value::from(key.study_id));
    row.insert("image_index".to_string(), Value::from(key.image_index));
    row.insert("view".to_string(), Value::from(key.view.code()));
    for (name, code) in LABEL_CATEGORIES.iter().zip(labels.codes()) {
        row.insert((*name).to_string(), Value::from(code.code()));
    }
    row.insert("path".to_string(), Value::from(key.to_path()));
    row
}

/// Parsed destination identifier of the form `project:dataset.table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDest {
    pub project: String,
    pub dataset: String,
    pub table: String,
}

impl TableDest {
    /// Default local file name standing in for the remote destination.
    #[must_use]
    pub fn default_file_name(&self) -> String {
        format!("{}.{}.{}.jsonl", self.project, self.dataset, self.table)
    }
}

impl FromStr for TableDest {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<TableDest> {
        let Some((project, rest)) = s.split_once(':') else {
            bail!("table destination must be of the form `project:dataset.table`, got {s:?}");
        };
        let Some((dataset, table)) = rest.split_once('.') else {
            bail!("table destination must be of the form `project:dataset.table`, got {s:?}");
        };
        if project.is_empty() || dataset.is_empty() || table.is_empty() {
            bail!("table destination has an empty component: {s:?}");
        }
        Ok(TableDest {
            project: project.to_string(),
            dataset: dataset.to_string(),
            table: table.to_string(),
        })
    }
}

/// External tabular-store contract: replace the destination's contents with
/// the given rows.
pub trait TableWriter: Send + Sync {
    /// Truncate the destination and write every row.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be (re)created or a row
    /// fails to serialize or write.
    fn write_truncate(&self, rows: &[TableRow]) -> Result<usize>;
}

/// JSON Lines implementation of [`TableWriter`].
pub struct JsonlTableWriter {
    path: PathBuf,
}

impl JsonlTableWriter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonlTableWriter { path: path.into() }
    }

    /// Destination file path.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TableWriter for JsonlTableWriter {
    fn write_truncate(&self, rows: &[TableRow]) -> Result<usize> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
        }
        // File::create truncates any previous run's contents.
        let file =
            File::create(&self.path).with_context(|| format!("create {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        for (i, row) in rows.iter().enumerate() {
            serde_json::to_writer(&mut writer, row)
                .with_context(|| format!("serialize table row #{}", i + 1))?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(rows.len())
    }
}
