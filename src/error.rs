//! Data-integrity error taxonomy for the preparation pipeline.
//!
//! Every variant marks a hard violation of the dataset's contracts: a path
//! that does not match the key grammar, a CheXpert code outside the four
//! defined encodings, a key whose image/label contributions deviate from the
//! expected one-of-each, or a joined payload that fails the record builder's
//! structural checks. None of these are recovered locally -- they propagate
//! to the caller, which decides whether to retry the offending record.

use crate::keys::ImageKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A per-record data-integrity failure.
///
/// Carried payloads identify the offending record so operators can locate it
/// in the source distribution without re-running the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataError {
    /// A file path did not match the
    /// `{split}/p{patient}/s{study}/view{index}_{view}.jpg` grammar.
    MalformedPath {
        /// The raw path as it appeared in the archive or label table.
        path: String,
    },
    /// A label-table field held something other than the four defined
    /// CheXpert encodings (empty, `1.0`, `-1.0`, `0.0`).
    UnrecognizedLabelCode {
        /// The raw field text that failed to decode.
        raw: String,
    },
    /// A label-table line had the wrong number of columns.
    MalformedLabelRow {
        /// Number of columns observed on the line.
        columns: usize,
    },
    /// A key's grouped contributions deviated from exactly one image and
    /// exactly one label row.
    JoinCardinality {
        /// The key whose group failed the check.
        key: ImageKey,
        /// Observed image count for the key.
        jpgs: usize,
        /// Observed label-row count for the key.
        rows: usize,
    },
    /// A joined payload failed the training-record builder's structural
    /// checks (empty image buffer, label vector of the wrong length).
    RecordBuild {
        /// The key of the record that could not be built.
        key: ImageKey,
        /// What the builder rejected.
        reason: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::MalformedPath { path } => {
                write!(f, "malformed image path: {path:?}")
            }
            DataError::UnrecognizedLabelCode { raw } => {
                write!(f, "unrecognized chexpert encoding: {raw:?}")
            }
            DataError::MalformedLabelRow { columns } => {
                write!(f, "label row has {columns} columns, expected {}", crate::labels::LABEL_COLUMNS)
            }
            DataError::JoinCardinality { key, jpgs, rows } => {
                write!(
                    f,
                    "{jpgs} JPG files matched to {rows} label rows for {}",
                    key.to_path()
                )
            }
            DataError::RecordBuild { key, reason } => {
                write!(f, "cannot build record for {}: {reason}", key.to_path())
            }
        }
    }
}

impl std::error::Error for DataError {}
