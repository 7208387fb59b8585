//! Label record parsing: one raw CSV line -> (key, label vector).
//!
//! The label table ships as a gzip'd CSV with columns `path`, `view`, then
//! one column per CheXpert finding category in the fixed order of
//! [`LABEL_CATEGORIES`]. The `view` column is informational only and is
//! never trusted over the view implied by the path -- in well-formed data
//! the two are redundant, and the path is treated as ground truth.
//!
//! Each category field holds one of exactly four raw encodings, mapped by
//! [`LabelCode::from_chexpert`]. Any other text is a hard validation
//! failure, never coerced to a default.

use crate::error::DataError;
use crate::keys::ImageKey;
use serde::{Deserialize, Serialize};

/// CheXpert finding categories, in table column order.
///
/// Length and order are a versioned contract: they fix the label-vector
/// layout, the training-record field order, and the table schema.
pub const LABEL_CATEGORIES: [&str; 14] = [
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
];

/// Expected column count of a label-table line: path, view, 14 categories.
pub const LABEL_COLUMNS: usize = 2 + LABEL_CATEGORIES.len();

/// One categorical finding code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelCode {
    NotMentioned,
    Positive,
    Uncertain,
    Negative,
}

impl LabelCode {
    /// All codes, in code order.
    pub const ALL: [LabelCode; 4] = [
        LabelCode::NotMentioned,
        LabelCode::Positive,
        LabelCode::Uncertain,
        LabelCode::Negative,
    ];

    /// Fixed integer code for this label value.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            LabelCode::NotMentioned => 0,
            LabelCode::Positive => 1,
            LabelCode::Uncertain => 2,
            LabelCode::Negative => 3,
        }
    }

    /// Decode one raw CheXpert field.
    ///
    /// Accepts exactly four encodings: the empty string (not mentioned),
    /// `"1.0"` (positive), `"-1.0"` (uncertain), and `"0.0"` (negative).
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnrecognizedLabelCode`] naming the raw text for
    /// any other input.
    pub fn from_chexpert(raw: &str) -> Result<LabelCode, DataError> {
        match raw {
            "" => Ok(LabelCode::NotMentioned),
            "1.0" => Ok(LabelCode::Positive),
            "-1.0" => Ok(LabelCode::Uncertain),
            "0.0" => Ok(LabelCode::Negative),
            other => Err(DataError::UnrecognizedLabelCode {
                raw: other.to_string(),
            }),
        }
    }
}

/// Ordered sequence of finding codes, one per [`LABEL_CATEGORIES`] entry.
///
/// The vector is deliberately length-checked downstream (by the record
/// builder) rather than at construction, mirroring where the structural
/// contract actually bites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelVector(Vec<LabelCode>);

impl LabelVector {
    #[must_use]
    pub fn new(codes: Vec<LabelCode>) -> Self {
        LabelVector(codes)
    }

    /// The codes in category order.
    #[must_use]
    pub fn codes(&self) -> &[LabelCode] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Decode one raw label-table line into a keyed label record.
///
/// Splitting honors CSV quoting rules (a line may contain quoted fields).
/// The key -- including its view -- is derived from the path field alone;
/// the informational view column is ignored.
///
/// # Errors
///
/// * [`DataError::MalformedLabelRow`] if the line does not split into
///   exactly [`LABEL_COLUMNS`] fields.
/// * [`DataError::MalformedPath`] if the path field fails the key grammar.
/// * [`DataError::UnrecognizedLabelCode`] if any category field is outside
///   the four defined encodings.
pub fn parse_label_line(line: &str) -> Result<(ImageKey, LabelVector), DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    let got = reader
        .read_record(&mut record)
        .map_err(|_| DataError::MalformedLabelRow { columns: 0 })?;
    if !got || record.len() != LABEL_COLUMNS {
        return Err(DataError::MalformedLabelRow {
            columns: if got { record.len() } else { 0 },
        });
    }

    let key = ImageKey::from_path(&record[0])?;
    // record[1] is the view column, already captured within the key.
    let codes = record
        .iter()
        .skip(2)
        .map(LabelCode::from_chexpert)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((key, LabelVector::new(codes)))
}
