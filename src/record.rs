//! Fixed-schema training records built from successfully joined groups.
//!
//! A [`TrainingRecord`] embeds the raw image bytes under `jpg_bytes`, the
//! key's integer/enumeration fields under their designated names, and each
//! label-vector entry under its category name. Field names and order match
//! [`LABEL_CATEGORIES`](crate::labels::LABEL_CATEGORIES) and are part of the
//! output contract.
//!
//! Records serialize to postcard frames; the shard writer
//! ([`crate::io::shard`]) length-prefixes them into `.tfrecord` shard files.

use crate::error::DataError;
use crate::keys::ImageKey;
use crate::labels::{LABEL_CATEGORIES, LabelVector};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One serialized training example: image bytes + key fields + label codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Raw encoded image bytes.
    pub jpg_bytes: Vec<u8>,
    /// Split enumeration code.
    pub dataset: u8,
    pub patient_id: u64,
    pub study_id: u64,
    pub image_index: u64,
    /// View enumeration code.
    pub view: u8,
    pub no_finding: u8,
    pub enlarged_cardiomediastinum: u8,
    pub cardiomegaly: u8,
    pub airspace_opacity: u8,
    pub lung_lesion: u8,
    pub edema: u8,
    pub consolidation: u8,
    pub pneumonia: u8,
    pub atelectasis: u8,
    pub pneumothorax: u8,
    pub pleural_effusion: u8,
    pub pleural_other: u8,
    pub fracture: u8,
    pub support_devices: u8,
}

impl TrainingRecord {
    /// Build a record from one joined (image bytes, label vector) pair.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::RecordBuild`] if the image buffer is empty or
    /// the label vector's length does not match the category count. Both
    /// indicate an upstream contract violation that must not be masked.
    pub fn build(
        key: &ImageKey,
        jpg_bytes: Vec<u8>,
        labels: &LabelVector,
    ) -> Result<TrainingRecord, DataError> {
        if jpg_bytes.is_empty() {
            return Err(DataError::RecordBuild {
                key: *key,
                reason: "empty jpg byte buffer".to_string(),
            });
        }
        if labels.len() != LABEL_CATEGORIES.len() {
            return Err(DataError::RecordBuild {
                key: *key,
                reason: format!(
                    "label vector has {} entries, expected {}",
                    labels.len(),
                    LABEL_CATEGORIES.len()
                ),
            });
        }

        let c = |i: usize| labels.codes()[i].code();
        Ok(TrainingRecord {
            jpg_bytes,
            dataset: key.split.code(),
            patient_id: key.patient_id,
            study_id: key.study_id,
            image_index: key.image_index,
            view: key.view.code(),
            no_finding: c(0),
            enlarged_cardiomediastinum: c(1),
            cardiomegaly: c(2),
            airspace_opacity: c(3),
            lung_lesion: c(4),
            edema: c(5),
            consolidation: c(6),
            pneumonia: c(7),
            atelectasis: c(8),
            pneumothorax: c(9),
            pleural_effusion: c(10),
            pleural_other: c(11),
            fracture: c(12),
            support_devices: c(13),
        })
    }

    /// Serialize this record into a postcard byte frame.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).context("serialize training record")
    }

    /// Deserialize a record from a postcard byte frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame does not decode into a record.
    pub fn from_bytes(bytes: &[u8]) -> Result<TrainingRecord> {
        postcard::from_bytes(bytes).context("deserialize training record")
    }
}
