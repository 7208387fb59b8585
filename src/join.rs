//! Grouping join and view partitioning.
//!
//! The join is the one genuinely stateful stage of the pipeline: two
//! unordered record collections -- extracted images and parsed label rows --
//! are accumulated into a multi-map keyed by [`ImageKey`], regardless of
//! arrival order or which stream contributed first. Once both streams have
//! been fully observed, each group is cardinality-checked (exactly one image
//! and one label row per key) and routed to the partition named by its
//! view's enumeration code.
//!
//! A cardinality failure is scoped to its key: callers consuming groups
//! key-by-key can surface the error for the offending key without touching
//! unrelated keys or the pre-join output branches.

use crate::error::DataError;
use crate::keys::{ImageKey, View};
use crate::labels::LabelVector;
use std::collections::HashMap;

/// An image keyed by its decoded path, bytes still in source encoding.
pub type ImageRecord = (ImageKey, Vec<u8>);

/// A parsed label-table row keyed by its decoded path field.
pub type LabelRecord = (ImageKey, LabelVector);

/// All contributions observed for one key: the multiset of image buffers and
/// the multiset of label rows.
#[derive(Debug, Clone, Default)]
pub struct JoinedGroup {
    pub jpgs: Vec<Vec<u8>>,
    pub rows: Vec<LabelVector>,
}

impl JoinedGroup {
    /// Enforce the (1, 1) join cardinality and unwrap the group into its
    /// single (image bytes, label vector) pair.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::JoinCardinality`] carrying the key and both
    /// observed counts whenever either side's count differs from one --
    /// zero, or more than one. No best-effort pairing is attempted.
    pub fn into_pair(mut self, key: &ImageKey) -> Result<(Vec<u8>, LabelVector), DataError> {
        let (jpgs, rows) = (self.jpgs.len(), self.rows.len());
        if jpgs == 1
            && rows == 1
            && let (Some(jpg), Some(row)) = (self.jpgs.pop(), self.rows.pop())
        {
            return Ok((jpg, row));
        }
        Err(DataError::JoinCardinality {
            key: *key,
            jpgs,
            rows,
        })
    }
}

/// Group two unordered record collections by key.
///
/// Pure accumulation: no ordering is assumed within either collection, and
/// feeding the same collections again yields an identical grouping. Keys
/// present in only one stream still appear in the result (with an empty
/// other side), so missing counterparts surface later as cardinality errors
/// rather than silently vanishing.
#[must_use]
pub fn cogroup(
    images: Vec<ImageRecord>,
    labels: Vec<LabelRecord>,
) -> HashMap<ImageKey, JoinedGroup> {
    let mut groups: HashMap<ImageKey, JoinedGroup> = HashMap::new();
    for (key, bytes) in images {
        groups.entry(key).or_default().jpgs.push(bytes);
    }
    for (key, row) in labels {
        groups.entry(key).or_default().rows.push(row);
    }
    groups
}

/// Split grouped keys into disjoint partitions by view.
///
/// Partition `i` receives exactly the keys whose `view.code() == i`; the
/// partition count equals the size of the view enumeration. Because the
/// view enum is closed and validated upstream by the identifier codec,
/// every key lands in exactly one pre-declared slot -- there is no
/// catch-all, and nothing to range-check here.
#[must_use]
pub fn partition_by_view(
    groups: HashMap<ImageKey, JoinedGroup>,
) -> Vec<Vec<(ImageKey, JoinedGroup)>> {
    let mut parts: Vec<Vec<(ImageKey, JoinedGroup)>> =
        (0..View::ALL.len()).map(|_| Vec::new()).collect();
    for (key, group) in groups {
        parts[key.view.code() as usize].push((key, group));
    }
    parts
}
