//! Identifier codec: the bidirectional mapping between canonical relative
//! file paths and structured composite keys.
//!
//! Image files in the raw distribution live at paths of the form
//! `{split}/p{patient}/s{study}/view{index}_{view}.jpg`, e.g.
//! `train/p1/s10/view1_frontal.jpg`. [`ImageKey::from_path`] decodes such a
//! path into an [`ImageKey`]; [`ImageKey::to_path`] re-renders the canonical
//! path from the key. The two are exact inverses for all well-formed inputs.
//!
//! The integer codes assigned by [`Split::code`] and [`View::code`] are a
//! versioned contract: they are embedded in table rows and training records,
//! and [`View`] codes double as partition indices. Changing the order
//! invalidates previously written artifacts.

use crate::error::DataError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Grammar for canonical image paths. Numeric segments are unsigned decimal;
/// the split and view alternations are the closed enumeration token sets.
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(train|valid|other)/p([0-9]+)/s([0-9]+)/view([0-9]+)_(frontal|lateral|other)\.jpg$")
        .expect("valid key path regex")
});

/// Dataset split an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Split {
    Train,
    Valid,
    Other,
}

impl Split {
    /// All splits, in code order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Valid, Split::Other];

    /// Fixed integer code for this split.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Split::Train => 0,
            Split::Valid => 1,
            Split::Other => 2,
        }
    }

    /// Canonical path token for this split.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Other => "other",
        }
    }

    /// Decode a canonical token back into a split.
    #[must_use]
    pub fn from_token(s: &str) -> Option<Split> {
        Split::ALL.into_iter().find(|split| split.token() == s)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Acquisition view of an image.
///
/// The code order also fixes the partition layout of the sharded-record
/// output: partition `i` holds the keys whose view has code `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Frontal,
    Lateral,
    Other,
}

impl View {
    /// All views, in code (= partition) order.
    pub const ALL: [View; 3] = [View::Frontal, View::Lateral, View::Other];

    /// Fixed integer code for this view.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            View::Frontal => 0,
            View::Lateral => 1,
            View::Other => 2,
        }
    }

    /// Canonical path token for this view.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            View::Frontal => "frontal",
            View::Lateral => "lateral",
            View::Other => "other",
        }
    }

    /// Decode a canonical token back into a view.
    #[must_use]
    pub fn from_token(s: &str) -> Option<View> {
        View::ALL.into_iter().find(|view| view.token() == s)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Composite key uniquely identifying one acquisition.
///
/// Two records carrying equal keys refer to the same physical image; the key
/// is the join attribute between the image and label streams. Keys are
/// immutable value types -- they are only ever produced by decoding a path
/// or a label row, never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageKey {
    pub split: Split,
    pub patient_id: u64,
    pub study_id: u64,
    pub image_index: u64,
    pub view: View,
}

impl ImageKey {
    /// Decode a canonical relative path into a key.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MalformedPath`] if any segment fails its lexical
    /// class: a missing segment, a non-numeric id, an unrecognized split or
    /// view token, or a numeric id too large for `u64`.
    pub fn from_path(path: &str) -> Result<ImageKey, DataError> {
        let malformed = || DataError::MalformedPath {
            path: path.to_string(),
        };
        let caps = PATH_RE.captures(path).ok_or_else(malformed)?;
        let num = |i: usize| caps[i].parse::<u64>().map_err(|_| malformed());
        Ok(ImageKey {
            split: Split::from_token(&caps[1]).ok_or_else(malformed)?,
            patient_id: num(2)?,
            study_id: num(3)?,
            image_index: num(4)?,
            view: View::from_token(&caps[5]).ok_or_else(malformed)?,
        })
    }

    /// Render the canonical relative path for this key.
    ///
    /// Exact inverse of [`ImageKey::from_path`]: the split and view tokens
    /// are re-rendered from the enumerations, never echoed from input text.
    #[must_use]
    pub fn to_path(&self) -> String {
        format!(
            "{}/p{}/s{}/view{}_{}.jpg",
            self.split.token(),
            self.patient_id,
            self.study_id,
            self.image_index,
            self.view.token()
        )
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
