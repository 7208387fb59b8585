//! Test support: in-memory collaborators and fixture builders.
//!
//! Used by the integration suites under `tests/`; kept in the library so
//! downstream consumers can drive the pipeline against fakes as well.

use crate::extract::ArchiveExtractor;
use crate::keys::{ImageKey, Split, View};
use anyhow::{Result, bail};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory [`ArchiveExtractor`]: a fixed entry list per archive path.
#[derive(Debug, Default)]
pub struct FakeArchive {
    entries: HashMap<PathBuf, Vec<(String, Vec<u8>)>>,
}

impl FakeArchive {
    #[must_use]
    pub fn new() -> Self {
        FakeArchive::default()
    }

    /// Add one entry to the named archive.
    #[must_use]
    pub fn with_entry(
        mut self,
        archive: impl Into<PathBuf>,
        entry_path: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.entries
            .entry(archive.into())
            .or_default()
            .push((entry_path.into(), bytes.into()));
        self
    }
}

impl ArchiveExtractor for FakeArchive {
    fn entries(&self, archive: &Path) -> Result<Vec<(String, Vec<u8>)>> {
        match self.entries.get(archive) {
            Some(entries) => Ok(entries.clone()),
            None => bail!("unknown archive {}", archive.display()),
        }
    }
}

/// The key of `train/p1/s10/view1_frontal.jpg`.
#[must_use]
pub fn sample_key() -> ImageKey {
    ImageKey {
        split: Split::Train,
        patient_id: 1,
        study_id: 10,
        image_index: 1,
        view: View::Frontal,
    }
}

/// Render one raw label-table line from a path, an informational view
/// token, and the 14 raw category fields.
#[must_use]
pub fn label_line(path: &str, view: &str, codes: &[&str]) -> String {
    let mut fields = vec![path.to_string(), view.to_string()];
    fields.extend(codes.iter().map(|c| (*c).to_string()));
    fields.join(",")
}

/// 14 raw category fields starting `,1.0,-1.0,0.0` and padding with "not
/// mentioned" -- the encoding mix used throughout the test suites.
#[must_use]
pub fn sample_codes() -> Vec<&'static str> {
    let mut codes = vec!["", "1.0", "-1.0", "0.0"];
    codes.resize(14, "");
    codes
}
