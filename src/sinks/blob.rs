//! Raw-blob sink: the extracted JPG tree.
//!
//! Each image record is stored at its canonical path (via
//! [`ImageKey::to_path`]) under the configured output root, creating the
//! `{split}/p{patient}/s{study}/` directory structure as needed. This
//! branch consumes image records directly and does not wait for the label
//! join.

use crate::keys::ImageKey;
use anyhow::{Context, Result};
use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};

/// Writes image bytes into a directory tree keyed by canonical path.
pub struct BlobSink {
    root: PathBuf,
}

impl BlobSink {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        BlobSink { root: root.into() }
    }

    /// Durably store one image at its canonical path under the root.
    ///
    /// Returns the absolute destination path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created or the
    /// file cannot be written.
    pub fn write(&self, key: &ImageKey, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(key.to_path());
        if let Some(parent) = path.parent() {
            create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
        }
        write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Output root the sink writes beneath.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
