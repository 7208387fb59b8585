//! Collaborator boundaries for archive extraction and image resizing.
//!
//! The pipeline core never unpacks archive formats or touches pixel
//! buffers itself; both concerns live behind traits so the hosting
//! environment can plug in its own implementations. [`DirExtractor`] is the
//! bundled extractor for archives that have already been unpacked into a
//! directory tree; it is also what the `cxr-prep` binary runs with.

use crate::config::ImageShape;
use crate::io::glob::expand_glob;
use anyhow::{Context, Result};
use std::fs::read;
use std::path::Path;

/// Produces the `(entry path, entry bytes)` sequence of one archive.
///
/// Implementations must be pure with respect to the archive path: calling
/// [`entries`](ArchiveExtractor::entries) twice for the same path yields
/// the same sequence, so the hosting engine may safely re-run an archive.
pub trait ArchiveExtractor: Send + Sync {
    /// List every image entry in the archive as a relative path plus its
    /// raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or an entry cannot
    /// be read.
    fn entries(&self, archive: &Path) -> Result<Vec<(String, Vec<u8>)>>;
}

/// Re-encodes image bytes to a target shape.
///
/// Optional collaborator: when no output shape is configured, image bytes
/// pass through the pipeline unchanged and no resizer is consulted.
pub trait ImageResizer: Send + Sync {
    /// Return re-encoded bytes of the requested shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded or re-encoded.
    fn resize(&self, jpg_bytes: Vec<u8>, shape: &ImageShape) -> Result<Vec<u8>>;
}

/// Extractor for archives already unpacked into a directory tree.
///
/// The "archive" path is taken as a directory root; every `.jpg` beneath it
/// becomes an entry whose path is relative to that root, matching the entry
/// paths a tar-based extractor would produce.
pub struct DirExtractor;

impl ArchiveExtractor for DirExtractor {
    fn entries(&self, archive: &Path) -> Result<Vec<(String, Vec<u8>)>> {
        let pattern = archive.join("**").join("*.jpg");
        let files = expand_glob(&pattern.to_string_lossy())?;

        files
            .into_iter()
            .map(|path| {
                let rel = path
                    .strip_prefix(archive)
                    .with_context(|| format!("relativize {}", path.display()))?
                    .to_string_lossy()
                    .replace('\\', "/");
                let bytes = read(&path).with_context(|| format!("read {}", path.display()))?;
                Ok((rel, bytes))
            })
            .collect()
    }
}
