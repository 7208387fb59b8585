//! Gzip-transparent reading for the label table.
//!
//! The CheXpert label CSV is distributed gzip'd, but nothing stops an
//! operator from pointing the pipeline at an already-decompressed copy.
//! [`open_reader`] detects gzip by file extension first (fast path) and
//! falls back to the two magic bytes at the start of the stream, so both
//! forms read identically. Uncompressed files pass through a plain
//! buffered reader.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Gzip file extensions, lowercase, with leading dot.
const GZIP_EXTENSIONS: [&str; 2] = [".gz", ".gzip"];

/// Gzip stream signature.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open a file for reading, transparently decompressing gzip content.
///
/// Detection strategy:
/// 1. file extension (`.gz`, `.gzip`), case-insensitive;
/// 2. magic bytes at the start of the stream;
/// 3. otherwise the file is returned as a plain buffered reader.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_reader(path: impl AsRef<Path>) -> Result<Box<dyn Read>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;

    let name = path.to_string_lossy().to_lowercase();
    if GZIP_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        return Ok(Box::new(GzDecoder::new(BufReader::new(file))));
    }

    let mut reader = BufReader::new(file);
    if peek_is_gzip(&mut reader) {
        return Ok(Box::new(GzDecoder::new(reader)));
    }
    Ok(Box::new(reader))
}

/// Peek at the buffered stream head without advancing it.
fn peek_is_gzip<R: BufRead>(reader: &mut R) -> bool {
    reader
        .fill_buf()
        .map(|buf| buf.starts_with(&GZIP_MAGIC))
        .unwrap_or(false)
}
