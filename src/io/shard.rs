//! Sharded training-record files.
//!
//! One partition (e.g. `frontal`) writes to a set of shard files named
//! `{name}-{index:05}-of-{total:05}.tfrecord` under the output directory.
//! Each shard holds a sequence of length-prefixed postcard frames: an
//! 8-byte little-endian length followed by that many record bytes.
//!
//! Records are split across shards in contiguous chunks and shard buffers
//! are serialized in parallel, but files are always written in index order
//! so the on-disk layout is deterministic for a given input. Empty
//! partitions still produce their full (empty) shard set.

use crate::record::TrainingRecord;
use anyhow::{Context, Result, bail, ensure};
use rayon::prelude::*;
use std::fs::{File, create_dir_all, read};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File-name suffix of every shard file.
pub const SHARD_SUFFIX: &str = ".tfrecord";

/// Render the canonical shard file name for a partition.
#[must_use]
pub fn shard_file_name(name: &str, index: usize, total: usize) -> String {
    format!("{name}-{index:05}-of-{total:05}{SHARD_SUFFIX}")
}

/// Write a partition's records as `shards` files under `dir`.
///
/// Returns the shard paths in index order.
///
/// # Errors
///
/// Returns an error if `shards` is zero, the directory cannot be created,
/// or any record fails to serialize or write.
pub fn write_shards(
    dir: impl AsRef<Path>,
    name: &str,
    records: &[TrainingRecord],
    shards: usize,
) -> Result<Vec<PathBuf>> {
    if shards == 0 {
        bail!("shard count must be at least 1");
    }
    let dir = dir.as_ref();
    create_dir_all(dir).with_context(|| format!("mkdir -p {}", dir.display()))?;

    let chunk = records.len().div_ceil(shards).max(1);
    let slices: Vec<&[TrainingRecord]> = (0..shards)
        .map(|i| {
            let start = (i * chunk).min(records.len());
            let end = ((i + 1) * chunk).min(records.len());
            &records[start..end]
        })
        .collect();

    // Serialize shard buffers in parallel, then write in index order.
    let buffers: Vec<Vec<u8>> = slices
        .into_par_iter()
        .map(|slice| {
            let mut buf = Vec::new();
            for record in slice {
                let bytes = record.to_bytes()?;
                buf.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
                buf.extend_from_slice(&bytes);
            }
            Ok(buf)
        })
        .collect::<Result<_>>()?;

    let mut paths = Vec::with_capacity(shards);
    for (i, buf) in buffers.iter().enumerate() {
        let path = dir.join(shard_file_name(name, i, shards));
        let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(buf)?;
        writer.flush()?;
        paths.push(path);
    }
    Ok(paths)
}

/// Read every record out of one shard file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a frame is truncated, or a
/// frame fails to deserialize.
pub fn read_shard(path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>> {
    let path = path.as_ref();
    let data = read(path).with_context(|| format!("read {}", path.display()))?;

    let mut records = Vec::new();
    let mut offset = 0usize;
    while offset < data.len() {
        ensure!(
            offset + 8 <= data.len(),
            "truncated frame header in {}",
            path.display()
        );
        let header: [u8; 8] = data[offset..offset + 8]
            .try_into()
            .context("read frame header")?;
        let len = usize::try_from(u64::from_le_bytes(header)).context("frame length overflow")?;
        offset += 8;
        ensure!(
            offset + len <= data.len(),
            "truncated frame body in {}",
            path.display()
        );
        records.push(TrainingRecord::from_bytes(&data[offset..offset + len])?);
        offset += len;
    }
    Ok(records)
}
