//! The join-partition-fan-out driver.
//!
//! Data flow:
//!
//! ```text
//! label CSV ──parse──▶ label records ──┬──▶ table sink          (pre-join)
//!                                      │
//! archives ──extract──▶ image records ─┼──▶ blob sink           (pre-join)
//!                                      │
//!                                      └──▶ cogroup ─▶ (1,1) check
//!                                             ─▶ partition by view
//!                                             ─▶ build records ─▶ shards
//! ```
//!
//! Every per-record transform is a pure function of its input, so records
//! parse and extract under rayon with no shared mutable state; the grouping
//! barrier in [`crate::join`] is the only synchronization point. Errors
//! propagate -- no record is skipped, defaulted, or best-effort paired.

use crate::config::PrepConfig;
use crate::error::DataError;
use crate::extract::{ArchiveExtractor, ImageResizer};
use crate::io::compression::open_reader;
use crate::io::shard::write_shards;
use crate::join::{ImageRecord, LabelRecord, cogroup, partition_by_view};
use crate::keys::{ImageKey, View};
use crate::labels::parse_label_line;
use crate::record::TrainingRecord;
use crate::sinks::blob::BlobSink;
use crate::sinks::table::{TableRow, TableWriter, table_row};
use anyhow::{Context, Result, bail};
use log::{debug, info};
use rayon::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Views that feed the sharded-record sink. Keys in the remaining view
/// partitions still flow to the blob and table sinks, but no shard set is
/// written for them.
pub const SHARD_VIEWS: [View; 2] = [View::Frontal, View::Lateral];

/// Per-branch output counts of one completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub label_records: usize,
    pub image_records: usize,
    pub table_rows: usize,
    pub blobs_written: usize,
    pub frontal_records: usize,
    pub lateral_records: usize,
}

/// Execute one preparation run.
///
/// Branch enablement follows the configuration: the table branch needs both
/// `config.output_table` and a `table` writer, the blob branch needs
/// `config.output_jpg_dir`, and the shard branch needs
/// `config.output_shard_dir`. Image resizing needs both an output shape and
/// a `resizer`; configuring one without the other is a configuration error.
///
/// # Errors
///
/// Returns configuration errors before any record is processed, and
/// propagates every [`DataError`] raised while decoding, joining, or
/// building records.
pub fn run(
    config: &PrepConfig,
    extractor: &dyn ArchiveExtractor,
    resizer: Option<&dyn ImageResizer>,
    table: Option<&dyn TableWriter>,
) -> Result<RunSummary> {
    config.validate()?;
    if config.output_image_shape.is_some() && resizer.is_none() {
        bail!("an output image shape is configured but no image resizer was provided");
    }
    if config.output_table.is_some() && table.is_none() {
        bail!("a table destination is configured but no table writer was provided");
    }
    let inputs = config.resolve_inputs()?;
    info!("matched {} input archives", inputs.len());

    let labels = read_label_records(&config.input_labels)?;
    info!(
        "parsed {} label records from {}",
        labels.len(),
        config.input_labels.display()
    );

    let mut summary = RunSummary {
        label_records: labels.len(),
        ..RunSummary::default()
    };

    if let Some(writer) = table.filter(|_| config.output_table.is_some()) {
        let rows: Vec<TableRow> = labels.par_iter().map(|(key, v)| table_row(key, v)).collect();
        summary.table_rows = writer.write_truncate(&rows)?;
        info!("table sink: wrote {} rows", summary.table_rows);
    }

    if config.output_jpg_dir.is_none() && config.output_shard_dir.is_none() {
        return Ok(summary);
    }

    let mut images = extract_images(&inputs, extractor)?;
    if let (Some(resizer), Some(shape)) = (resizer, &config.output_image_shape) {
        images = images
            .into_par_iter()
            .map(|(key, bytes)| resizer.resize(bytes, shape).map(|resized| (key, resized)))
            .collect::<Result<Vec<_>>>()?;
        debug!("resized {} images to {shape:?}", images.len());
    }
    summary.image_records = images.len();
    info!("extracted {} image records", summary.image_records);

    if let Some(dir) = &config.output_jpg_dir {
        let sink = BlobSink::new(dir);
        images
            .par_iter()
            .try_for_each(|(key, bytes)| sink.write(key, bytes).map(|_| ()))?;
        summary.blobs_written = images.len();
        info!(
            "blob sink: wrote {} files under {}",
            summary.blobs_written,
            dir.display()
        );
    }

    if let Some(dir) = &config.output_shard_dir {
        let mut parts = partition_by_view(cogroup(images, labels));
        for view in SHARD_VIEWS {
            let groups = std::mem::take(&mut parts[view.code() as usize]);
            let records = groups
                .into_par_iter()
                .map(|(key, group)| {
                    let (jpg, row) = group.into_pair(&key)?;
                    TrainingRecord::build(&key, jpg, &row)
                })
                .collect::<Result<Vec<_>, DataError>>()?;
            write_shards(dir, view.token(), &records, config.shard_count)?;
            info!(
                "shard sink: wrote {} {view} records in {} shards",
                records.len(),
                config.shard_count
            );
            match view {
                View::Frontal => summary.frontal_records = records.len(),
                View::Lateral => summary.lateral_records = records.len(),
                View::Other => {}
            }
        }
    }

    Ok(summary)
}

/// Read and parse every label-table line below the header.
///
/// Lines are read sequentially (gzip streams have no random access) and
/// parsed in parallel; parsing is pure per line, so the resulting records
/// are identical no matter the worker count.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any line fails to decode.
pub fn read_label_records(path: &Path) -> Result<Vec<LabelRecord>> {
    let reader = open_reader(path)?;
    let mut lines = Vec::new();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.with_context(|| format!("read {} line {}", path.display(), i + 1))?;
        // First line is the header.
        if i == 0 || line.is_empty() {
            continue;
        }
        lines.push(line);
    }
    let records = lines
        .par_iter()
        .map(|line| parse_label_line(line))
        .collect::<Result<Vec<_>, DataError>>()?;
    Ok(records)
}

/// Extract and key every entry of every input archive.
fn extract_images(
    inputs: &[PathBuf],
    extractor: &dyn ArchiveExtractor,
) -> Result<Vec<ImageRecord>> {
    let per_archive = inputs
        .par_iter()
        .map(|path| {
            extractor
                .entries(path)
                .with_context(|| format!("extract {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let keyed = per_archive
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(path, bytes)| ImageKey::from_path(&path).map(|key| (key, bytes)))
        .collect::<Result<Vec<_>, DataError>>()?;
    Ok(keyed)
}
