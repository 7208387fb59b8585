//! # cxr-prep
//!
//! Prepares the raw MIMIC-CXR distribution -- tar'd JPG images plus a
//! gzip'd CSV of CheXpert labels -- into three aligned, consumer-ready
//! artifacts:
//!
//! 1. **A tabular record set** - one flat row per labelled image (JSON
//!    Lines, standing in for a remote table store)
//! 2. **An extracted JPG tree** - one file per image at its canonical
//!    `{split}/p{patient}/s{study}/view{index}_{view}.jpg` path
//! 3. **Sharded training records** - length-prefixed binary records,
//!    partitioned by acquisition view (`frontal`, `lateral`)
//!
//! ## Quick Start
//!
//! ```ignore
//! use cxr_prep::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let config = PrepConfig {
//!     input_archives: vec!["raw/images-*.tar".to_string()],
//!     input_labels: "raw/labels.csv.gz".into(),
//!     output_jpg_dir: Some("out/jpgs".into()),
//!     output_table: Some("proj:cxr.labels".parse()?),
//!     output_shard_dir: Some("out/records".into()),
//!     output_image_shape: None,
//!     shard_count: 4,
//! };
//!
//! let table = JsonlTableWriter::new("out/labels.jsonl");
//! let summary = run(&config, &DirExtractor, None, Some(&table))?;
//! println!("{} frontal records", summary.frontal_records);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Identifier codec
//!
//! [`ImageKey`] is the composite key (split, patient, study, image index,
//! view) that uniquely identifies one acquisition. It decodes from and
//! re-renders to the canonical relative path; the two directions are exact
//! inverses. The enumeration codes of [`Split`] and [`View`] are a
//! versioned contract baked into every output artifact.
//!
//! ### Join barrier
//!
//! Images and label rows arrive as two unordered collections. [`cogroup`]
//! groups them by key, [`JoinedGroup::into_pair`] enforces the strict
//! one-image/one-label cardinality, and [`partition_by_view`] fans the
//! joined groups out into disjoint per-view partitions.
//!
//! ### Fan-out independence
//!
//! The table sink consumes label records and the blob sink consumes image
//! records, both *before* the join; only the shard sink waits for it. A
//! cardinality failure at one key never blocks the pre-join branches.
//!
//! ### Fail-loud decoding
//!
//! Malformed paths, unknown CheXpert encodings, broken join cardinality,
//! and structurally invalid records all raise a typed [`DataError`] at the
//! point of detection. Nothing is skipped, defaulted, or best-effort
//! paired -- silently accepting bad joins would corrupt the delivered
//! dataset.
//!
//! ## Module Overview
//!
//! - [`keys`] - path <-> composite-key codec
//! - [`labels`] - label-table line parser and CheXpert code enumeration
//! - [`join`] - grouping join, cardinality check, view partitioning
//! - [`record`] - fixed-schema training-record builder
//! - [`sinks`] - table, blob, and (via [`io::shard`]) shard adapters
//! - [`extract`] - archive-extractor and image-resizer collaborator traits
//! - [`pipeline`] - the end-to-end driver
//! - [`config`] - run configuration and pre-flight validation
//! - [`testing`] - in-memory fakes and fixture builders

pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod join;
pub mod keys;
pub mod labels;
pub mod pipeline;
pub mod record;
pub mod sinks;
pub mod testing;

// General re-exports
pub use config::{ImageShape, PrepConfig};
pub use error::DataError;
pub use extract::{ArchiveExtractor, DirExtractor, ImageResizer};
pub use io::glob::{expand_glob, expand_glob_required};
pub use io::shard::{SHARD_SUFFIX, read_shard, shard_file_name, write_shards};
pub use join::{ImageRecord, JoinedGroup, LabelRecord, cogroup, partition_by_view};
pub use keys::{ImageKey, Split, View};
pub use labels::{LABEL_CATEGORIES, LABEL_COLUMNS, LabelCode, LabelVector, parse_label_line};
pub use pipeline::{RunSummary, SHARD_VIEWS, read_label_records, run};
pub use record::TrainingRecord;
pub use sinks::blob::BlobSink;
pub use sinks::table::{JsonlTableWriter, TABLE_FIELDS, TableDest, TableRow, TableWriter, table_row};
