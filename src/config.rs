//! Run configuration and its pre-flight validation.
//!
//! Configuration errors are detected before any record processing begins:
//! a missing archive pattern, a pattern matching nothing, a bad image-shape
//! arity, or a zero shard count all fail the run up front.

use crate::io::glob::expand_glob;
use crate::sinks::table::TableDest;
use anyhow::{Result, bail, ensure};
use std::path::PathBuf;

/// Target shape for image resizing: height x width, optionally x channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageShape {
    Hw { height: u32, width: u32 },
    Hwc { height: u32, width: u32, channels: u32 },
}

impl ImageShape {
    /// Build a shape from raw dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly 2 (HW) or 3 (HWC) positive integers
    /// are given.
    pub fn from_dims(dims: &[u32]) -> Result<ImageShape> {
        ensure!(
            dims.iter().all(|&d| d > 0),
            "image shape dimensions must be positive, got {dims:?}"
        );
        match dims {
            &[height, width] => Ok(ImageShape::Hw { height, width }),
            &[height, width, channels] => Ok(ImageShape::Hwc {
                height,
                width,
                channels,
            }),
            _ => bail!(
                "2 (HW) or 3 (HWC) integers are required for the output image shape, got {}",
                dims.len()
            ),
        }
    }
}

/// Full configuration surface of one preparation run.
///
/// Each output is independently optional; a run with no outputs enabled is
/// legal and only validates its inputs.
#[derive(Debug, Clone)]
pub struct PrepConfig {
    /// Glob patterns naming the input image archives. At least one pattern,
    /// and at least one match overall, is required.
    pub input_archives: Vec<String>,
    /// Path to the (optionally gzip'd) label CSV.
    pub input_labels: PathBuf,
    /// Root of the extracted JPG tree, if enabled.
    pub output_jpg_dir: Option<PathBuf>,
    /// Tabular destination, if enabled.
    pub output_table: Option<TableDest>,
    /// Directory for sharded training records, if enabled.
    pub output_shard_dir: Option<PathBuf>,
    /// Target image shape; `None` leaves image bytes untouched.
    pub output_image_shape: Option<ImageShape>,
    /// Shard files per view partition.
    pub shard_count: usize,
}

impl PrepConfig {
    /// Check the parts of the configuration that need no filesystem access.
    ///
    /// # Errors
    ///
    /// Returns an error if no archive pattern was given or the shard count
    /// is zero.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.input_archives.is_empty(),
            "at least one input archive pattern is required"
        );
        ensure!(self.shard_count > 0, "shard count must be at least 1");
        Ok(())
    }

    /// Expand the archive patterns into concrete paths, failing fast when
    /// nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid or the union of all matches
    /// is empty.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for pattern in &self.input_archives {
            paths.extend(expand_glob(pattern)?);
        }
        if paths.is_empty() {
            bail!(
                "no matching input archives were found for {:?}",
                self.input_archives
            );
        }
        Ok(paths)
    }
}
