//! `cxr-prep`: load the raw MIMIC-CXR dataset into consumer-ready outputs.
//!
//! Takes a set of archive patterns and a (optionally gzip'd) label CSV, and
//! writes any combination of a label table, an extracted JPG tree, and
//! sharded per-view training records. All outputs are optional and enabled
//! by passing the corresponding destination argument.

use anyhow::Result;
use clap::Parser;
use cxr_prep::{
    DirExtractor, ImageShape, JsonlTableWriter, PrepConfig, TableDest, TableWriter, run,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Patterns specifying the paths to the input image archives.
    #[arg(long, required = true, num_args = 1..)]
    input_tars: Vec<String>,

    /// Path to the (optionally gzip'd) CSV that contains the image labels.
    #[arg(long)]
    input_csv: PathBuf,

    /// Directory to output the extracted JPG tree to.
    #[arg(long)]
    output_jpg_dir: Option<PathBuf>,

    /// Tabular destination of the form `project:dataset.table`. The
    /// destination is overwritten if it already exists.
    #[arg(long)]
    output_table: Option<String>,

    /// Directory to output the sharded training records to.
    #[arg(long)]
    output_record_dir: Option<PathBuf>,

    /// Dimensions to resize images to: 2 (HW) or 3 (HWC) integers. Images
    /// are not resized when omitted.
    #[arg(long, num_args = 2..=3)]
    output_image_shape: Option<Vec<u32>>,

    /// Number of shard files per view partition.
    #[arg(long, default_value_t = 1)]
    shards: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::init();

    let output_table = args
        .output_table
        .as_deref()
        .map(str::parse::<TableDest>)
        .transpose()?;
    let output_image_shape = args
        .output_image_shape
        .as_deref()
        .map(ImageShape::from_dims)
        .transpose()?;

    let config = PrepConfig {
        input_archives: args.input_tars,
        input_labels: args.input_csv,
        output_jpg_dir: args.output_jpg_dir,
        output_table: output_table.clone(),
        output_shard_dir: args.output_record_dir,
        output_image_shape,
        shard_count: args.shards,
    };

    let table_writer = output_table.map(|dest| JsonlTableWriter::new(dest.default_file_name()));
    let summary = run(
        &config,
        &DirExtractor,
        None,
        table_writer.as_ref().map(|w| w as &dyn TableWriter),
    )?;
    info!("run complete: {summary:?}");
    Ok(())
}
