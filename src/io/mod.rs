//! I/O building blocks: glob expansion for input archive patterns,
//! gzip-transparent readers for the label table, and the sharded
//! training-record writer.

pub mod compression;
pub mod glob;
pub mod shard;
