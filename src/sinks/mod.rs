//! Output sink adapters.
//!
//! Three independent, optionally-enabled consumers: the tabular-row emitter
//! (label records, pre-join), the raw-blob tree writer (image records,
//! pre-join), and the sharded training-record writer (post-join, via
//! [`crate::io::shard`]). Each sink is append-only from the pipeline's
//! point of view within a run; the table sink truncates its destination at
//! the start of every run.

pub mod blob;
pub mod table;
