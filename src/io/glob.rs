//! Glob expansion for input archive patterns.
//!
//! Input archives are named by one or more glob patterns (e.g.
//! `raw/train-*.tar`). Patterns expand to a sorted path list for
//! deterministic processing order. Matches may be files or directories --
//! a directory stands in for an already-extracted archive when paired with
//! [`DirExtractor`](crate::extract::DirExtractor).

use anyhow::{Context, Result, bail};
use glob::glob;
use std::path::PathBuf;

/// Expand a glob pattern into a sorted vector of matching paths.
///
/// Supports the standard syntax: `*`, `?`, `**`, and character sets. Zero
/// matches yields an empty vector, not an error; use
/// [`expand_glob_required`] when at least one match is mandatory.
///
/// # Errors
///
/// Returns an error if the pattern itself is invalid or a matched entry
/// cannot be read.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;

    let mut result = Vec::new();
    for entry in paths {
        let path =
            entry.with_context(|| format!("error reading glob entry for pattern: {pattern}"))?;
        result.push(path);
    }

    // Sort for deterministic order
    result.sort();

    Ok(result)
}

/// Expand a glob pattern, failing when nothing matches.
///
/// # Errors
///
/// Returns an error if the pattern is invalid, an entry cannot be read, or
/// no paths match.
pub fn expand_glob_required(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = expand_glob(pattern)?;
    if paths.is_empty() {
        bail!("no files found matching pattern: {pattern}");
    }
    Ok(paths)
}
