//! Partitioned Parquet output.
//!
//! Records are split by the distinct values of one column into Hive-style
//! directories (`nationality=BRA/`), each holding a single Parquet file. The
//! partition column lives in the directory name only.
//!
//! The dataset is built in a staging directory beside the destination and
//! renamed into place once complete, so a failed run never leaves a partial
//! dataset where the previous one was.

use crate::{error::Error, Result};
use itertools::Itertools;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";
pub const PART_FILE: &str = "part-00000.parquet";

/// Directory name for one partition value; `None` maps to [`DEFAULT_PARTITION`].
pub fn partition_dir_name(column: &str, value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => format!("{}={}", column, escape_path_segment(value)),
        _ => format!("{}={}", column, DEFAULT_PARTITION),
    }
}

fn escape_path_segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '%' | '=' | '#' | '\'' => {
                out.push_str(&format!("%{:02X}", c as u32))
            }
            c if c.is_control() => out.push_str(&format!("%{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Writes `df` under `dest`, one directory per value of `partition_col`.
///
/// Any existing `dest` is replaced. Returns the partition directory names in
/// order of first appearance.
pub fn write_partitioned<P: AsRef<Path>>(
    df: &DataFrame,
    partition_col: &str,
    dest: P,
) -> Result<Vec<String>> {
    let dest = dest.as_ref();
    if !df.get_column_names().contains(&partition_col) {
        return Err(Error::MissingColumns(vec![partition_col.to_string()]));
    }

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;
    let staging = tempfile::Builder::new()
        .prefix(".scout-staging-")
        .tempdir_in(&parent)?;

    // Empty and null keys share the default partition
    let key = col(partition_col).cast(DataType::String);
    let df = df
        .clone()
        .lazy()
        .with_column(
            when(key.clone().eq(lit("")))
                .then(lit(NULL).cast(DataType::String))
                .otherwise(key)
                .alias(partition_col),
        )
        .collect()?;

    let mut names = Vec::new();
    if df.height() > 0 {
        for part in df.partition_by_stable([partition_col], true)? {
            let key = part.column(partition_col)?;
            let name = partition_dir_name(partition_col, key.str()?.get(0));

            let part_dir = staging.path().join(&name);
            fs::create_dir(&part_dir)?;
            let mut data = part.drop(partition_col)?;
            let file = File::create(part_dir.join(PART_FILE))?;
            ParquetWriter::new(file).finish(&mut data)?;

            log::trace!("{}: {} rows", name, data.height());
            names.push(name);
        }
    }
    log::debug!("Partitions: {}", names.iter().join(", "));

    publish(staging, dest, &parent)?;
    Ok(names)
}

/// Moves the staged dataset to `dest`, restoring the previous one on failure.
fn publish(staging: TempDir, dest: &Path, parent: &Path) -> Result<()> {
    if !dest.exists() {
        fs::rename(staging.path(), dest)?;
        return Ok(());
    }

    let retired = tempfile::Builder::new()
        .prefix(".scout-retired-")
        .tempdir_in(parent)?;
    let previous = retired.path().join("previous");
    fs::rename(dest, &previous)?;
    if let Err(err) = fs::rename(staging.path(), dest) {
        fs::rename(&previous, dest)?;
        return Err(err.into());
    }
    Ok(())
}
