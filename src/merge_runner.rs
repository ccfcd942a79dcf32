// merge_runner.rs
use crate::config::MergeConfig;
use crate::csv_lookup::build_lookup;
use crate::csv_merger::{merge_csv, MergeReport};
use crate::errors::{MergeError, Result};
use chrono::{DateTime, Local};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-run subdirectory, e.g. `diff-2024-03-21_14-05-09`.
pub fn run_dir_name(now: DateTime<Local>) -> String {
    format!("diff-{}", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Directory the merged csv goes into. `merge_csv` creates it once the
/// first csv's columns have resolved.
pub fn output_dir_for(config: &MergeConfig, now: DateTime<Local>) -> PathBuf {
    if config.timestamped_output {
        config.output_dir.join(run_dir_name(now))
    } else {
        config.output_dir.clone()
    }
}

/// One full pass: validate, index the second csv, rewrite the first.
///
/// Any error aborts the run and comes straight back to the caller.
pub fn run(config: &MergeConfig) -> Result<MergeReport> {
    config.validate()?;
    ensure_readable(&config.second_csv)?;
    ensure_readable(&config.first_csv)?;

    let lookup = build_lookup(
        &config.second_csv,
        &config.key_columns_second,
        &config.source_column,
    )?;

    let out_dir = output_dir_for(config, Local::now());
    info!("Output directory: {}", out_dir.display());

    merge_csv(
        &config.first_csv,
        &lookup,
        &config.key_columns_first,
        &config.overwrite_column,
        &config.default_value,
        &out_dir,
    )
}

fn ensure_readable(path: &Path) -> Result<()> {
    fs::metadata(path)
        .map(|_| ())
        .map_err(|e| MergeError::io(path, e))
}
