// csv_merger.rs
use crate::csv_lookup::LookupMap;
use crate::csv_table::{composite_key, read_table};
use crate::errors::{MergeError, Result};
use csv::WriterBuilder;
use log::{debug, info};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Prefix put in front of the first csv's file name to name the output.
pub const MERGED_FILE_PREFIX: &str = "merged_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub output_path: PathBuf,
    pub rows: usize,
    pub matched: usize,
    pub defaulted: usize,
}

/// `<out_dir>/merged_<file name of path>`.
pub fn merged_output_path(path: &Path, out_dir: &Path) -> Result<PathBuf> {
    let base = path.file_name().ok_or_else(|| {
        MergeError::Config(format!("first CSV path {} has no file name", path.display()))
    })?;
    let mut name = MERGED_FILE_PREFIX.to_string();
    name.push_str(&base.to_string_lossy());
    Ok(out_dir.join(name))
}

/// Rewrites `overwrite_column` of every row in the first csv from `lookup`,
/// falling back to `default_value`, and writes the result to
/// `merged_<file name>` in `out_dir`.
///
/// Columns are resolved before `out_dir` or the output file is created, so a
/// bad header leaves nothing behind. Rows keep their order and any extra
/// trailing fields; rows too short to hold the overwrite column are padded
/// with empty fields. Field bytes are copied as read, whatever their encoding.
pub fn merge_csv(
    path: &Path,
    lookup: &LookupMap,
    key_columns: &[String],
    overwrite_column: &str,
    default_value: &str,
    out_dir: &Path,
) -> Result<MergeReport> {
    let table = read_table(path, "first CSV")?;

    let key_idx = table.resolve_columns(key_columns, "key column")?;
    let ow_idx = table.resolve_column(overwrite_column, "overwrite column")?;
    debug!(
        "{}: key columns {:?} at {:?}, overwrite column {} at {}",
        table.file_name(),
        key_columns,
        key_idx,
        overwrite_column,
        ow_idx
    );

    let out_path = merged_output_path(path, out_dir)?;
    fs::create_dir_all(out_dir).map_err(|e| MergeError::io(out_dir, e))?;
    let out_file = File::create(&out_path).map_err(|e| MergeError::io(&out_path, e))?;
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_writer(BufWriter::new(out_file));

    writer
        .write_record(&table.header)
        .map_err(|e| MergeError::csv(&out_path, e))?;

    let mut report = MergeReport {
        output_path: out_path.clone(),
        rows: 0,
        matched: 0,
        defaulted: 0,
    };

    for mut row in table.rows {
        let key = composite_key(&row, &key_idx);
        let value = match lookup.get(&key) {
            Some(found) => {
                report.matched += 1;
                found
            }
            None => {
                report.defaulted += 1;
                default_value.as_bytes()
            }
        };

        if row.len() <= ow_idx {
            row.resize(ow_idx + 1, Vec::new());
        }
        row[ow_idx] = value.to_vec();

        writer
            .write_record(&row)
            .map_err(|e| MergeError::csv(&out_path, e))?;
        report.rows += 1;
    }

    writer.flush().map_err(|e| MergeError::io(&out_path, e))?;

    info!(
        "Wrote {} rows to {} ({} matched, {} defaulted)",
        report.rows,
        out_path.display(),
        report.matched,
        report.defaulted
    );

    Ok(report)
}
