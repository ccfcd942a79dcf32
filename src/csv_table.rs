// csv_table.rs
use crate::errors::{MergeError, Result};
use csv::ReaderBuilder;
use fuzzywuzzy::fuzz;
use log::debug;
use std::path::{Path, PathBuf};

/// Separator used when joining key fields into one lookup key. Assumed absent from the data.
pub const KEY_SEPARATOR: &[u8] = b"|";

/// Header names scoring above this are offered as "did you mean" hints.
const SUGGESTION_THRESHOLD: u8 = 60;

/// A raw csv field. Values are never decoded, so any encoding passes through.
pub type Field = Vec<u8>;

/// A csv file held fully in memory. The header is kept exactly as read.
#[derive(Debug, Clone)]
pub struct Table {
    pub path: PathBuf,
    pub header: Vec<Field>,
    pub rows: Vec<Vec<Field>>,
}

/// Reads a whole csv file. `role` ("first CSV", "second CSV") only feeds error messages.
///
/// Rows may be shorter or longer than the header. A file with no header, or
/// with a header and no data rows, is rejected as empty.
pub fn read_table(path: &Path, role: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| MergeError::csv(path, e))?;

    let mut records = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|e| MergeError::csv(path, e))?;
        records.push(record.iter().map(<[u8]>::to_vec).collect::<Vec<Field>>());
    }

    if records.len() < 2 {
        return Err(MergeError::EmptyTable {
            path: path.to_path_buf(),
            role: role.to_string(),
        });
    }

    let header = records.remove(0);
    debug!(
        "Read {} ({} columns, {} rows)",
        path.display(),
        header.len(),
        records.len()
    );

    Ok(Table {
        path: path.to_path_buf(),
        header,
        rows: records,
    })
}

impl Table {
    pub fn resolve_column(&self, name: &str, role: &str) -> Result<usize> {
        find_index(&self.header, name).ok_or_else(|| MergeError::Schema {
            column: name.to_string(),
            role: role.to_string(),
            path: self.path.clone(),
            suggestion: closest_header(&self.header, name),
        })
    }

    /// Resolves every name in order, failing on the first one that is missing.
    pub fn resolve_columns(&self, names: &[String], role: &str) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| self.resolve_column(name, role))
            .collect()
    }

    /// Base file name, used to label the table in logs.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// First position of `item` in the header, by exact byte equality.
pub fn find_index(header: &[Field], item: &str) -> Option<usize> {
    header.iter().position(|h| h.as_slice() == item.as_bytes())
}

fn closest_header(header: &[Field], name: &str) -> Option<String> {
    header
        .iter()
        .map(|h| String::from_utf8_lossy(h))
        .map(|h| {
            let score = fuzz::ratio(name, &h);
            (h, score)
        })
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by_key(|(_, score)| *score)
        .map(|(h, _)| h.into_owned())
}

/// Field at `idx`, or empty when the row is too short.
pub fn field_or_empty(row: &[Field], idx: usize) -> &[u8] {
    row.get(idx).map(Vec::as_slice).unwrap_or(&[])
}

/// Joins the values at `indices` with `KEY_SEPARATOR`. Order matters.
pub fn composite_key(row: &[Field], indices: &[usize]) -> Vec<u8> {
    indices
        .iter()
        .map(|&idx| field_or_empty(row, idx))
        .collect::<Vec<&[u8]>>()
        .join(KEY_SEPARATOR)
}
