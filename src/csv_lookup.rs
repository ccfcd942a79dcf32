// csv_lookup.rs
use crate::csv_table::{composite_key, field_or_empty, read_table};
use crate::errors::Result;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

/// Composite key -> source value, built from the second csv.
///
/// When the second csv repeats a key, the later row wins. That is the
/// contract callers rely on, so duplicates are counted but never rejected.
#[derive(Debug, Default, Clone)]
pub struct LookupMap {
    entries: HashMap<Vec<u8>, Vec<u8>>,
    duplicate_keys: usize,
}

impl LookupMap {
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
        if self.entries.insert(key, value).is_some() {
            self.duplicate_keys += 1;
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows whose key replaced an earlier row's value.
    pub fn duplicate_keys(&self) -> usize {
        self.duplicate_keys
    }
}

pub fn build_lookup(path: &Path, key_columns: &[String], source_column: &str) -> Result<LookupMap> {
    let table = read_table(path, "second CSV")?;

    let key_idx = table.resolve_columns(key_columns, "key column")?;
    let src_idx = table.resolve_column(source_column, "source column")?;
    debug!(
        "{}: key columns {:?} at {:?}, source column {} at {}",
        table.file_name(),
        key_columns,
        key_idx,
        source_column,
        src_idx
    );

    let mut lookup = LookupMap {
        entries: HashMap::with_capacity(table.rows.len()),
        duplicate_keys: 0,
    };
    for row in &table.rows {
        let key = composite_key(row, &key_idx);
        lookup.insert(key, field_or_empty(row, src_idx).to_vec());
    }

    info!(
        "Indexed {} rows from {} into {} keys ({} duplicates, last one wins)",
        table.rows.len(),
        table.file_name(),
        lookup.len(),
        lookup.duplicate_keys()
    );

    Ok(lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MergeError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn write(dir: &TempDir, body: impl AsRef<[u8]>) -> PathBuf {
        let path = dir.path().join("second.csv");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn later_duplicate_key_wins() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "id,region\n1,EU\n2,US\n1,APAC\n");

        let lookup = build_lookup(&path, &cols(&["id"]), "region").unwrap();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(b"1"), Some(&b"APAC"[..]));
        assert_eq!(lookup.get(b"2"), Some(&b"US"[..]));
        assert_eq!(lookup.duplicate_keys(), 1);
    }

    #[test]
    fn composite_keys_follow_key_column_order() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a,b,v\nx,y,1\n");

        let ab = build_lookup(&path, &cols(&["a", "b"]), "v").unwrap();
        let ba = build_lookup(&path, &cols(&["b", "a"]), "v").unwrap();
        assert_eq!(ab.get(b"x|y"), Some(&b"1"[..]));
        assert_eq!(ab.get(b"y|x"), None);
        assert_eq!(ba.get(b"y|x"), Some(&b"1"[..]));
    }

    #[test]
    fn short_rows_use_empty_values() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "id,sub,region\n1\n2,b\n");

        let lookup = build_lookup(&path, &cols(&["id", "sub"]), "region").unwrap();
        assert_eq!(lookup.get(b"1|"), Some(&b""[..]));
        assert_eq!(lookup.get(b"2|b"), Some(&b""[..]));
    }

    #[test]
    fn keys_and_values_are_opaque_bytes() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, b"city,region\nS\xe3o Paulo,Am\xe9rica\n");

        let lookup = build_lookup(&path, &cols(&["city"]), "region").unwrap();
        assert_eq!(lookup.get(b"S\xe3o Paulo"), Some(&b"Am\xe9rica"[..]));
    }

    #[test]
    fn missing_source_column_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "id,region\n1,EU\n");

        let err = build_lookup(&path, &cols(&["id"]), "zone").unwrap_err();
        match err {
            MergeError::Schema { column, role, .. } => {
                assert_eq!(column, "zone");
                assert_eq!(role, "source column");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_second_csv_builds_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "id,region\n");

        let err = build_lookup(&path, &cols(&["id"]), "region").unwrap_err();
        assert!(matches!(err, MergeError::EmptyTable { .. }));
    }
}
