// errors.rs
use std::path::PathBuf;

/// Everything that can stop a merge run. None of these are recovered from;
/// they travel back to `main`, which prints them and exits.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("{0}")]
    Config(String),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{role} {} is empty", .path.display())]
    EmptyTable { path: PathBuf, role: String },

    #[error("{role} {column} not found in header of {}{}", .path.display(), suggestion_hint(.suggestion.as_deref()))]
    Schema {
        column: String,
        role: String,
        path: PathBuf,
        suggestion: Option<String>,
    },
}

fn suggestion_hint(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean {}?)", name),
        None => String::new(),
    }
}

impl MergeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MergeError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        MergeError::Csv {
            path: path.into(),
            source,
        }
    }

    /// Coarse category used for the one-line report in `main`.
    pub fn kind(&self) -> &'static str {
        match self {
            MergeError::Config(_) => "configuration error",
            MergeError::Io { .. } => "I/O error",
            // csv wraps open/read failures in its own error type
            MergeError::Csv { source, .. } if source.is_io_error() => "I/O error",
            MergeError::Csv { .. } | MergeError::EmptyTable { .. } => "format error",
            MergeError::Schema { .. } => "schema error",
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_column_role_and_suggestion() {
        let err = MergeError::Schema {
            column: "idd".to_string(),
            role: "key column".to_string(),
            path: PathBuf::from("first.csv"),
            suggestion: Some("id".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "key column idd not found in header of first.csv (did you mean id?)"
        );
        assert_eq!(err.kind(), "schema error");
    }

    #[test]
    fn empty_table_is_a_format_error() {
        let err = MergeError::EmptyTable {
            path: PathBuf::from("second.csv"),
            role: "second CSV".to_string(),
        };
        assert_eq!(err.to_string(), "second CSV second.csv is empty");
        assert_eq!(err.kind(), "format error");
    }

    #[test]
    fn csv_io_failure_reports_as_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = MergeError::csv("missing.csv", csv::Error::from(io));
        assert_eq!(err.kind(), "I/O error");
    }
}
