// config.rs
use crate::errors::{MergeError, Result};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const ENV_OUTPUT_DIR: &str = "DATA_OUTPUT_DIR";
pub const ENV_FIRST_CSV: &str = "FIRST_CSV";
pub const ENV_SECOND_CSV: &str = "SECOND_CSV";
pub const ENV_KEYS_FIRST: &str = "KEY_COLUMNS_FIRST";
pub const ENV_KEYS_SECOND: &str = "KEY_COLUMNS_SECOND";
pub const ENV_OVERWRITE_COLUMN: &str = "OVERWRITE_COLUMN";
pub const ENV_SOURCE_COLUMN: &str = "SOURCE_COLUMN";
pub const ENV_DEFAULT: &str = "DEFAULT";
pub const ENV_TIMESTAMPED_OUTPUT: &str = "TIMESTAMPED_OUTPUT";

/// Everything one merge run needs, built once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct MergeConfig {
    pub output_dir: PathBuf,
    pub first_csv: PathBuf,
    pub second_csv: PathBuf,
    pub key_columns_first: Vec<String>,
    pub key_columns_second: Vec<String>,
    pub overwrite_column: String,
    pub source_column: String,
    pub default_value: String,
    /// Write into `<output_dir>/diff-<timestamp>/` instead of `output_dir`.
    #[serde(default)]
    pub timestamped_output: bool,
}

impl MergeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key -> value source. Unset and empty values
    /// count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(val) if !val.is_empty() => Ok(val),
                _ => Err(MergeError::Config(format!("{} is not set", key))),
            }
        };

        let config = MergeConfig {
            output_dir: PathBuf::from(required(ENV_OUTPUT_DIR)?),
            first_csv: PathBuf::from(required(ENV_FIRST_CSV)?),
            second_csv: PathBuf::from(required(ENV_SECOND_CSV)?),
            key_columns_first: split_columns(&required(ENV_KEYS_FIRST)?),
            key_columns_second: split_columns(&required(ENV_KEYS_SECOND)?),
            overwrite_column: required(ENV_OVERWRITE_COLUMN)?,
            source_column: required(ENV_SOURCE_COLUMN)?,
            default_value: required(ENV_DEFAULT)?,
            timestamped_output: lookup(ENV_TIMESTAMPED_OUTPUT)
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file with the same fields as the struct.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let mut text = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut text))
            .map_err(|e| MergeError::io(path, e))?;

        let config: MergeConfig = serde_json::from_str(&text).map_err(|e| {
            MergeError::Config(format!("config {} is not valid: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Key lists must be non-empty and pair up position by position.
    pub fn validate(&self) -> Result<()> {
        if self.key_columns_first.is_empty() {
            return Err(MergeError::Config(format!("{} is empty", ENV_KEYS_FIRST)));
        }
        if self.key_columns_second.is_empty() {
            return Err(MergeError::Config(format!("{} is empty", ENV_KEYS_SECOND)));
        }
        if self.key_columns_first.len() != self.key_columns_second.len() {
            return Err(MergeError::Config(format!(
                "{} has {} columns but {} has {}",
                ENV_KEYS_FIRST,
                self.key_columns_first.len(),
                ENV_KEYS_SECOND,
                self.key_columns_second.len()
            )));
        }
        Ok(())
    }
}

/// "id, name ,city" -> ["id", "name", "city"]. Names are trimmed and blank
/// entries dropped, so header names with leading or trailing spaces can only
/// be targeted from a JSON config.
pub fn split_columns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
