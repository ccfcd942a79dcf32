// user_interaction.rs
use crate::config::{
    MergeConfig, ENV_DEFAULT, ENV_FIRST_CSV, ENV_KEYS_FIRST, ENV_KEYS_SECOND,
    ENV_OUTPUT_DIR, ENV_OVERWRITE_COLUMN, ENV_SECOND_CSV, ENV_SOURCE_COLUMN,
    ENV_TIMESTAMPED_OUTPUT,
};
use crate::csv_merger::MergeReport;
use crate::errors::MergeError;

/// Prints a message in bold orange font.
pub fn print_insight(message: &str) {
    let bold_orange = "\x1b[1;38;5;208m";
    let reset = "\x1b[0m";

    println!("{}@BIGBro: {}{}", bold_orange, message, reset);
}

/// Prints an indented message in orange font.
pub fn print_insight_level_2(message: &str) {
    let orange = "\x1b[0;38;5;208m";
    let reset = "\x1b[0m";

    println!("  {}@LILBro: {}{}", orange, message, reset);
}

/// Prints a failure to stderr in bold red font.
pub fn print_error(err: &MergeError) {
    let bold_red = "\x1b[1;31m";
    let reset = "\x1b[0m";

    eprintln!("{}@BIGBro: {}: {}{}", bold_red, err.kind(), err, reset);
}

pub fn print_list(options: &[String]) {
    let bold_yellow = "\x1b[1;33m";
    let reset = "\x1b[0m";

    // Pad the index so the entries line up
    let max_digits = options.len().to_string().len();

    for (index, option) in options.iter().enumerate() {
        let padded_index = format!("{:width$}:", index + 1, width = max_digits);
        println!("  {}{} {}{}", bold_yellow, padded_index, option, reset);
    }
}

pub fn print_plan(config: &MergeConfig) {
    print_insight("Merging, bro. Here's the plan:");
    print_list(&describe_config(config));
}

pub fn print_report(report: &MergeReport) {
    print_insight_level_2(&format!(
        "{} rows: {} matched, {} defaulted",
        report.rows, report.matched, report.defaulted
    ));
    print_insight(&format!(
        "Merging complete. Saved at {}",
        report.output_path.display()
    ));
}

pub fn describe_config(config: &MergeConfig) -> Vec<String> {
    vec![
        format!("first csv   : {}", config.first_csv.display()),
        format!("second csv  : {}", config.second_csv.display()),
        format!(
            "join on     : {} <- {}",
            config.key_columns_first.join(","),
            config.key_columns_second.join(",")
        ),
        format!(
            "overwrite   : {} <- {} (default {:?})",
            config.overwrite_column, config.source_column, config.default_value
        ),
        format!("output dir  : {}", config.output_dir.display()),
    ]
}

pub fn usage() -> String {
    format!(
        r#"csvmerge {}

Overwrites one column of the first csv with values looked up from the second
csv by composite key, writing merged_<first csv name> to the output directory.

USAGE
=====
  csvmerge [--config <path.json>] [--json]
  csvmerge --version
  csvmerge --help

Without --config, settings come from the environment:
  {:<20} output directory
  {:<20} csv whose column gets overwritten
  {:<20} csv the lookup is built from
  {:<20} comma separated key columns of the first csv
  {:<20} comma separated key columns of the second csv (same count)
  {:<20} column of the first csv to overwrite
  {:<20} column of the second csv to copy values from
  {:<20} value used when a row has no match
  {:<20} optional, write into a diff-<timestamp> subdirectory

A .env file in the working directory is loaded first; variables already set
in the environment take precedence over it.

Column lists are split on commas and each name is trimmed of surrounding
whitespace, blank names are ignored. To target a header name that starts or
ends with spaces, use --config with a JSON array of names.

RUST_LOG controls log verbosity (default: info)."#,
        env!("CARGO_PKG_VERSION"),
        ENV_OUTPUT_DIR,
        ENV_FIRST_CSV,
        ENV_SECOND_CSV,
        ENV_KEYS_FIRST,
        ENV_KEYS_SECOND,
        ENV_OVERWRITE_COLUMN,
        ENV_SOURCE_COLUMN,
        ENV_DEFAULT,
        ENV_TIMESTAMPED_OUTPUT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn describe_config_shows_key_pairing() {
        let config = MergeConfig {
            output_dir: PathBuf::from("out"),
            first_csv: PathBuf::from("a.csv"),
            second_csv: PathBuf::from("b.csv"),
            key_columns_first: vec!["id".to_string(), "sub".to_string()],
            key_columns_second: vec!["key".to_string(), "sub_id".to_string()],
            overwrite_column: "region".to_string(),
            source_column: "zone".to_string(),
            default_value: "UNKNOWN".to_string(),
            timestamped_output: false,
        };
        let lines = describe_config(&config);
        assert_eq!(lines[2], "join on     : id,sub <- key,sub_id");
        assert_eq!(
            lines[3],
            "overwrite   : region <- zone (default \"UNKNOWN\")"
        );
    }

    #[test]
    fn usage_lists_every_variable() {
        let text = usage();
        for var in [ENV_OUTPUT_DIR, ENV_KEYS_SECOND, ENV_DEFAULT, ENV_TIMESTAMPED_OUTPUT] {
            assert!(text.contains(var), "{var} missing from usage");
        }
        assert!(text.contains(".env"));
        assert!(text.contains("trimmed"));
    }
}
