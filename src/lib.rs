pub mod config;
pub mod csv_lookup;
pub mod csv_merger;
pub mod csv_table;
pub mod errors;
pub mod merge_runner;
pub mod user_interaction;
