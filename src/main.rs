use csvmerge::config::MergeConfig;
use csvmerge::errors::MergeError;
use csvmerge::merge_runner::run;
use csvmerge::user_interaction::{
    print_error, print_insight, print_plan, print_report, usage,
};
use env_logger::Env;
use log::{debug, warn};
use std::env;
use std::path::PathBuf;
use std::process;

const BRO_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, MergeError> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => match iter.next() {
                Some(path) => cli.config_path = Some(PathBuf::from(path)),
                None => {
                    return Err(MergeError::Config(
                        "--config needs a path to a JSON file".to_string(),
                    ))
                }
            },
            "--json" => cli.json = true,
            other => {
                return Err(MergeError::Config(format!(
                    "unknown argument {}, try --help",
                    other
                )))
            }
        }
    }
    Ok(cli)
}

/// Loads `.env` from the working directory without overriding variables
/// that are already set.
fn load_dotenv() -> Result<(), MergeError> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => {
            warn!(".env not found, using system environment variables");
            Ok(())
        }
        Err(e) => Err(MergeError::Config(format!("failed to load .env: {}", e))),
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--version") {
        print_insight(BRO_VERSION);
        process::exit(0);
    }
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", usage());
        process::exit(0);
    }

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let result = parse_args(&args).and_then(|cli| {
        let config = match &cli.config_path {
            Some(path) => MergeConfig::from_json_file(path)?,
            None => {
                load_dotenv()?;
                MergeConfig::from_env()?
            }
        };
        debug!("{:?}", config);
        if !cli.json {
            print_plan(&config);
        }
        run(&config).map(|report| (cli, report))
    });

    match result {
        Ok((cli, report)) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("failed to encode report: {}", e);
                        process::exit(1);
                    }
                }
            } else {
                print_report(&report);
            }
        }
        Err(err) => {
            print_error(&err);
            process::exit(1);
        }
    }
}
