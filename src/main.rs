use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use tfidf_features::{run, LogContext, PipelineConfig};

/// Fit TF-IDF features on the interim train split and write feature tables
/// for both splits.
#[derive(Parser, Debug)]
#[command(name = "tfidf-features", version, about)]
struct Cli {
    /// YAML parameter file with a `feature_engineering.max_features` entry
    #[arg(long, default_value = "params.yaml")]
    params: PathBuf,

    /// Directory holding train_processed.csv and test_processed.csv
    #[arg(long, default_value = "data/interim")]
    interim_dir: PathBuf,

    /// Directory that receives train_tfidf.csv and test_tfidf.csv
    #[arg(long, default_value = "data/processed")]
    processed_dir: PathBuf,

    /// Directory for feature_engineering.log
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log = match LogContext::init(&cli.log_dir) {
        Ok(log) => log,
        Err(e) => {
            println!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = PipelineConfig {
        params_path: cli.params,
        interim_dir: cli.interim_dir,
        processed_dir: cli.processed_dir,
    };

    match run(&config, &log) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(
                target: log.target(),
                "Failed to complete the feature engineering process: {e}"
            );
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
