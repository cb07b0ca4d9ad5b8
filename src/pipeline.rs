use std::path::{Path, PathBuf};

use log::{debug, error};

use crate::config::load_params;
use crate::data::loader::load_table;
use crate::data::writer::save_table;
use crate::error::Result;
use crate::features::stage::{apply_tfidf, TextColumns};
use crate::logging::LogContext;

pub const TRAIN_INPUT: &str = "train_processed.csv";
pub const TEST_INPUT: &str = "test_processed.csv";
pub const TRAIN_OUTPUT: &str = "train_tfidf.csv";
pub const TEST_OUTPUT: &str = "test_tfidf.csv";

/// Where the stage reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub params_path: PathBuf,
    pub interim_dir: PathBuf,
    pub processed_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            params_path: PathBuf::from("params.yaml"),
            interim_dir: PathBuf::from("data/interim"),
            processed_dir: PathBuf::from("data/processed"),
        }
    }
}

impl PipelineConfig {
    /// Resolve every location against `root`.
    pub fn rooted_at(root: &Path) -> Self {
        let d = Self::default();
        Self {
            params_path: root.join(d.params_path),
            interim_dir: root.join(d.interim_dir),
            processed_dir: root.join(d.processed_dir),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub max_features: usize,
    pub train_shape: (usize, usize),
    pub test_shape: (usize, usize),
    pub train_output: PathBuf,
    pub test_output: PathBuf,
}

/// Run the stage: params → load → TF-IDF → save. The first error aborts the
/// remaining steps and is returned unchanged.
pub fn run(config: &PipelineConfig, log: &LogContext) -> Result<PipelineReport> {
    let params = load_params(&config.params_path, log)?;
    let fe = params.feature_engineering().map_err(|err| {
        error!(target: log.target(), "Invalid feature engineering parameters: {err}");
        err
    })?;

    let train = load_table(&config.interim_dir.join(TRAIN_INPUT), log)?;
    let test = load_table(&config.interim_dir.join(TEST_INPUT), log)?;

    let columns = TextColumns {
        text: fe.text_column,
        target: fe.target_column,
    };
    let (train_df, test_df) = apply_tfidf(&train, &test, fe.max_features, &columns, log)?;

    let train_output = config.processed_dir.join(TRAIN_OUTPUT);
    let test_output = config.processed_dir.join(TEST_OUTPUT);
    save_table(&train_df, &train_output, log)?;
    save_table(&test_df, &test_output, log)?;

    debug!(target: log.target(), "Feature engineering process completed successfully.");
    Ok(PipelineReport {
        max_features: fe.max_features,
        train_shape: train_df.shape(),
        test_shape: test_df.shape(),
        train_output,
        test_output,
    })
}
