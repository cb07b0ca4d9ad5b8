//! Batch TF-IDF feature engineering over pre-split train/test datasets.

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod logging;
pub mod pipeline;

pub use error::{ErrorKind, FeatureError};
pub use logging::LogContext;
pub use pipeline::{run, PipelineConfig, PipelineReport};
