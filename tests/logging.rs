use std::fs;

use tfidf_features::pipeline::PipelineConfig;
use tfidf_features::{run, ErrorKind, LogContext};

use tempfile::tempdir;

// The global logger can be installed once per process, so this file holds a
// single test.
#[test]
fn failed_run_is_written_to_the_log_file() {
    let temp = tempdir().unwrap();
    let log = LogContext::init(&temp.path().join("logs")).unwrap();
    let log_file = log.log_file().unwrap().to_path_buf();
    assert_eq!(log_file, temp.path().join("logs/feature_engineering.log"));

    fs::write(
        temp.path().join("params.yaml"),
        "feature_engineering:\n  max_features: 3\n",
    )
    .unwrap();
    let interim = temp.path().join("data/interim");
    fs::create_dir_all(&interim).unwrap();
    fs::write(interim.join("train_processed.csv"), "text,target\n,0\n,1\n").unwrap();
    fs::write(interim.join("test_processed.csv"), "text,target\ncat,1\n").unwrap();

    let err = run(&PipelineConfig::rooted_at(temp.path()), &log).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transform);
    log::logger().flush();

    let written = fs::read_to_string(&log_file).unwrap();
    assert!(written.contains(" - feature_engineering - DEBUG - Parameters retrieved from "));
    assert!(written.contains(" - feature_engineering - ERROR - Error during TF-IDF transformation"));
    assert!(written
        .lines()
        .all(|line| line.splitn(4, " - ").count() == 4));
}
