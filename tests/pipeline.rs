use std::fs;
use std::path::Path;

use tfidf_features::data::loader::load_table;
use tfidf_features::data::model::Value;
use tfidf_features::pipeline::{PipelineConfig, TEST_OUTPUT, TRAIN_OUTPUT};
use tfidf_features::{run, ErrorKind, LogContext};

use tempfile::tempdir;

fn write_project(root: &Path, params: &str, train: &str, test: &str) {
    fs::write(root.join("params.yaml"), params).unwrap();
    let interim = root.join("data").join("interim");
    fs::create_dir_all(&interim).unwrap();
    fs::write(interim.join("train_processed.csv"), train).unwrap();
    fs::write(interim.join("test_processed.csv"), test).unwrap();
}

const PARAMS: &str = "feature_engineering:\n  max_features: 3\n";
const TRAIN: &str = "text,target\ncat sat,0\ndog ran fast,1\n";
const TEST: &str = "text,target\ncat ran,1\n";

#[test]
fn end_to_end_writes_both_feature_tables() {
    let temp = tempdir().unwrap();
    write_project(temp.path(), PARAMS, TRAIN, TEST);
    let config = PipelineConfig::rooted_at(temp.path());
    let log = LogContext::detached();

    let report = run(&config, &log).unwrap();
    assert_eq!(report.max_features, 3);
    assert_eq!(report.train_shape, (2, 4));
    assert_eq!(report.test_shape, (1, 4));

    let train_out = temp.path().join("data/processed").join(TRAIN_OUTPUT);
    assert_eq!(report.train_output, train_out);
    let written = fs::read_to_string(&train_out).unwrap();
    assert!(written.starts_with("cat,dog,fast,label\n"));

    let train_df = load_table(&train_out, &log).unwrap();
    let test_df = load_table(&report.test_output, &log).unwrap();
    assert_eq!(train_df.len(), 2);
    assert_eq!(
        train_df.column("label").unwrap(),
        vec![&Value::Integer(0), &Value::Integer(1)]
    );
    assert_eq!(test_df.column("label").unwrap(), vec![&Value::Integer(1)]);
    assert!(test_df.column_index("ran").is_none());
}

#[test]
fn labels_follow_targets_row_for_row() {
    let temp = tempdir().unwrap();
    let train = "text,target\nfree cash now,1\nlunch tomorrow,0\n,0\nclaim your prize,1\nmeeting at noon,0\n";
    let test = "text,target\nfree lunch,0\nprize meeting,1\n,1\n";
    write_project(
        temp.path(),
        "feature_engineering:\n  max_features: 4\n",
        train,
        test,
    );
    let log = LogContext::detached();

    let report = run(&PipelineConfig::rooted_at(temp.path()), &log).unwrap();
    // at most four term columns plus the label
    assert!(report.train_shape.1 <= 5);
    assert_eq!(report.train_shape.1, report.test_shape.1);

    let input = load_table(&temp.path().join("data/interim/test_processed.csv"), &log).unwrap();
    let output = load_table(&report.test_output, &log).unwrap();
    assert_eq!(input.column("target"), output.column("label"));
    // an empty document yields an all-zero row
    let last = &output.rows()[2];
    assert!(last[..last.len() - 1].iter().all(|v| v.as_f64() == Some(0.0)));
}

#[test]
fn repeated_runs_are_identical() {
    let temp = tempdir().unwrap();
    write_project(temp.path(), PARAMS, TRAIN, TEST);
    let config = PipelineConfig::rooted_at(temp.path());
    let log = LogContext::detached();

    let first = run(&config, &log).unwrap();
    let train_a = fs::read(&first.train_output).unwrap();
    let test_a = fs::read(&first.test_output).unwrap();

    let second = run(&config, &log).unwrap();
    assert_eq!(fs::read(&second.train_output).unwrap(), train_a);
    assert_eq!(fs::read(&second.test_output).unwrap(), test_a);
}

#[test]
fn missing_params_aborts_before_loading_data() {
    let temp = tempdir().unwrap();
    // No interim data either: the params failure must come first.
    let config = PipelineConfig::rooted_at(temp.path());

    let err = run(&config, &LogContext::detached()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("params.yaml"));
    assert!(!temp.path().join("data/processed").exists());
}

#[test]
fn unreadable_params_reports_root_cause() {
    let temp = tempdir().unwrap();
    write_project(temp.path(), PARAMS, TRAIN, TEST);
    let mut config = PipelineConfig::rooted_at(temp.path());
    config.params_path = temp.path().join("data");

    let err = run(&config, &LogContext::detached()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!err.to_string().contains("max_features"));
}

#[test]
fn empty_training_text_fails_without_output() {
    let temp = tempdir().unwrap();
    write_project(
        temp.path(),
        PARAMS,
        "text,target\n,0\n,1\n",
        TEST,
    );
    let config = PipelineConfig::rooted_at(temp.path());

    let err = run(&config, &LogContext::detached()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transform);
    assert!(!temp.path().join("data/processed").join(TEST_OUTPUT).exists());
}

#[test]
fn missing_max_features_is_reported() {
    let temp = tempdir().unwrap();
    write_project(
        temp.path(),
        "feature_engineering:\n  n_grams: 2\n",
        TRAIN,
        TEST,
    );

    let err = run(&PipelineConfig::rooted_at(temp.path()), &LogContext::detached()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
    assert!(err.to_string().contains("max_features"));
}
