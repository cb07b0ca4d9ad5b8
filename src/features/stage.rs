use log::{debug, error};
use ndarray::Array2;

use super::tfidf::TfidfVectorizer;
use crate::data::model::{Table, Value};
use crate::error::{FeatureError, Result};
use crate::logging::LogContext;

/// Name of the column appended to every feature table.
pub const LABEL_COLUMN: &str = "label";

/// Which input columns hold the document text and the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextColumns {
    pub text: String,
    pub target: String,
}

impl Default for TextColumns {
    fn default() -> Self {
        Self {
            text: "text".to_string(),
            target: "target".to_string(),
        }
    }
}

/// Fit TF-IDF on the training text and turn both splits into feature tables.
///
/// Returns `(train_features, test_features)`: one float column per vocabulary
/// term followed by the `label` column copied from the target column.
pub fn apply_tfidf(
    train: &Table,
    test: &Table,
    max_features: usize,
    columns: &TextColumns,
    log: &LogContext,
) -> Result<(Table, Table)> {
    let (train_df, test_df) =
        tfidf_tables(train, test, max_features, columns).map_err(|err| {
            error!(target: log.target(), "Error during TF-IDF transformation: {err}");
            err
        })?;

    debug!(
        target: log.target(),
        "TF-IDF applied. Train shape: {:?}, Test shape: {:?}",
        train_df.shape(),
        test_df.shape()
    );
    Ok((train_df, test_df))
}

fn tfidf_tables(
    train: &Table,
    test: &Table,
    max_features: usize,
    columns: &TextColumns,
) -> Result<(Table, Table)> {
    let x_train = text_cells(train, &columns.text, "training")?;
    let y_train = target_cells(train, &columns.target, "training")?;
    let x_test = text_cells(test, &columns.text, "test")?;
    let y_test = target_cells(test, &columns.target, "test")?;

    let fitted = TfidfVectorizer::new(max_features).fit(&x_train)?;
    let train_matrix = fitted.transform(&x_train);
    let test_matrix = fitted.transform(&x_test);

    let train_df = feature_table(fitted.terms(), &train_matrix, y_train)?;
    let test_df = feature_table(fitted.terms(), &test_matrix, y_test)?;
    Ok((train_df, test_df))
}

fn text_cells(table: &Table, column: &str, split: &str) -> Result<Vec<String>> {
    table
        .column(column)
        .map(|cells| cells.into_iter().map(Value::as_text).collect())
        .ok_or_else(|| missing_column(column, split))
}

fn target_cells(table: &Table, column: &str, split: &str) -> Result<Vec<Value>> {
    table
        .column(column)
        .map(|cells| cells.into_iter().cloned().collect())
        .ok_or_else(|| missing_column(column, split))
}

fn missing_column(column: &str, split: &str) -> FeatureError {
    FeatureError::Transform(format!("column '{column}' not found in {split} data"))
}

fn feature_table(terms: &[String], matrix: &Array2<f64>, labels: Vec<Value>) -> Result<Table> {
    let rows = matrix
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|&w| Value::Float(w)).collect())
        .collect();
    let mut table = Table::new(terms.to_vec(), rows).map_err(FeatureError::Transform)?;
    table
        .set_column(LABEL_COLUMN, labels)
        .map_err(FeatureError::Transform)?;
    Ok(table)
}
