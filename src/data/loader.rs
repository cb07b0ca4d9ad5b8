use std::fs::File;
use std::path::Path;

use log::{debug, error};

use super::model::{Table, Value};
use crate::error::{FeatureError, Result};
use crate::logging::LogContext;

/// Field values read as missing, following the usual dataframe defaults.
/// They are normalized to an empty string like any blank cell.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a delimited table from `path`. The delimiter is chosen by extension:
/// `.tsv` / `.tab` are tab-separated, everything else is comma-separated.
pub fn load_table(path: &Path, log: &LogContext) -> Result<Table> {
    let table = read_delimited(path, delimiter_for(path)).map_err(|err| {
        match &err {
            FeatureError::Malformed { .. } => {
                error!(target: log.target(), "Failed to parse the CSV file: {err}")
            }
            _ => error!(
                target: log.target(),
                "Unexpected error occurred while loading the data: {err}"
            ),
        }
        err
    })?;

    debug!(
        target: log.target(),
        "Data loaded and missing values filled from {} ({} rows)",
        path.display(),
        table.len()
    );
    Ok(table)
}

fn delimiter_for(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "tsv" | "tab" => b'\t',
        _ => b',',
    }
}

// ---------------------------------------------------------------------------
// Delimited reader
// ---------------------------------------------------------------------------

/// Layout: one header row with column names, then one record per line.
/// Quoted fields may span lines. Records shorter than the header are padded
/// with missing cells; longer records are malformed.
fn read_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let file = File::open(path).map_err(|e| FeatureError::from_io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| classify_csv_error(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        return Err(FeatureError::Malformed {
            path: path.to_path_buf(),
            reason: "no columns to parse from file".to_string(),
        });
    }

    let width = columns.len();
    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| classify_csv_error(path, e))?;
        if record.len() > width {
            return Err(FeatureError::Malformed {
                path: path.to_path_buf(),
                reason: format!(
                    "row {row_no} has {} fields but the header has {width}",
                    record.len()
                ),
            });
        }
        let mut cells: Vec<Option<String>> = record
            .iter()
            .map(|field| (!MISSING_MARKERS.contains(&field)).then(|| field.to_string()))
            .collect();
        cells.resize(width, None);
        raw_rows.push(cells);
    }

    let types: Vec<ColumnType> = (0..width)
        .map(|col| ColumnType::infer(raw_rows.iter().map(|r| r[col].as_deref())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .zip(&types)
                .map(|(raw, ty)| ty.parse(raw))
                .collect()
        })
        .collect();

    Table::new(columns, rows).map_err(|reason| FeatureError::Malformed {
        path: path.to_path_buf(),
        reason,
    })
}

// ---------------------------------------------------------------------------
// Column typing
// ---------------------------------------------------------------------------

/// Dtype of a whole column. A column is numeric or boolean only when every
/// present cell parses as such; otherwise all of its cells stay raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnType {
    fn infer<'a>(cells: impl Iterator<Item = Option<&'a str>>) -> Self {
        let present: Vec<&str> = cells.flatten().collect();
        if present.is_empty() {
            ColumnType::Text
        } else if present.iter().all(|s| s.parse::<i64>().is_ok()) {
            ColumnType::Integer
        } else if present.iter().all(|s| s.parse::<f64>().is_ok()) {
            ColumnType::Float
        } else if present.iter().all(|s| parse_bool(s).is_some()) {
            ColumnType::Bool
        } else {
            ColumnType::Text
        }
    }

    /// Missing cells become empty text whatever the column type.
    fn parse(self, raw: Option<String>) -> Value {
        let Some(raw) = raw else {
            return Value::Text(String::new());
        };
        let typed = match self {
            ColumnType::Integer => raw.parse().ok().map(Value::Integer),
            ColumnType::Float => raw.parse().ok().map(Value::Float),
            ColumnType::Bool => parse_bool(&raw).map(Value::Bool),
            ColumnType::Text => None,
        };
        typed.unwrap_or(Value::Text(raw))
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

fn classify_csv_error(path: &Path, err: csv::Error) -> FeatureError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => FeatureError::from_io(path, io),
        _ => FeatureError::Malformed {
            path: path.to_path_buf(),
            reason,
        },
    }
}
