use std::fs;
use std::path::Path;

use log::{debug, error};

use super::model::Table;
use crate::error::{FeatureError, Result};
use crate::logging::LogContext;

/// Write `table` as CSV to `path`: header row, then one record per row, no
/// index column.
///
/// Missing parent directories are created first by [`ensure_parent_dir`]; the
/// file itself is opened only after that step succeeds.
pub fn save_table(table: &Table, path: &Path, log: &LogContext) -> Result<()> {
    write_csv(table, path).map_err(|err| {
        error!(
            target: log.target(),
            "Unexpected error occurred while saving the data: {err}"
        );
        err
    })?;
    debug!(target: log.target(), "Data saved to {}", path.display());
    Ok(())
}

/// Create every missing directory above `path`.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| FeatureError::Io {
                path: dir.to_path_buf(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}

fn write_csv(table: &Table, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;

    let io_err = |e: std::io::Error| FeatureError::Io {
        path: path.to_path_buf(),
        source: e,
    };
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_to_io(path, e))?;

    writer
        .write_record(table.columns())
        .map_err(|e| csv_to_io(path, e))?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| csv_to_io(path, e))?;
    }
    writer.flush().map_err(io_err)
}

fn csv_to_io(path: &Path, err: csv::Error) -> FeatureError {
    let source = match err.into_kind() {
        csv::ErrorKind::Io(io) => io,
        other => std::io::Error::other(format!("{other:?}")),
    };
    FeatureError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_table;
    use crate::data::model::Value;
    use crate::error::ErrorKind;
    use tempfile::tempdir;

    fn feature_table() -> Table {
        Table::new(
            vec!["cat".into(), "dog".into(), "label".into()],
            vec![
                vec![Value::Float(1.0), Value::Float(0.0), Value::Integer(0)],
                vec![Value::Float(0.0), Value::Float(0.6), Value::Integer(1)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn creates_missing_directories_and_omits_index() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("data").join("processed").join("train_tfidf.csv");

        save_table(&feature_table(), &path, &LogContext::detached()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "cat,dog,label\n1.0,0.0,0\n0.0,0.6,1\n");
    }

    #[test]
    fn save_then_load_keeps_rows_and_labels() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("out.csv");
        let log = LogContext::detached();
        let table = feature_table();

        save_table(&table, &path, &log).unwrap();
        let loaded = load_table(&path, &log).unwrap();

        assert_eq!(loaded.len(), table.len());
        assert_eq!(loaded.column("label"), table.column("label"));
    }

    #[test]
    fn blocked_parent_is_io_error() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let err = save_table(
            &feature_table(),
            &blocker.join("out.csv"),
            &LogContext::detached(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
