use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{FeatureError, Result};

/// Component name stamped on every log line.
pub const COMPONENT: &str = "feature_engineering";

/// Explicit logging context for one pipeline run.
///
/// `init` installs the `env_logger` backend once, writing every record to
/// both stderr and `<log_dir>/feature_engineering.log`. Components receive the
/// context by reference and log under its target.
#[derive(Debug, Clone)]
pub struct LogContext {
    target: String,
    log_file: Option<PathBuf>,
}

impl LogContext {
    pub fn init(log_dir: &Path) -> Result<Self> {
        fs::create_dir_all(log_dir).map_err(|e| FeatureError::from_io(log_dir, e))?;
        let log_file = log_dir.join(format!("{COMPONENT}.log"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| FeatureError::from_io(&log_file, e))?;

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} - {} - {} - {}",
                    buf.timestamp_millis(),
                    record.target(),
                    record.level(),
                    record.args()
                )
            })
            .target(env_logger::Target::Pipe(Box::new(TeeWriter { file })))
            .try_init()?;

        Ok(Self {
            target: COMPONENT.to_string(),
            log_file: Some(log_file),
        })
    }

    /// A context that logs through whatever backend is already installed
    /// (none in unit tests).
    pub fn detached() -> Self {
        Self {
            target: COMPONENT.to_string(),
            log_file: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Duplicates log output to stderr and the log file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
