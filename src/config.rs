use std::fs;
use std::path::Path;

use log::{debug, error};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::error::{ErrorKind, FeatureError, Result};
use crate::logging::LogContext;

/// Section of the parameter file consumed by this stage.
pub const SECTION: &str = "feature_engineering";

// ---------------------------------------------------------------------------
// Params – the whole parameter file
// ---------------------------------------------------------------------------

/// Parsed parameter file: a nested mapping of keys to values.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    root: Mapping,
}

impl Params {
    pub fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// Follow a key path through nested mappings.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(*first)?;
        for key in rest {
            node = node.as_mapping()?.get(*key)?;
        }
        Some(node)
    }

    /// Typed view of the `feature_engineering` section.
    pub fn feature_engineering(&self) -> Result<FeatureEngineeringParams> {
        let section = self
            .get(&[SECTION])
            .ok_or_else(|| FeatureError::MissingParameter(SECTION.to_string()))?;
        if !section.is_mapping() {
            return Err(FeatureError::InvalidParameter {
                key: SECTION.to_string(),
                reason: "expected a mapping".to_string(),
            });
        }

        let max_key = format!("{SECTION}.max_features");
        match section.get("max_features") {
            None | Some(Value::Null) => return Err(FeatureError::MissingParameter(max_key)),
            Some(v) if v.as_u64().map_or(true, |n| n == 0) => {
                return Err(FeatureError::InvalidParameter {
                    key: max_key,
                    reason: format!("expected a positive integer, got {v:?}"),
                });
            }
            Some(_) => {}
        }

        serde_yaml::from_value(section.clone()).map_err(|e| FeatureError::InvalidParameter {
            key: SECTION.to_string(),
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// FeatureEngineeringParams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureEngineeringParams {
    /// Upper bound on the fitted vocabulary size.
    pub max_features: usize,
    #[serde(default = "default_text_column")]
    pub text_column: String,
    #[serde(default = "default_target_column")]
    pub target_column: String,
}

fn default_text_column() -> String {
    "text".to_string()
}

fn default_target_column() -> String {
    "target".to_string()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the YAML parameter file at `path`.
///
/// Every failure is logged and returned; an unreadable file, an empty
/// document and a non-mapping root each surface as their own error instead of
/// a later missing-key lookup.
pub fn load_params(path: &Path, log: &LogContext) -> Result<Params> {
    let text = fs::read_to_string(path).map_err(|e| {
        let err = FeatureError::from_io(path, e);
        if err.kind() == ErrorKind::NotFound {
            error!(target: log.target(), "File not found: {}", path.display());
        } else {
            error!(target: log.target(), "Unexpected error: {err}");
        }
        err
    })?;

    let root: Value = serde_yaml::from_str(&text).map_err(|e| {
        error!(target: log.target(), "YAML error: {e}");
        FeatureError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    let root = match root {
        Value::Mapping(m) => m,
        Value::Null => {
            error!(target: log.target(), "Parameter file {} is empty", path.display());
            return Err(FeatureError::Parse {
                path: path.to_path_buf(),
                reason: "document is empty".to_string(),
            });
        }
        _ => {
            error!(target: log.target(), "Parameter file {} is not a mapping", path.display());
            return Err(FeatureError::Parse {
                path: path.to_path_buf(),
                reason: "top-level document is not a mapping".to_string(),
            });
        }
    };

    debug!(target: log.target(), "Parameters retrieved from {}", path.display());
    Ok(Params::from_mapping(root))
}
