//! Reading and parsing configuration files.
//!
//! Files are read in the order given; a missing file is an error here, since
//! every path was named explicitly by the caller. Parsing is kept separate
//! from reading so the pipeline in [`resolve`](crate::resolve) can run on
//! in-memory content.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StrictconfError;
use crate::types::Format;
use crate::value::Value;

/// Read every file into memory, in order.
pub fn read_files(paths: &[PathBuf]) -> Result<Vec<(PathBuf, String)>, StrictconfError> {
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(path).map_err(|e| StrictconfError::IoError {
            path: path.clone(),
            source: e,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "read config file");
        results.push((path.clone(), content));
    }
    Ok(results)
}

/// Parse one document. `path` is only used for error reporting.
pub fn parse(format: Format, path: &Path, content: &str) -> Result<Value, StrictconfError> {
    match format {
        Format::Toml => toml::from_str(content).map_err(|e| StrictconfError::ParseError {
            path: path.to_path_buf(),
            source: e,
        }),
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| StrictconfError::YamlError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
