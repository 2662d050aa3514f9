//! Core initialization pipeline: merge file contents, validate, compose, bind.
//!
//! Operates on pre-loaded data with no I/O, so the whole pipeline is testable
//! with synthetic inputs. Steps:
//!
//! 1. Parse each file in its format
//! 2. Shallow-merge the documents (later files override earlier top-level entries)
//! 3. Validate the merged tree against the schema for the requested variant
//! 4. Compose the selected sections
//! 5. Bind them into the [`Config`]

use std::path::PathBuf;

use tracing::debug;

use crate::bind::Config;
use crate::compose::compose_declared;
use crate::error::{StrictconfError, Violations};
use crate::file;
use crate::merge::merge_document;
use crate::types::Format;
use crate::validate::validate;
use crate::value::{Mapping, Value};

/// File contents to merge. No I/O happens here.
pub struct ResolveInput {
    /// File contents in precedence order: first = lowest priority, last = highest.
    pub files: Vec<(PathBuf, String)>,
    /// Format for every file. `None` means detect each file from its extension.
    pub format: Option<Format>,
}

/// Parse and merge every file into one raw tree.
///
/// With no files the result is an empty mapping.
pub fn resolve_data(input: &ResolveInput) -> Result<Value, StrictconfError> {
    let mut merged = Value::Mapping(Mapping::new());
    for (path, content) in &input.files {
        let format = match input.format {
            Some(format) => format,
            None => Format::from_path(path)
                .ok_or_else(|| StrictconfError::UnsupportedFormat(path.clone()))?,
        };
        let document = file::parse(format, path, content)?;
        merged = merge_document(merged, document);
    }
    debug!(files = input.files.len(), "merged config files");
    Ok(merged)
}

/// Validate `data` for `variant` and, when it is valid, bind it into `config`.
///
/// Every problem is reported at once in [`StrictconfError::Invalid`]; nothing
/// is bound in that case.
pub fn init(config: &Config, data: &Value, variant: &str, sep: &str) -> Result<(), StrictconfError> {
    if config.is_initialized() {
        return Err(StrictconfError::AlreadyInitialized);
    }
    let violations = validate(config.schema(), data, variant, sep);
    if !violations.is_empty() {
        return Err(StrictconfError::Invalid(Violations(violations)));
    }
    let composed = compose_declared(config.schema(), data, variant, sep)?;
    config.bind(&composed)
}
