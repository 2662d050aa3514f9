use std::path::PathBuf;

use crate::bind::Config;
use crate::error::StrictconfError;
use crate::file;
use crate::resolve::{self, ResolveInput};
use crate::schema::Compose;
use crate::types::Format;
use crate::value::Value;

/// Entry point for loading configuration files into a [`Config`].
pub struct Strictconf;

impl Strictconf {
    pub fn builder() -> StrictconfBuilder {
        StrictconfBuilder::new()
    }
}

/// Builder for reading, validating and binding configuration files.
///
/// ```ignore
/// Strictconf::builder()
///     .file("config/base.toml")
///     .file("config/local.toml")
///     .variant("prod")
///     .init(&CONFIG)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct StrictconfBuilder {
    files: Vec<PathBuf>,
    format: Option<Format>,
    separator: Option<String>,
    variant: Option<String>,
}

impl StrictconfBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Add a config file. Files are merged in the order added; later files
    /// replace top-level entries of earlier ones.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Add several config files, in order.
    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Force the format of every file (default: detect from each extension).
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Override the separator between slot names and variant labels.
    ///
    /// Defaults to the format's own convention, see [`Format::default_separator`].
    pub fn separator(mut self, sep: &str) -> Self {
        self.separator = Some(sep.to_string());
        self
    }

    /// Select the compose table `compose<sep><variant>`.
    pub fn variant(mut self, variant: &str) -> Self {
        self.variant = Some(variant.to_string());
        self
    }

    fn effective_variant(&self) -> Result<&str, StrictconfError> {
        self.variant
            .as_deref()
            .ok_or(StrictconfError::VariantRequired)
    }

    /// Explicit separator, else the convention of the explicit format, else of
    /// the first file, else `"."`.
    fn effective_separator(&self) -> &str {
        if let Some(sep) = &self.separator {
            return sep;
        }
        self.format
            .or_else(|| self.files.first().and_then(|p| Format::from_path(p)))
            .map(Format::default_separator)
            .unwrap_or(".")
    }

    /// Read and merge the files without validating them.
    pub fn read(&self) -> Result<Value, StrictconfError> {
        let files = file::read_files(&self.files)?;
        resolve::resolve_data(&ResolveInput {
            files,
            format: self.format,
        })
    }

    /// Read, validate, compose and bind into `config`.
    pub fn init(self, config: &Config) -> Result<(), StrictconfError> {
        let variant = self.effective_variant()?;
        let data = self.read()?;
        resolve::init(config, &data, variant, self.effective_separator())
    }

    /// Like [`init`](Self::init) but builds the [`Config`] from `schema`.
    pub fn load(self, schema: Compose) -> Result<Config, StrictconfError> {
        let config = Config::new(schema);
        self.init(&config)?;
        Ok(config)
    }
}
