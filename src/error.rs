//! Error types.
//!
//! Two families live here and they never mix:
//!
//! - **Data problems** ([`Violation`]) are found by validation, accumulated in
//!   discovery order and handed back as a batch ([`Violations`]). Each one is
//!   pinned to a [`Context`] so the config author knows where to look.
//! - **Failures** ([`StrictconfError`]) are everything else: unreadable or
//!   unparsable files, a rejected batch, and misuse of a [`Config`](crate::Config)
//!   such as binding it twice or reading it before it is bound.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Where in the logical configuration tree a problem was found.
///
/// `(None, None)` is the whole document, `(Some(section), None)` a whole
/// section and `(Some(section), Some(key))` a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Context {
    pub section: Option<String>,
    pub key: Option<String>,
}

impl Context {
    /// The whole document.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn section(section: impl Into<String>) -> Self {
        Self {
            section: Some(section.into()),
            key: None,
        }
    }

    pub fn key(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: Some(section.into()),
            key: Some(key.into()),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.section, &self.key) {
            (Some(section), Some(key)) => write!(f, "{section}[{key}]"),
            (Some(section), None) => write!(f, "{section}"),
            (None, Some(key)) => write!(f, "<config>[{key}]"),
            (None, None) => write!(f, "<config>"),
        }
    }
}

/// One problem in the submitted configuration data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub context: Context,
    pub message: String,
}

impl Violation {
    pub fn new(context: Context, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.context, self.message)
    }
}

/// A non-empty batch of violations, rendered as a multi-line report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, " - {violation}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum StrictconfError {
    #[error("Configuration is not valid\n{0}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(strictconf::invalid), help("every problem found is listed above"))
    )]
    Invalid(Violations),

    #[error("Config is already initialized")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(strictconf::already_initialized)))]
    AlreadyInitialized,

    #[error("Config is not initialized")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(strictconf::not_initialized)))]
    NotInitialized,

    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("Unknown key '{key}' in section '{section}'")]
    UnknownKey { section: String, key: String },

    #[error("Missing entry: {0}")]
    MissingEntry(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    YamlError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot tell the format of {0}; call .format() on the builder")]
    UnsupportedFormat(PathBuf),

    #[error("Variant is required; call .variant() on the builder")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(help("the variant selects which compose table is used"))
    )]
    VariantRequired,
}
