//! Type descriptors and file formats.
//!
//! A [`TypeDescriptor`] is the closed set of shapes a key's value may take.
//! Descriptors are built once, when the schema is declared, and never change.
//!
//! ```ignore
//! // Mapping[string, Sequence[integer]]
//! TypeDescriptor::mapping(TypeDescriptor::string(), TypeDescriptor::sequence(TypeDescriptor::integer()))
//! ```

use std::fmt;
use std::path::Path;

use crate::value::Value;

/// The expected shape of a configuration value.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    /// A primitive or opaque type, matched against the value's runtime type.
    Scalar(ScalarType),
    /// `null`, or a value conforming to the wrapped type.
    Optional(Box<TypeDescriptor>),
    /// A sequence whose every element conforms to the wrapped type.
    Sequence(Box<TypeDescriptor>),
    /// A mapping whose every key and value conform to the two wrapped types.
    Mapping(Box<TypeDescriptor>, Box<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn boolean() -> Self {
        TypeDescriptor::Scalar(ScalarType::Boolean)
    }

    pub fn integer() -> Self {
        TypeDescriptor::Scalar(ScalarType::Integer)
    }

    pub fn float() -> Self {
        TypeDescriptor::Scalar(ScalarType::Float)
    }

    pub fn string() -> Self {
        TypeDescriptor::Scalar(ScalarType::String)
    }

    /// Any sequence, elements unchecked.
    pub fn any_sequence() -> Self {
        TypeDescriptor::Scalar(ScalarType::AnySequence)
    }

    /// Any mapping, entries unchecked.
    pub fn any_mapping() -> Self {
        TypeDescriptor::Scalar(ScalarType::AnyMapping)
    }

    /// An opaque user type: `predicate` decides which values conform.
    pub fn custom(name: impl Into<String>, predicate: fn(&Value) -> bool) -> Self {
        TypeDescriptor::Scalar(ScalarType::Custom(CustomType {
            name: name.into(),
            predicate,
        }))
    }

    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(inner))
    }

    pub fn sequence(item: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(item))
    }

    pub fn mapping(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Mapping(Box::new(key), Box::new(value))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(scalar) => write!(f, "{}", scalar.name()),
            TypeDescriptor::Optional(inner) => write!(f, "Optional[{inner}]"),
            TypeDescriptor::Sequence(item) => write!(f, "Sequence[{item}]"),
            TypeDescriptor::Mapping(key, value) => write!(f, "Mapping[{key}, {value}]"),
        }
    }
}

/// Types checked by a single runtime-type test, without descending.
#[derive(Debug, Clone)]
pub enum ScalarType {
    Boolean,
    Integer,
    Float,
    String,
    AnySequence,
    AnyMapping,
    Custom(CustomType),
}

impl ScalarType {
    /// Whether `value`'s runtime type is this type.
    ///
    /// There is no numeric widening: booleans are not integers and integers
    /// are not floats.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ScalarType::Boolean => matches!(value, Value::Bool(_)),
            ScalarType::Integer => matches!(value, Value::Integer(_)),
            ScalarType::Float => matches!(value, Value::Float(_)),
            ScalarType::String => matches!(value, Value::String(_)),
            ScalarType::AnySequence => matches!(value, Value::Sequence(_)),
            ScalarType::AnyMapping => matches!(value, Value::Mapping(_)),
            ScalarType::Custom(custom) => (custom.predicate)(value),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ScalarType::Boolean => "boolean",
            ScalarType::Integer => "integer",
            ScalarType::Float => "float",
            ScalarType::String => "string",
            ScalarType::AnySequence => "sequence",
            ScalarType::AnyMapping => "mapping",
            ScalarType::Custom(custom) => &custom.name,
        }
    }
}

/// A named, user-defined scalar type.
#[derive(Debug, Clone)]
pub struct CustomType {
    pub name: String,
    pub predicate: fn(&Value) -> bool,
}

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
}

impl Format {
    /// Separator between a slot name and its variant label.
    ///
    /// TOML reads a dot in a table header as nesting, so TOML files spell
    /// `[compose_prod]` and `[db_primary]`; YAML keys may contain dots.
    pub fn default_separator(self) -> &'static str {
        match self {
            Format::Toml => "_",
            Format::Yaml => ".",
        }
    }

    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension()?.to_str()? {
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}
