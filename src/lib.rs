//! Declarative, type-checked configuration. Declare a schema, point at your
//! files, pick a variant, and read typed values back.
//!
//! ```ignore
//! let database = Section::builder("db")
//!     .key("url", Key::new("url", TypeDescriptor::string()))
//!     .key("replicas", Key::new("replicas", TypeDescriptor::sequence(TypeDescriptor::string())))
//!     .build();
//! let schema = Compose::builder().section("database", database).build();
//!
//! let config = Strictconf::builder()
//!     .file("app.toml")
//!     .variant("prod")
//!     .load(schema)?;
//!
//! let url: String = config.section("database")?.get_as("url")?;
//! ```
//!
//! # Variants and the compose table
//!
//! One file can hold several alternative versions of every section, e.g. a
//! local and a production database. A **compose table** picks one version of
//! each section, and the variant passed at load time picks the compose table:
//!
//! ```toml
//! [compose_prod]
//! db = "primary"
//!
//! [compose_dev]
//! db = "local"
//!
//! [db_primary]
//! url = "postgres://db.internal/app"
//! replicas = ["db-2.internal"]
//!
//! [db_local]
//! url = "postgres://localhost/app"
//! replicas = []
//! ```
//!
//! Loading with variant `prod` reads `compose_prod`, finds `db = "primary"`
//! and binds the `db_primary` table to the `database` slot. Sections that no
//! selected compose table refers to are ignored.
//!
//! The separator between the parts of a name depends on the format. TOML reads
//! a dot in a table header as nesting, so TOML files use `_` (`compose_prod`,
//! `db_primary`); YAML files use `.` (`compose.prod`, `db.primary`). Override
//! it with [`separator()`](StrictconfBuilder::separator).
//!
//! # Multiple files
//!
//! Files are merged in the order given. A later file replaces whole top-level
//! entries of earlier ones: the merge is shallow, so a local override file
//! must repeat every key of a section it touches.
//!
//! # Validation
//!
//! Before anything is bound, the merged tree is checked against the schema
//! and **every** problem is reported at once:
//!
//! ```text
//! Configuration is not valid
//!  - db_primary[url] => missing key
//!  - db_primary[replicas] => [1] - "integer" instead of "string"
//!  - compose_prod[cache] => "cache_big" not found
//! ```
//!
//! The structural levels (document, compose table, each selected section) are
//! checked top-down; a level is only inspected once the one above it is
//! sound. Within a level every slot and every key is checked. Key types are
//! [`TypeDescriptor`]s: scalars, `Optional`, `Sequence` and `Mapping`, nested
//! freely. Mismatches deep inside a value carry a path such as `['k'][1]`.
//!
//! The pieces are usable on their own: [`validate()`] returns the violations,
//! [`compose()`] builds the slot → section mapping, [`Config::bind`] binds it.
//! Loading uses [`compose_declared()`], which skips compose-table entries the
//! schema does not declare, so data that validates always binds.
//!
//! # Binding once
//!
//! A [`Config`] is bound exactly once. Reading before that fails with
//! [`StrictconfError::NotInitialized`]; binding again fails with
//! [`StrictconfError::AlreadyInitialized`]. Values derived from bound
//! sections can be memoised with [`Derived`].
//!
//! # Error handling
//!
//! Data problems are [`Violation`]s, collected into
//! [`StrictconfError::Invalid`]. Every other failure (I/O, syntax, misuse of
//! a `Config`) is its own [`StrictconfError`] variant. With the `rich-errors`
//! feature, errors implement `miette::Diagnostic`.
//!
//! # Logging
//!
//! The crate emits `tracing` events at debug level (files read, validation
//! results, binding) and never installs a subscriber.

pub mod error;
pub mod types;
pub mod value;

mod bind;
mod builder;
mod checker;
#[cfg(feature = "clap")]
mod cli;
mod compose;
mod file;
mod merge;
mod resolve;
mod schema;
mod validate;

#[cfg(test)]
mod fixtures;

pub use bind::{Config, Derived, SectionValue};
pub use builder::{Strictconf, StrictconfBuilder};
pub use checker::check;
#[cfg(feature = "clap")]
pub use cli::LoadArgs;
pub use compose::{compose, compose_declared};
pub use error::{Context, StrictconfError, Violation, Violations};
pub use schema::{Compose, ComposeBuilder, Key, Section, SectionBuilder};
pub use types::{CustomType, Format, ScalarType, TypeDescriptor};
pub use validate::{compose_key, validate, validate_section};
pub use value::{Mapping, Value};
