//! The bound configuration: a schema plus, once initialized, its values.
//!
//! A [`Config`] starts uninitialized. Every read fails with
//! [`StrictconfError::NotInitialized`] until [`Config::bind`] succeeds, and
//! binding is allowed exactly once. The bound state lives in a [`OnceLock`],
//! so the check-and-set is atomic and a `Config` can be shared between
//! threads, e.g. from a `static`:
//!
//! ```ignore
//! static CONFIG: LazyLock<Config> = LazyLock::new(|| Config::new(schema()));
//!
//! Strictconf::builder().file("app.toml").variant("prod").init(&CONFIG)?;
//! let port: u16 = CONFIG.section("server")?.get_as("port")?;
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::StrictconfError;
use crate::schema::{Compose, Section};
use crate::value::{Mapping, Value};

pub struct Config {
    schema: Compose,
    bound: OnceLock<HashMap<String, SectionValue>>,
    derived: Mutex<HashMap<u64, Arc<dyn Any + Send + Sync>>>,
}

impl Config {
    pub fn new(schema: Compose) -> Self {
        Self {
            schema,
            bound: OnceLock::new(),
            derived: Mutex::new(HashMap::new()),
        }
    }

    pub fn schema(&self) -> &Compose {
        &self.schema
    }

    pub fn is_initialized(&self) -> bool {
        self.bound.get().is_some()
    }

    /// Populate every section slot from composed data.
    ///
    /// `composed` maps section names to section data, as produced by
    /// [`compose`](crate::compose()). Fails with
    /// [`AlreadyInitialized`](StrictconfError::AlreadyInitialized) on every call
    /// after the first successful one, whatever the data.
    pub fn bind(&self, composed: &Mapping) -> Result<(), StrictconfError> {
        if self.is_initialized() {
            return Err(StrictconfError::AlreadyInitialized);
        }

        let mut sections = HashMap::new();
        for (field_id, section) in self.schema.sections() {
            let data = composed
                .get(section.name())
                .and_then(Value::as_mapping)
                .ok_or_else(|| StrictconfError::MissingEntry(section.name().to_string()))?;
            sections.insert(field_id.to_string(), SectionValue::new(section, data)?);
        }

        self.bound
            .set(sections)
            .map_err(|_| StrictconfError::AlreadyInitialized)?;
        debug!(sections = self.schema.sections().count(), "configuration bound");
        Ok(())
    }

    /// The bound values of the slot declared under `field_id`.
    pub fn section(&self, field_id: &str) -> Result<&SectionValue, StrictconfError> {
        let bound = self.bound.get().ok_or(StrictconfError::NotInitialized)?;
        bound
            .get(field_id)
            .ok_or_else(|| StrictconfError::UnknownSection(field_id.to_string()))
    }

    /// Shorthand for `section(section_id)?.get(key_id)`.
    pub fn get(&self, section_id: &str, key_id: &str) -> Result<&Value, StrictconfError> {
        self.section(section_id)?.get(key_id)
    }

    /// Memoised value of the [`Derived`] with id `id`, computed on a miss.
    ///
    /// `compute` runs without the lock held, so it may read other derived
    /// values of this config. When two callers race, the first stored value
    /// wins and both get it.
    fn derived_value<T: Send + Sync + 'static>(
        &self,
        id: u64,
        compute: impl FnOnce() -> Result<T, StrictconfError>,
    ) -> Result<Arc<T>, StrictconfError> {
        let cached = self.derived_cache().get(&id).cloned();
        if let Some(value) = cached.and_then(|v| v.downcast::<T>().ok()) {
            return Ok(value);
        }

        let value = Arc::new(compute()?);
        let stored = Arc::clone(
            self.derived_cache()
                .entry(id)
                .or_insert_with(|| Arc::clone(&value) as Arc<dyn Any + Send + Sync>),
        );
        Ok(stored.downcast::<T>().unwrap_or(value))
    }

    fn derived_cache(&self) -> std::sync::MutexGuard<'_, HashMap<u64, Arc<dyn Any + Send + Sync>>> {
        self.derived.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("schema", &self.schema)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Read-only values of one bound section, addressed by key field id.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionValue {
    name: String,
    values: Vec<(String, Value)>,
}

impl SectionValue {
    fn new(section: &Section, data: &Mapping) -> Result<Self, StrictconfError> {
        let values = section
            .keys()
            .map(|(field_id, key)| {
                data.get(key.name())
                    .map(|v| (field_id.to_string(), v.clone()))
                    .ok_or_else(|| {
                        StrictconfError::MissingEntry(format!("{}[{}]", section.name(), key.name()))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: section.name().to_string(),
            values,
        })
    }

    /// Name of the section this value was bound from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exactly the value found in the configuration.
    pub fn get(&self, field_id: &str) -> Result<&Value, StrictconfError> {
        self.values
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, v)| v)
            .ok_or_else(|| StrictconfError::UnknownKey {
                section: self.name.clone(),
                key: field_id.to_string(),
            })
    }

    /// Read a key into a Rust type.
    pub fn get_as<T: DeserializeOwned>(&self, field_id: &str) -> Result<T, StrictconfError> {
        let value = self.get(field_id)?;
        from_value(value).map_err(|e| StrictconfError::InvalidValue {
            key: format!("{}[{field_id}]", self.name),
            reason: e.to_string(),
        })
    }

    /// Read the whole section into a struct whose fields are the key field ids.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, StrictconfError> {
        let mapping: Mapping = self
            .values
            .iter()
            .map(|(id, v)| (id.as_str(), v.clone()))
            .collect();
        from_value(&Value::Mapping(mapping)).map_err(|e| StrictconfError::InvalidValue {
            key: self.name.clone(),
            reason: e.to_string(),
        })
    }
}

fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::to_value(value)?)
}

static NEXT_DERIVED_ID: AtomicU64 = AtomicU64::new(0);

/// A value computed from a bound [`Config`] on first access, then memoised
/// in that config.
///
/// One `Derived` serves any number of configs; each config keeps its own
/// value, computed from its own sections.
///
/// ```ignore
/// static DSN: Derived<String> = Derived::new(|config| {
///     let db = config.section("database")?;
///     Ok(format!("{}/{}", db.get_as::<String>("url")?, db.get_as::<String>("name")?))
/// });
///
/// let dsn = DSN.get(&CONFIG)?;
/// ```
pub struct Derived<T> {
    id: OnceLock<u64>,
    compute: fn(&Config) -> Result<T, StrictconfError>,
}

impl<T> Derived<T> {
    pub const fn new(compute: fn(&Config) -> Result<T, StrictconfError>) -> Self {
        Self {
            id: OnceLock::new(),
            compute,
        }
    }
}

impl<T: Send + Sync + 'static> Derived<T> {
    /// Compute on the first call for `config`; later calls for the same
    /// config return the stored value.
    pub fn get(&self, config: &Config) -> Result<Arc<T>, StrictconfError> {
        if !config.is_initialized() {
            return Err(StrictconfError::NotInitialized);
        }
        let id = *self
            .id
            .get_or_init(|| NEXT_DERIVED_ID.fetch_add(1, Ordering::Relaxed));
        config.derived_value(id, || (self.compute)(config))
    }
}
