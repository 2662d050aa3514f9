//! Schema declaration: keys, sections and the top-level composition.
//!
//! A schema is built once with the builders below and is immutable afterwards.
//! Two names are tracked for every entry:
//!
//! - the **field id**, the name application code reads the value back by, and
//! - the **config name**, the name that appears in configuration files.
//!
//! For keys these are `field_id` and [`Key::name`]; for sections the field id
//! is the slot in the [`Compose`] and the config name is [`Section::name`].
//!
//! Schemas extend one another: [`SectionBuilder::extend`] and
//! [`ComposeBuilder::extend`] copy the parent's entries first. A child entry
//! with the same field id replaces the parent's entry in place; nothing is
//! ever removed.
//!
//! ```ignore
//! let database = Section::builder("db")
//!     .key("url", Key::new("url", TypeDescriptor::string()))
//!     .key("pool", Key::new("pool_size", TypeDescriptor::optional(TypeDescriptor::integer())))
//!     .build();
//!
//! let schema = Compose::builder().section("database", database).build();
//! ```

use crate::types::TypeDescriptor;

/// One configurable field inside a section.
#[derive(Debug, Clone)]
pub struct Key {
    name: String,
    ty: TypeDescriptor,
}

impl Key {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Name of the key in configuration files.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }
}

/// A named record schema for one configuration concern.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    keys: Vec<(String, Key)>,
}

impl Section {
    pub fn builder(name: impl Into<String>) -> SectionBuilder {
        SectionBuilder {
            name: name.into(),
            keys: Vec::new(),
        }
    }

    /// Name of the section slot in the compose table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(field_id, key)` pairs in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &Key)> {
        self.keys.iter().map(|(id, key)| (id.as_str(), key))
    }

    pub fn key(&self, field_id: &str) -> Option<&Key> {
        self.keys
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, key)| key)
    }
}

pub struct SectionBuilder {
    name: String,
    keys: Vec<(String, Key)>,
}

impl SectionBuilder {
    /// Declare a key, readable after binding under `field_id`.
    pub fn key(mut self, field_id: impl Into<String>, key: Key) -> Self {
        upsert(&mut self.keys, field_id.into(), key);
        self
    }

    /// Inherit every key of `parent`. Keys declared on this builder, before or
    /// after the call, win over the parent's keys with the same field id.
    pub fn extend(mut self, parent: &Section) -> Self {
        let own = std::mem::take(&mut self.keys);
        self.keys = parent.keys.clone();
        for (id, key) in own {
            upsert(&mut self.keys, id, key);
        }
        self
    }

    pub fn build(self) -> Section {
        Section {
            name: self.name,
            keys: self.keys,
        }
    }
}

/// The top-level schema: named slots, each backed by a [`Section`].
#[derive(Debug, Clone, Default)]
pub struct Compose {
    sections: Vec<(String, Section)>,
}

impl Compose {
    pub fn builder() -> ComposeBuilder {
        ComposeBuilder {
            sections: Vec::new(),
        }
    }

    /// `(field_id, section)` pairs in declaration order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(id, s)| (id.as_str(), s))
    }

    pub fn section(&self, field_id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, s)| s)
    }
}

pub struct ComposeBuilder {
    sections: Vec<(String, Section)>,
}

impl ComposeBuilder {
    /// Declare a section slot, readable after binding under `field_id`.
    pub fn section(mut self, field_id: impl Into<String>, section: Section) -> Self {
        upsert(&mut self.sections, field_id.into(), section);
        self
    }

    /// Inherit every slot of `parent`; same precedence as [`SectionBuilder::extend`].
    pub fn extend(mut self, parent: &Compose) -> Self {
        let own = std::mem::take(&mut self.sections);
        self.sections = parent.sections.clone();
        for (id, section) in own {
            upsert(&mut self.sections, id, section);
        }
        self
    }

    pub fn build(self) -> Compose {
        Compose {
            sections: self.sections,
        }
    }
}

fn upsert<T>(entries: &mut Vec<(String, T)>, id: String, item: T) {
    match entries.iter_mut().find(|(existing, _)| *existing == id) {
        Some((_, slot)) => *slot = item,
        None => entries.push((id, item)),
    }
}
