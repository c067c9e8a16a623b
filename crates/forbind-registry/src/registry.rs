//! The entity registry.
//!
//! A [`Registry`] maps export names to [`Entity`] values. It is filled in one
//! explicit pass, either from the link-time [`Export`] records
//! ([`Registry::collect`]) or entity by entity ([`Registry::add`]), and is
//! read-only afterwards.
//!
//! Storage is an unordered hash map; every consumer that needs an order goes
//! through [`Registry::sorted`], which sorts by the byte values of the names.
//! Emission therefore never depends on registration order.

use std::borrow::Cow;

use rustc_hash::FxHashMap;

use forbind_core::Signature;

use crate::error::RegistrationError;
use crate::export::{Export, ExportKind};

/// A registered entity: one exported function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub kind: ExportKind,
    pub generic: Option<String>,
    pub signature: Signature,
}

impl Entity {
    pub fn plain(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            kind: ExportKind::Plain,
            generic: None,
            signature,
        }
    }

    pub fn wrapped(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            kind: ExportKind::Wrapped,
            ..Self::plain(name, signature)
        }
    }

    pub fn with_generic(mut self, generic: impl Into<String>) -> Self {
        self.generic = Some(generic.into());
        self
    }

    /// Check if the Fortran module gets an adapter for this entity.
    pub fn is_wrapped(&self) -> bool {
        self.kind == ExportKind::Wrapped
    }

    /// Name of the Fortran interface bound to the C symbol.
    pub fn binding_name(&self) -> Cow<'_, str> {
        match self.kind {
            ExportKind::Plain => Cow::Borrowed(&self.name),
            ExportKind::Wrapped => Cow::Owned(format!("{}_impl", self.name)),
        }
    }
}

impl From<&Export> for Entity {
    fn from(export: &Export) -> Self {
        Self {
            name: export.name.to_string(),
            kind: export.kind,
            generic: export.generic.map(str::to_string),
            signature: (export.signature)(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Registry of exported entities.
#[derive(Debug, Default)]
pub struct Registry {
    entities: FxHashMap<String, Entity>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every export record linked into the binary.
    pub fn collect() -> Result<Self, RegistrationError> {
        let mut registry = Self::new();
        for export in inventory::iter::<Export> {
            registry.add_export(export)?;
        }
        log::debug!("collected {} exports", registry.len());
        Ok(registry)
    }

    /// Register an entity.
    pub fn add(&mut self, entity: Entity) -> Result<(), RegistrationError> {
        if !is_identifier(&entity.name) {
            return Err(RegistrationError::InvalidName(entity.name));
        }
        if self.entities.contains_key(&entity.name) {
            return Err(RegistrationError::Duplicate(entity.name));
        }
        if let Some(generic) = &entity.generic {
            if !is_identifier(generic) {
                return Err(RegistrationError::InvalidGeneric(generic.clone()));
            }
            if generic == &entity.name || self.entities.contains_key(generic) {
                return Err(RegistrationError::GenericClash(generic.clone()));
            }
        }
        if self.has_generic(&entity.name) {
            return Err(RegistrationError::GenericClash(entity.name));
        }
        log::debug!("registering `{}` ({:?})", entity.name, entity.kind);
        self.entities.insert(entity.name.clone(), entity);
        Ok(())
    }

    fn has_generic(&self, name: &str) -> bool {
        self.entities.values().any(|entity| entity.generic.as_deref() == Some(name))
    }

    /// Register an export record.
    pub fn add_export(&mut self, export: &Export) -> Result<(), RegistrationError> {
        self.add(Entity::from(export))
    }

    /// Get an entity by name.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Check if an entity exists by name.
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in byte-lexicographic name order.
    pub fn sorted(&self) -> Vec<&Entity> {
        let mut entities: Vec<&Entity> = self.entities.values().collect();
        entities.sort_unstable_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        entities
    }

    /// Generic interfaces and their members, both sorted by name.
    pub fn generics(&self) -> Vec<(&str, Vec<&str>)> {
        let mut groups: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for entity in self.sorted() {
            if let Some(generic) = &entity.generic {
                groups.entry(generic.as_str()).or_default().push(entity.name.as_str());
            }
        }
        let mut generics: Vec<(&str, Vec<&str>)> = groups.into_iter().collect();
        generics.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        generics
    }
}
