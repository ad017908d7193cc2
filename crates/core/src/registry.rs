//! Named schema registry and forward references
//!
//! Schemas that refer to themselves (or to schemas defined later) use
//! [`Schema::Ref`] with a [`TypeRef`]. References are resolved through a
//! [`SchemaRegistry`] populated in an explicit registration phase.
//!
//! A `TypeRef` caches its first successful resolution; clones share the cache,
//! so a self-referential schema walks the registry at most once per reference.

use crate::error::{Error, Result};
use crate::schema::Schema;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Lazily resolved reference to a named schema
#[derive(Clone)]
pub struct TypeRef {
    name: Arc<str>,
    target: Arc<OnceCell<Schema>>,
}

impl TypeRef {
    /// Unresolved reference to `name`
    pub fn new(name: impl Into<String>) -> Self {
        TypeRef {
            name: Arc::from(name.into()),
            target: Arc::new(OnceCell::new()),
        }
    }

    /// Referenced schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the reference has been resolved
    pub fn is_resolved(&self) -> bool {
        self.target.get().is_some()
    }

    /// Resolve against a registry, caching the result
    pub fn resolve(&self, registry: &SchemaRegistry) -> Result<&Schema> {
        self.target.get_or_try_init(|| {
            registry
                .get(&self.name)
                .cloned()
                .ok_or_else(|| Error::UnresolvedReference(self.name.to_string()))
        })
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("name", &self.name)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Name → schema lookup used for forward references
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: FxHashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under a name
    pub fn register(&mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Result<()> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(Error::DuplicateSchema(name));
        }
        debug!(target: "podlayout::registry", name = %name, "Registered schema");
        self.schemas.insert(name, schema.into());
        Ok(())
    }

    /// Register a schema (builder pattern)
    pub fn with(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Result<Self> {
        self.register(name, schema)?;
        Ok(self)
    }

    /// Look up a schema by name
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Resolve a reference
    pub fn resolve<'r>(&self, reference: &'r TypeRef) -> Result<&'r Schema> {
        reference.resolve(self)
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Check that every reference reachable from a registered schema resolves
    pub fn validate(&self) -> Result<()> {
        let mut missing: Option<String> = None;
        for schema in self.schemas.values() {
            schema.visit_refs(&mut |r| {
                if missing.is_none() && !self.schemas.contains_key(r.name()) {
                    missing = Some(r.name().to_string());
                }
            });
            if let Some(name) = missing.take() {
                return Err(Error::UnresolvedReference(name));
            }
        }
        Ok(())
    }
}
