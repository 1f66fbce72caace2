//! Engine facade - cache management entry point for tooling and tests

use std::collections::HashMap;

use crate::relationships::descriptor::RelationshipDescriptor;
use crate::relationships::registry::{global_registry, MetadataRegistry};
use crate::scope::Scope;

/// Facade over a metadata registry, exposing the management surface used
/// for test isolation and runtime cache invalidation.
#[derive(Debug, Clone)]
pub struct Kinship {
    registry: MetadataRegistry,
}

impl Kinship {
    /// A facade over a specific registry.
    pub fn new(registry: MetadataRegistry) -> Self {
        Self { registry }
    }

    /// A facade over the process-wide registry.
    pub fn global() -> Self {
        Self::new(global_registry().clone())
    }

    /// The crate version.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// The registry behind this facade.
    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    /// Clear both metadata caches. Useful in tests or after model types
    /// change at runtime.
    pub fn clear_cache(&self) {
        self.registry.clear_all();
    }

    /// Clear the relationship cache only.
    pub fn clear_relationships_cache(&self) {
        self.registry.clear_relationships();
    }

    /// Clear the scope cache only.
    pub fn clear_scopes_cache(&self) {
        self.registry.clear_scopes();
    }

    /// Cached relationship descriptors for a model, keyed by resolved
    /// name; empty for an unresolved model.
    pub fn cached_relationships(&self, model: &str) -> HashMap<String, RelationshipDescriptor> {
        self.registry.cached_relationships(model)
    }

    /// Cached scopes for a model, keyed by scope name; empty for an
    /// unresolved model.
    pub fn cached_scopes(&self, model: &str) -> HashMap<String, Scope> {
        self.registry.cached_scopes(model)
    }
}

impl Default for Kinship {
    fn default() -> Self {
        Self::global()
    }
}
