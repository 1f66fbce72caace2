//! Metadata registry - per-model descriptor caches with one-time resolution
//!
//! Declarations are extracted from a model type exactly once per cache
//! lifetime and stored process-wide. Relationship and scope caches are
//! independent. The check-then-populate step goes through `DashMap`'s
//! entry API, so concurrent first use of the same model resolves once.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

use super::descriptor::RelationshipDescriptor;
use super::name::resolve_relation_name;
use crate::scope::Scope;

/// Static declaration source for a model type.
///
/// This replaces runtime attribute reflection: each model returns its
/// declarative metadata table once, and the registry caches the resolved
/// result under `model_name()`.
pub trait ModelMetadata {
    /// Stable identity for the declaring type, e.g. `"Author"`.
    fn model_name() -> &'static str
    where
        Self: Sized;

    /// Relationship declarations, in declaration order.
    fn relationship_declarations() -> Vec<RelationshipDeclaration>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Scope declarations, in declaration order.
    fn scope_declarations() -> Vec<Scope>
    where
        Self: Sized,
    {
        Vec::new()
    }
}

/// One relationship declaration: a descriptor attached either to the model
/// type itself or to one of its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipDeclaration {
    descriptor: RelationshipDescriptor,
    field: Option<String>,
}

impl RelationshipDeclaration {
    /// A declaration attached to the model type.
    pub fn on_class(descriptor: impl Into<RelationshipDescriptor>) -> Self {
        Self {
            descriptor: descriptor.into(),
            field: None,
        }
    }

    /// A declaration attached to a named field of the model.
    pub fn on_field(
        field: impl Into<String>,
        descriptor: impl Into<RelationshipDescriptor>,
    ) -> Self {
        Self {
            descriptor: descriptor.into(),
            field: Some(field.into()),
        }
    }

    pub fn descriptor(&self) -> &RelationshipDescriptor {
        &self.descriptor
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// The name this declaration is cached under.
    ///
    /// Field declarations use the explicit name or fall back to the field
    /// name verbatim; class declarations go through name inference.
    pub fn resolved_name(&self) -> String {
        match &self.field {
            Some(field) => self
                .descriptor
                .custom_name()
                .map(str::to_string)
                .unwrap_or_else(|| field.clone()),
            None => resolve_relation_name(&self.descriptor),
        }
    }
}

/// Process-wide caches of resolved model metadata.
///
/// Cloning shares the underlying maps; a clone observes and affects the
/// same cached state.
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    /// model name -> relation name -> descriptor
    relationships: Arc<DashMap<String, HashMap<String, RelationshipDescriptor>>>,

    /// model name -> scope name -> scope
    scopes: Arc<DashMap<String, HashMap<String, Scope>>>,
}

impl MetadataRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and cache the declarations of a model type.
    ///
    /// Idempotent: once a model has cache entries, later calls return
    /// without re-extracting. Colliding resolved names overwrite earlier
    /// entries (last write wins); no uniqueness error is raised.
    pub fn ensure_resolved<M: ModelMetadata>(&self) {
        let model = M::model_name();

        self.relationships
            .entry(model.to_string())
            .or_insert_with(|| {
                tracing::debug!("Resolving relationship declarations for model '{}'", model);

                let mut resolved = HashMap::new();
                for declaration in M::relationship_declarations() {
                    resolved.insert(declaration.resolved_name(), declaration.descriptor);
                }
                resolved
            });

        self.scopes.entry(model.to_string()).or_insert_with(|| {
            tracing::debug!("Resolving scope declarations for model '{}'", model);

            M::scope_declarations()
                .into_iter()
                .map(|scope| (scope.name().to_string(), scope))
                .collect()
        });
    }

    /// Whether a model's declarations have been resolved.
    pub fn is_resolved(&self, model: &str) -> bool {
        self.relationships.contains_key(model)
    }

    /// A cached relationship descriptor by model and relation name.
    pub fn relationship(&self, model: &str, name: &str) -> Option<RelationshipDescriptor> {
        self.relationships.get(model)?.get(name).cloned()
    }

    /// A cached scope by model and scope name.
    pub fn scope(&self, model: &str, name: &str) -> Option<Scope> {
        self.scopes.get(model)?.get(name).cloned()
    }

    /// Whether a relationship is cached under this name.
    pub fn has_relationship(&self, model: &str, name: &str) -> bool {
        self.relationships
            .get(model)
            .map(|relationships| relationships.contains_key(name))
            .unwrap_or(false)
    }

    /// Whether a scope is cached under this name.
    pub fn has_scope(&self, model: &str, name: &str) -> bool {
        self.scopes
            .get(model)
            .map(|scopes| scopes.contains_key(name))
            .unwrap_or(false)
    }

    /// All cached relation names for a model.
    pub fn relationship_names(&self, model: &str) -> Vec<String> {
        self.relationships
            .get(model)
            .map(|relationships| relationships.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All cached relationship descriptors for a model; empty when the
    /// model has never been resolved.
    pub fn cached_relationships(&self, model: &str) -> HashMap<String, RelationshipDescriptor> {
        self.relationships
            .get(model)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// All cached scopes for a model; empty when the model has never been
    /// resolved.
    pub fn cached_scopes(&self, model: &str) -> HashMap<String, Scope> {
        self.scopes
            .get(model)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Drop every cached relationship descriptor. The next `ensure_resolved`
    /// call re-extracts.
    pub fn clear_relationships(&self) {
        self.relationships.clear();
    }

    /// Drop every cached scope.
    pub fn clear_scopes(&self) {
        self.scopes.clear();
    }

    /// Drop both caches.
    pub fn clear_all(&self) {
        self.clear_relationships();
        self.clear_scopes();
    }
}

/// Global registry instance for the process.
static GLOBAL_REGISTRY: std::sync::OnceLock<MetadataRegistry> = std::sync::OnceLock::new();

/// Get the process-wide metadata registry.
pub fn global_registry() -> &'static MetadataRegistry {
    GLOBAL_REGISTRY.get_or_init(MetadataRegistry::new)
}
