//! Host ORM capability traits consumed by the resolution engine
//!
//! The engine never builds SQL or loads rows itself; it drives these
//! traits, which the host ORM (or a test double) implements. Materialized
//! results are `serde_json::Value`: an array for collections, an object
//! for a single entity, `null` for no result.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ResolveResult;
use crate::relationships::registry::ModelMetadata;

/// A lazily-executable relation obtained from the host ORM.
pub trait RelationHandle: std::fmt::Debug + Send {
    /// Add a filter to the relation's underlying query; chainable.
    fn where_condition(
        self: Box<Self>,
        column: &str,
        operator: &str,
        value: Value,
    ) -> Box<dyn RelationHandle>;

    /// Execute the relation and materialize its results.
    fn get_results(&self) -> ResolveResult<Value>;
}

/// A query builder handle obtained from the host ORM.
pub trait QueryHandle: std::fmt::Debug + Send {
    /// Add a filter to the query; chainable.
    fn where_condition(
        self: Box<Self>,
        column: &str,
        operator: &str,
        value: Value,
    ) -> Box<dyn QueryHandle>;

    /// Execute the query and materialize its results.
    fn get_results(&self) -> ResolveResult<Value>;
}

/// Host ORM relation-construction capability, one operation per
/// relationship kind. Field meanings follow the descriptor structs in
/// [`crate::relationships::descriptor`]; `None` means "use the host's
/// default".
pub trait RelationBuilder {
    fn has_one(
        &self,
        related: &str,
        foreign_key: Option<&str>,
        local_key: Option<&str>,
    ) -> ResolveResult<Box<dyn RelationHandle>>;

    fn has_many(
        &self,
        related: &str,
        foreign_key: Option<&str>,
        local_key: Option<&str>,
    ) -> ResolveResult<Box<dyn RelationHandle>>;

    fn belongs_to(
        &self,
        related: &str,
        foreign_key: Option<&str>,
        owner_key: Option<&str>,
        relation: &str,
    ) -> ResolveResult<Box<dyn RelationHandle>>;

    #[allow(clippy::too_many_arguments)]
    fn belongs_to_many(
        &self,
        related: &str,
        table: Option<&str>,
        foreign_pivot_key: Option<&str>,
        related_pivot_key: Option<&str>,
        parent_key: Option<&str>,
        related_key: Option<&str>,
        relation: &str,
    ) -> ResolveResult<Box<dyn RelationHandle>>;

    fn has_one_through(
        &self,
        related: &str,
        through: &str,
        first_key: Option<&str>,
        second_key: Option<&str>,
        local_key: Option<&str>,
        second_local_key: Option<&str>,
    ) -> ResolveResult<Box<dyn RelationHandle>>;

    fn has_many_through(
        &self,
        related: &str,
        through: &str,
        first_key: Option<&str>,
        second_key: Option<&str>,
        local_key: Option<&str>,
        second_local_key: Option<&str>,
    ) -> ResolveResult<Box<dyn RelationHandle>>;

    fn morph_one(
        &self,
        related: &str,
        morph_name: &str,
        type_column: Option<&str>,
        id_column: Option<&str>,
        local_key: Option<&str>,
    ) -> ResolveResult<Box<dyn RelationHandle>>;

    fn morph_many(
        &self,
        related: &str,
        morph_name: &str,
        type_column: Option<&str>,
        id_column: Option<&str>,
        local_key: Option<&str>,
    ) -> ResolveResult<Box<dyn RelationHandle>>;

    fn morph_to(
        &self,
        morph_name: Option<&str>,
        type_column: Option<&str>,
        id_column: Option<&str>,
        owner_key: Option<&str>,
    ) -> ResolveResult<Box<dyn RelationHandle>>;

    #[allow(clippy::too_many_arguments)]
    fn morph_to_many(
        &self,
        related: &str,
        morph_name: &str,
        table: Option<&str>,
        foreign_pivot_key: Option<&str>,
        related_pivot_key: Option<&str>,
        parent_key: Option<&str>,
        related_key: Option<&str>,
        relation: Option<&str>,
        inverse: bool,
    ) -> ResolveResult<Box<dyn RelationHandle>>;
}

/// Host ORM query-construction capability.
pub trait QuerySource {
    /// A fresh, unconstrained query against the model's own table.
    fn new_query(&self) -> ResolveResult<Box<dyn QueryHandle>>;
}

/// A model instance the dispatch engine can resolve members against:
/// declares its metadata, exposes the host capabilities, and owns a
/// per-instance loaded-relation cache.
pub trait DeclarativeModel: ModelMetadata + RelationBuilder + QuerySource {
    fn loaded_relations(&self) -> &LoadedRelations;

    fn loaded_relations_mut(&mut self) -> &mut LoadedRelations;
}

/// Per-instance cache of materialized relation values, keyed by relation
/// name. Owned exclusively by its model instance and never
/// auto-invalidated; repeated reads hand back the same `Arc`.
#[derive(Debug, Clone, Default)]
pub struct LoadedRelations {
    relations: HashMap<String, Arc<Value>>,
}

impl LoadedRelations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a relation value has been loaded under this name.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    /// The cached value for a relation, if loaded.
    pub fn get(&self, name: &str) -> Option<Arc<Value>> {
        self.relations.get(name).cloned()
    }

    /// Cache a materialized relation value under a name.
    pub fn insert(&mut self, name: impl Into<String>, value: Arc<Value>) {
        self.relations.insert(name.into(), value);
    }

    /// Drop a single cached relation value.
    pub fn forget(&mut self, name: &str) -> Option<Arc<Value>> {
        self.relations.remove(name)
    }

    /// Drop all cached relation values.
    pub fn clear(&mut self) {
        self.relations.clear();
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loaded_relations_round_trip() {
        let mut relations = LoadedRelations::new();
        assert!(relations.is_empty());
        assert!(!relations.is_loaded("posts"));

        let value = Arc::new(json!([{"id": 1}]));
        relations.insert("posts", Arc::clone(&value));

        assert!(relations.is_loaded("posts"));
        assert_eq!(relations.len(), 1);

        let cached = relations.get("posts").unwrap();
        assert!(Arc::ptr_eq(&cached, &value));
    }

    #[test]
    fn test_forget_and_clear() {
        let mut relations = LoadedRelations::new();
        relations.insert("posts", Arc::new(json!([])));
        relations.insert("author", Arc::new(json!(null)));

        assert!(relations.forget("posts").is_some());
        assert!(!relations.is_loaded("posts"));
        assert!(relations.forget("posts").is_none());

        relations.clear();
        assert!(relations.is_empty());
    }
}
