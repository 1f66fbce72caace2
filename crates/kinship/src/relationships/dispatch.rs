//! Member dispatch - explicit resolution of declared members on a model
//!
//! Two entry points replace dynamic member interception: `query` returns
//! an unexecuted handle (method-call style) and `get` executes and caches
//! on the instance (property-read style). Scopes always resolve to a
//! fresh query and take priority over relationships of the same name.
//! An unknown member resolves to `NotFound`; the host's own fallback
//! behavior stays with the caller and is never swallowed here.

use std::sync::Arc;

use serde_json::Value;

use super::registry::{global_registry, MetadataRegistry, ModelMetadata};
use super::resolver::resolve_relationship;
use crate::error::ResolveResult;
use crate::model::{DeclarativeModel, QueryHandle, QuerySource, RelationHandle};
use crate::scope::Scope;

/// Outcome of a method-call style member resolution.
#[derive(Debug)]
pub enum ResolvedQuery {
    /// The member named a scope; a fresh query with its predicate applied.
    Scope(Box<dyn QueryHandle>),
    /// The member named a relationship; unexecuted, open to further
    /// constraining by the caller.
    Relation(Box<dyn RelationHandle>),
    /// No declared member under this name.
    NotFound,
}

/// Outcome of a property-read style member resolution.
#[derive(Debug)]
pub enum ResolvedValue {
    /// The member named a scope; scopes resolve to queries in either
    /// call style.
    Scope(Box<dyn QueryHandle>),
    /// Materialized relation value, cached on the instance.
    Loaded(Arc<Value>),
    /// No declared member under this name.
    NotFound,
}

/// Resolves member names against a registry's cached metadata.
#[derive(Debug, Clone, Copy)]
pub struct MemberResolver<'a> {
    registry: &'a MetadataRegistry,
}

impl<'a> MemberResolver<'a> {
    pub fn new(registry: &'a MetadataRegistry) -> Self {
        Self { registry }
    }

    /// A resolver over the process-wide registry.
    pub fn with_global() -> MemberResolver<'static> {
        MemberResolver::new(global_registry())
    }

    /// The registry this resolver consults.
    pub fn registry(&self) -> &'a MetadataRegistry {
        self.registry
    }

    /// Method-call style resolution: scopes yield a constrained query,
    /// relationships yield an unexecuted relation handle.
    pub fn query<M: DeclarativeModel>(
        &self,
        model: &M,
        member: &str,
    ) -> ResolveResult<ResolvedQuery> {
        self.registry.ensure_resolved::<M>();

        if let Some(scope) = self.registry.scope(M::model_name(), member) {
            return Ok(ResolvedQuery::Scope(apply_scope(model, &scope)?));
        }

        if let Some(descriptor) = self.registry.relationship(M::model_name(), member) {
            let relation = resolve_relationship(model, &descriptor)?;
            return Ok(ResolvedQuery::Relation(relation));
        }

        Ok(ResolvedQuery::NotFound)
    }

    /// Property-read style resolution: relationship values are
    /// materialized once per instance and then served from the
    /// instance's loaded-relation cache.
    pub fn get<M: DeclarativeModel>(
        &self,
        model: &mut M,
        member: &str,
    ) -> ResolveResult<ResolvedValue> {
        self.registry.ensure_resolved::<M>();

        if let Some(scope) = self.registry.scope(M::model_name(), member) {
            return Ok(ResolvedValue::Scope(apply_scope(model, &scope)?));
        }

        if let Some(descriptor) = self.registry.relationship(M::model_name(), member) {
            if let Some(loaded) = model.loaded_relations().get(member) {
                tracing::trace!("Serving relation '{}' from instance cache", member);
                return Ok(ResolvedValue::Loaded(loaded));
            }

            let relation = resolve_relationship(model, &descriptor)?;
            let results = Arc::new(relation.get_results()?);
            model
                .loaded_relations_mut()
                .insert(member, Arc::clone(&results));
            return Ok(ResolvedValue::Loaded(results));
        }

        Ok(ResolvedValue::NotFound)
    }

    /// Scope-only entry point that needs no full model value, for
    /// static-style scope calls made with just a query source.
    pub fn scope_query<M: ModelMetadata>(
        &self,
        source: &dyn QuerySource,
        member: &str,
    ) -> ResolveResult<Option<Box<dyn QueryHandle>>> {
        self.registry.ensure_resolved::<M>();

        match self.registry.scope(M::model_name(), member) {
            Some(scope) => Ok(Some(apply_scope(source, &scope)?)),
            None => Ok(None),
        }
    }
}

/// A fresh query against the model's table with the scope's single
/// predicate applied.
fn apply_scope(source: &dyn QuerySource, scope: &Scope) -> ResolveResult<Box<dyn QueryHandle>> {
    let query = source.new_query()?;
    Ok(query.where_condition(scope.column(), scope.operator(), scope.value().clone()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{LoadedRelations, RelationBuilder};
    use crate::relationships::descriptor::HasMany;
    use crate::relationships::registry::{ModelMetadata, RelationshipDeclaration};

    /// A relation that counts executions and returns a fixed payload.
    #[derive(Debug)]
    struct StubRelation {
        payload: Value,
        filters: Vec<(String, String, Value)>,
    }

    impl RelationHandle for StubRelation {
        fn where_condition(
            mut self: Box<Self>,
            column: &str,
            operator: &str,
            value: Value,
        ) -> Box<dyn RelationHandle> {
            self.filters
                .push((column.to_string(), operator.to_string(), value));
            self
        }

        fn get_results(&self) -> ResolveResult<Value> {
            Ok(self.payload.clone())
        }
    }

    #[derive(Debug)]
    struct StubQuery {
        filters: Vec<(String, String, Value)>,
    }

    impl QueryHandle for StubQuery {
        fn where_condition(
            mut self: Box<Self>,
            column: &str,
            operator: &str,
            value: Value,
        ) -> Box<dyn QueryHandle> {
            self.filters
                .push((column.to_string(), operator.to_string(), value));
            self
        }

        fn get_results(&self) -> ResolveResult<Value> {
            let filters: Vec<Value> = self
                .filters
                .iter()
                .map(|(column, operator, value)| json!([column, operator, value]))
                .collect();
            Ok(json!({"query_filters": filters}))
        }
    }

    /// Model declaring both a scope and a relationship named "featured".
    #[derive(Debug, Default)]
    struct Post {
        relations: LoadedRelations,
    }

    impl ModelMetadata for Post {
        fn model_name() -> &'static str {
            "DispatchPost"
        }

        fn relationship_declarations() -> Vec<RelationshipDeclaration> {
            vec![
                RelationshipDeclaration::on_class(HasMany::new("Comment")),
                RelationshipDeclaration::on_class(HasMany::new("Comment").with_name("featured")),
            ]
        }

        fn scope_declarations() -> Vec<Scope> {
            vec![Scope::new("featured", "featured", true)]
        }
    }

    impl RelationBuilder for Post {
        fn has_one(
            &self,
            _related: &str,
            _foreign_key: Option<&str>,
            _local_key: Option<&str>,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            unreachable!("not declared")
        }

        fn has_many(
            &self,
            related: &str,
            _foreign_key: Option<&str>,
            _local_key: Option<&str>,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            Ok(Box::new(StubRelation {
                payload: json!([{"related": related}]),
                filters: Vec::new(),
            }))
        }

        fn belongs_to(
            &self,
            _related: &str,
            _foreign_key: Option<&str>,
            _owner_key: Option<&str>,
            _relation: &str,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            unreachable!("not declared")
        }

        fn belongs_to_many(
            &self,
            _related: &str,
            _table: Option<&str>,
            _foreign_pivot_key: Option<&str>,
            _related_pivot_key: Option<&str>,
            _parent_key: Option<&str>,
            _related_key: Option<&str>,
            _relation: &str,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            unreachable!("not declared")
        }

        fn has_one_through(
            &self,
            _related: &str,
            _through: &str,
            _first_key: Option<&str>,
            _second_key: Option<&str>,
            _local_key: Option<&str>,
            _second_local_key: Option<&str>,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            unreachable!("not declared")
        }

        fn has_many_through(
            &self,
            _related: &str,
            _through: &str,
            _first_key: Option<&str>,
            _second_key: Option<&str>,
            _local_key: Option<&str>,
            _second_local_key: Option<&str>,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            unreachable!("not declared")
        }

        fn morph_one(
            &self,
            _related: &str,
            _morph_name: &str,
            _type_column: Option<&str>,
            _id_column: Option<&str>,
            _local_key: Option<&str>,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            unreachable!("not declared")
        }

        fn morph_many(
            &self,
            _related: &str,
            _morph_name: &str,
            _type_column: Option<&str>,
            _id_column: Option<&str>,
            _local_key: Option<&str>,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            unreachable!("not declared")
        }

        fn morph_to(
            &self,
            _morph_name: Option<&str>,
            _type_column: Option<&str>,
            _id_column: Option<&str>,
            _owner_key: Option<&str>,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            unreachable!("not declared")
        }

        fn morph_to_many(
            &self,
            _related: &str,
            _morph_name: &str,
            _table: Option<&str>,
            _foreign_pivot_key: Option<&str>,
            _related_pivot_key: Option<&str>,
            _parent_key: Option<&str>,
            _related_key: Option<&str>,
            _relation: Option<&str>,
            _inverse: bool,
        ) -> ResolveResult<Box<dyn RelationHandle>> {
            unreachable!("not declared")
        }
    }

    impl QuerySource for Post {
        fn new_query(&self) -> ResolveResult<Box<dyn QueryHandle>> {
            Ok(Box::new(StubQuery {
                filters: Vec::new(),
            }))
        }
    }

    impl DeclarativeModel for Post {
        fn loaded_relations(&self) -> &LoadedRelations {
            &self.relations
        }

        fn loaded_relations_mut(&mut self) -> &mut LoadedRelations {
            &mut self.relations
        }
    }

    #[test]
    fn test_scope_takes_priority_over_relationship() {
        let registry = MetadataRegistry::new();
        let resolver = MemberResolver::new(&registry);
        let mut post = Post::default();

        // Both a scope and a relationship are declared under "featured";
        // the scope wins in both call styles.
        match resolver.query(&post, "featured").unwrap() {
            ResolvedQuery::Scope(query) => {
                let result = query.get_results().unwrap();
                assert_eq!(result["query_filters"], json!([["featured", "=", true]]));
            }
            other => panic!("expected scope, got {:?}", other),
        }

        match resolver.get(&mut post, "featured").unwrap() {
            ResolvedValue::Scope(_) => {}
            other => panic!("expected scope, got {:?}", other),
        }
    }

    #[test]
    fn test_method_style_returns_unexecuted_relation() {
        let registry = MetadataRegistry::new();
        let resolver = MemberResolver::new(&registry);
        let post = Post::default();

        match resolver.query(&post, "comments").unwrap() {
            ResolvedQuery::Relation(relation) => {
                // Caller can keep constraining before execution
                let relation = relation.where_condition("approved", "=", json!(true));
                assert_eq!(relation.get_results().unwrap(), json!([{"related": "Comment"}]));
            }
            other => panic!("expected relation, got {:?}", other),
        }
    }

    #[test]
    fn test_property_style_memoizes_per_instance() {
        let registry = MetadataRegistry::new();
        let resolver = MemberResolver::new(&registry);
        let mut post = Post::default();

        let first = match resolver.get(&mut post, "comments").unwrap() {
            ResolvedValue::Loaded(value) => value,
            other => panic!("expected loaded value, got {:?}", other),
        };
        let second = match resolver.get(&mut post, "comments").unwrap() {
            ResolvedValue::Loaded(value) => value,
            other => panic!("expected loaded value, got {:?}", other),
        };

        assert!(Arc::ptr_eq(&first, &second));

        // A different instance loads its own copy
        let mut other_post = Post::default();
        let third = match resolver.get(&mut other_post, "comments").unwrap() {
            ResolvedValue::Loaded(value) => value,
            other => panic!("expected loaded value, got {:?}", other),
        };
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);
    }

    #[test]
    fn test_unknown_member_resolves_not_found() {
        let registry = MetadataRegistry::new();
        let resolver = MemberResolver::new(&registry);
        let mut post = Post::default();

        assert!(matches!(
            resolver.query(&post, "nonexistent").unwrap(),
            ResolvedQuery::NotFound
        ));
        assert!(matches!(
            resolver.get(&mut post, "nonexistent").unwrap(),
            ResolvedValue::NotFound
        ));
    }

    #[test]
    fn test_scope_query_without_model_value() {
        let registry = MetadataRegistry::new();
        let resolver = MemberResolver::new(&registry);
        let post = Post::default();

        let query = resolver
            .scope_query::<Post>(&post, "featured")
            .unwrap()
            .expect("declared scope");
        let result = query.get_results().unwrap();
        assert_eq!(result["query_filters"], json!([["featured", "=", true]]));

        assert!(resolver
            .scope_query::<Post>(&post, "comments")
            .unwrap()
            .is_none());
    }
}
