//! Relation resolver - turns a descriptor into a host ORM relation handle
//!
//! Dispatch is an exhaustive match on the descriptor sum type, so every
//! kind has a construction rule; unsupported kinds can only arise at the
//! wire boundary (`RelationshipKind::parse`). The resolver trusts
//! `related`, `through`, and key names as-is; malformed ones surface as
//! host ORM errors, which propagate here unchanged.

use super::descriptor::RelationshipDescriptor;
use super::name::{class_basename, lower_camel, pluralize};
use crate::error::ResolveResult;
use crate::model::{RelationBuilder, RelationHandle};

/// Resolve a descriptor against a model instance's relation-construction
/// capability, then apply the descriptor's equality constraints in
/// insertion order.
pub fn resolve_relationship(
    model: &dyn RelationBuilder,
    descriptor: &RelationshipDescriptor,
) -> ResolveResult<Box<dyn RelationHandle>> {
    let mut relation = match descriptor {
        RelationshipDescriptor::HasOne(config) => model.has_one(
            &config.related,
            config.foreign_key.as_deref(),
            config.local_key.as_deref(),
        )?,
        RelationshipDescriptor::HasMany(config) => model.has_many(
            &config.related,
            config.foreign_key.as_deref(),
            config.local_key.as_deref(),
        )?,
        RelationshipDescriptor::BelongsTo(config) => {
            // Without an explicit relation we guess it from the related
            // identifier, the same inference the name resolver uses.
            let relation = match &config.relation {
                Some(relation) => relation.clone(),
                None => lower_camel(class_basename(&config.related)),
            };

            model.belongs_to(
                &config.related,
                config.foreign_key.as_deref(),
                config.owner_key.as_deref(),
                &relation,
            )?
        }
        RelationshipDescriptor::BelongsToMany(config) => {
            let relation = match &config.relation {
                Some(relation) => relation.clone(),
                None => pluralize(&lower_camel(class_basename(&config.related))),
            };

            model.belongs_to_many(
                &config.related,
                config.table.as_deref(),
                config.foreign_pivot_key.as_deref(),
                config.related_pivot_key.as_deref(),
                config.parent_key.as_deref(),
                config.related_key.as_deref(),
                &relation,
            )?
        }
        RelationshipDescriptor::HasOneThrough(config) => model.has_one_through(
            &config.related,
            &config.through,
            config.first_key.as_deref(),
            config.second_key.as_deref(),
            config.local_key.as_deref(),
            config.second_local_key.as_deref(),
        )?,
        RelationshipDescriptor::HasManyThrough(config) => model.has_many_through(
            &config.related,
            &config.through,
            config.first_key.as_deref(),
            config.second_key.as_deref(),
            config.local_key.as_deref(),
            config.second_local_key.as_deref(),
        )?,
        RelationshipDescriptor::MorphOne(config) => model.morph_one(
            &config.related,
            &config.morph_name,
            config.type_column.as_deref(),
            config.id_column.as_deref(),
            config.local_key.as_deref(),
        )?,
        RelationshipDescriptor::MorphMany(config) => model.morph_many(
            &config.related,
            &config.morph_name,
            config.type_column.as_deref(),
            config.id_column.as_deref(),
            config.local_key.as_deref(),
        )?,
        RelationshipDescriptor::MorphTo(config) => model.morph_to(
            config.morph_name.as_deref(),
            config.type_column.as_deref(),
            config.id_column.as_deref(),
            config.owner_key.as_deref(),
        )?,
        RelationshipDescriptor::MorphToMany(config) => model.morph_to_many(
            &config.related,
            &config.morph_name,
            config.table.as_deref(),
            config.foreign_pivot_key.as_deref(),
            config.related_pivot_key.as_deref(),
            config.parent_key.as_deref(),
            config.related_key.as_deref(),
            config.relation.as_deref(),
            config.inverse,
        )?,
    };

    for (column, value) in descriptor.constraints() {
        relation = relation.where_condition(column, "=", value.clone());
    }

    Ok(relation)
}
