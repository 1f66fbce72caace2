//! Relationship descriptors - immutable declarations of model associations
//!
//! One config struct per relationship kind, wrapped in the
//! `RelationshipDescriptor` sum type. Because dispatch is on the enum,
//! an unsupported kind can only appear at the string-parsing boundary
//! (`RelationshipKind::parse`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ResolveError, ResolveResult};

/// Ordered column => value equality constraints attached to a descriptor.
///
/// Insertion order is preserved; equality filters commute, so order only
/// affects the presentation order of the filter list.
pub type Constraints = Vec<(String, Value)>;

/// The ten supported relationship kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    BelongsTo,
    BelongsToMany,
    HasOne,
    HasMany,
    HasOneThrough,
    HasManyThrough,
    MorphOne,
    MorphMany,
    MorphTo,
    MorphToMany,
}

impl RelationshipKind {
    /// All supported kinds, in declaration order.
    pub const ALL: [RelationshipKind; 10] = [
        Self::BelongsTo,
        Self::BelongsToMany,
        Self::HasOne,
        Self::HasMany,
        Self::HasOneThrough,
        Self::HasManyThrough,
        Self::MorphOne,
        Self::MorphMany,
        Self::MorphTo,
        Self::MorphToMany,
    ];

    /// The camelCase wire name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BelongsTo => "belongsTo",
            Self::BelongsToMany => "belongsToMany",
            Self::HasOne => "hasOne",
            Self::HasMany => "hasMany",
            Self::HasOneThrough => "hasOneThrough",
            Self::HasManyThrough => "hasManyThrough",
            Self::MorphOne => "morphOne",
            Self::MorphMany => "morphMany",
            Self::MorphTo => "morphTo",
            Self::MorphToMany => "morphToMany",
        }
    }

    /// Parse a wire name back into a kind.
    ///
    /// This is the only place an unsupported kind can enter the system;
    /// the error carries the unrecognized string verbatim.
    pub fn parse(value: &str) -> ResolveResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ResolveError::unsupported_kind(value))
    }

    /// Returns true if this kind is polymorphic
    pub fn is_polymorphic(self) -> bool {
        matches!(
            self,
            Self::MorphOne | Self::MorphMany | Self::MorphTo | Self::MorphToMany
        )
    }

    /// Returns true if this kind resolves to a collection and takes a
    /// pluralized inferred name
    pub fn returns_many(self) -> bool {
        matches!(
            self,
            Self::HasMany | Self::BelongsToMany | Self::MorphMany | Self::MorphToMany
        )
    }

    /// Returns true if this kind requires a pivot table
    pub fn requires_pivot(self) -> bool {
        matches!(self, Self::BelongsToMany | Self::MorphToMany)
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationshipKind {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RelationshipKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RelationshipKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// An inverse one-to-one or one-to-many association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BelongsTo {
    pub related: String,
    pub foreign_key: Option<String>,
    pub owner_key: Option<String>,
    pub relation: Option<String>,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl BelongsTo {
    pub fn new(related: impl Into<String>) -> Self {
        Self {
            related: related.into(),
            foreign_key: None,
            owner_key: None,
            relation: None,
            name: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    pub fn with_owner_key(mut self, owner_key: impl Into<String>) -> Self {
        self.owner_key = Some(owner_key.into());
        self
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    /// Set an explicit relation name instead of the inferred one.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an equality constraint applied to the resolved relation.
    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// A many-to-many association through a pivot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BelongsToMany {
    pub related: String,
    pub table: Option<String>,
    pub foreign_pivot_key: Option<String>,
    pub related_pivot_key: Option<String>,
    pub parent_key: Option<String>,
    pub related_key: Option<String>,
    pub relation: Option<String>,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl BelongsToMany {
    pub fn new(related: impl Into<String>) -> Self {
        Self {
            related: related.into(),
            table: None,
            foreign_pivot_key: None,
            related_pivot_key: None,
            parent_key: None,
            related_key: None,
            relation: None,
            name: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_foreign_pivot_key(mut self, key: impl Into<String>) -> Self {
        self.foreign_pivot_key = Some(key.into());
        self
    }

    pub fn with_related_pivot_key(mut self, key: impl Into<String>) -> Self {
        self.related_pivot_key = Some(key.into());
        self
    }

    pub fn with_parent_key(mut self, key: impl Into<String>) -> Self {
        self.parent_key = Some(key.into());
        self
    }

    pub fn with_related_key(mut self, key: impl Into<String>) -> Self {
        self.related_key = Some(key.into());
        self
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// A one-to-one association where the related table holds the foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasOne {
    pub related: String,
    pub foreign_key: Option<String>,
    pub local_key: Option<String>,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl HasOne {
    pub fn new(related: impl Into<String>) -> Self {
        Self {
            related: related.into(),
            foreign_key: None,
            local_key: None,
            name: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    pub fn with_local_key(mut self, local_key: impl Into<String>) -> Self {
        self.local_key = Some(local_key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// A one-to-many association where the related table holds the foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasMany {
    pub related: String,
    pub foreign_key: Option<String>,
    pub local_key: Option<String>,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl HasMany {
    pub fn new(related: impl Into<String>) -> Self {
        Self {
            related: related.into(),
            foreign_key: None,
            local_key: None,
            name: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    pub fn with_local_key(mut self, local_key: impl Into<String>) -> Self {
        self.local_key = Some(local_key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// A one-to-one association reached through an intermediate model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasOneThrough {
    pub related: String,
    pub through: String,
    pub first_key: Option<String>,
    pub second_key: Option<String>,
    pub local_key: Option<String>,
    pub second_local_key: Option<String>,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl HasOneThrough {
    pub fn new(related: impl Into<String>, through: impl Into<String>) -> Self {
        Self {
            related: related.into(),
            through: through.into(),
            first_key: None,
            second_key: None,
            local_key: None,
            second_local_key: None,
            name: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_first_key(mut self, key: impl Into<String>) -> Self {
        self.first_key = Some(key.into());
        self
    }

    pub fn with_second_key(mut self, key: impl Into<String>) -> Self {
        self.second_key = Some(key.into());
        self
    }

    pub fn with_local_key(mut self, key: impl Into<String>) -> Self {
        self.local_key = Some(key.into());
        self
    }

    pub fn with_second_local_key(mut self, key: impl Into<String>) -> Self {
        self.second_local_key = Some(key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// A one-to-many association reached through an intermediate model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasManyThrough {
    pub related: String,
    pub through: String,
    pub first_key: Option<String>,
    pub second_key: Option<String>,
    pub local_key: Option<String>,
    pub second_local_key: Option<String>,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl HasManyThrough {
    pub fn new(related: impl Into<String>, through: impl Into<String>) -> Self {
        Self {
            related: related.into(),
            through: through.into(),
            first_key: None,
            second_key: None,
            local_key: None,
            second_local_key: None,
            name: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_first_key(mut self, key: impl Into<String>) -> Self {
        self.first_key = Some(key.into());
        self
    }

    pub fn with_second_key(mut self, key: impl Into<String>) -> Self {
        self.second_key = Some(key.into());
        self
    }

    pub fn with_local_key(mut self, key: impl Into<String>) -> Self {
        self.local_key = Some(key.into());
        self
    }

    pub fn with_second_local_key(mut self, key: impl Into<String>) -> Self {
        self.second_local_key = Some(key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// A polymorphic one-to-one association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorphOne {
    pub related: String,
    /// The morph name, e.g. `imageable` for `imageable_type`/`imageable_id`.
    pub morph_name: String,
    pub type_column: Option<String>,
    pub id_column: Option<String>,
    pub local_key: Option<String>,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl MorphOne {
    pub fn new(related: impl Into<String>, morph_name: impl Into<String>) -> Self {
        Self {
            related: related.into(),
            morph_name: morph_name.into(),
            type_column: None,
            id_column: None,
            local_key: None,
            name: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_type_column(mut self, column: impl Into<String>) -> Self {
        self.type_column = Some(column.into());
        self
    }

    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    pub fn with_local_key(mut self, key: impl Into<String>) -> Self {
        self.local_key = Some(key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// A polymorphic one-to-many association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorphMany {
    pub related: String,
    pub morph_name: String,
    pub type_column: Option<String>,
    pub id_column: Option<String>,
    pub local_key: Option<String>,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl MorphMany {
    pub fn new(related: impl Into<String>, morph_name: impl Into<String>) -> Self {
        Self {
            related: related.into(),
            morph_name: morph_name.into(),
            type_column: None,
            id_column: None,
            local_key: None,
            name: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_type_column(mut self, column: impl Into<String>) -> Self {
        self.type_column = Some(column.into());
        self
    }

    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    pub fn with_local_key(mut self, key: impl Into<String>) -> Self {
        self.local_key = Some(key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// The inverse of a polymorphic association.
///
/// Has no fixed related model; the concrete type is stored alongside the
/// identifier on the declaring row. A class-level declaration without an
/// explicit name has no inferable name and is a configuration error on the
/// caller's side; field-level declarations fall back to the field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphTo {
    pub morph_name: Option<String>,
    pub type_column: Option<String>,
    pub id_column: Option<String>,
    pub owner_key: Option<String>,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl MorphTo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_morph_name(mut self, morph_name: impl Into<String>) -> Self {
        self.morph_name = Some(morph_name.into());
        self
    }

    pub fn with_type_column(mut self, column: impl Into<String>) -> Self {
        self.type_column = Some(column.into());
        self
    }

    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    pub fn with_owner_key(mut self, key: impl Into<String>) -> Self {
        self.owner_key = Some(key.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// A polymorphic many-to-many association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorphToMany {
    pub related: String,
    pub morph_name: String,
    pub table: Option<String>,
    pub foreign_pivot_key: Option<String>,
    pub related_pivot_key: Option<String>,
    pub parent_key: Option<String>,
    pub related_key: Option<String>,
    pub relation: Option<String>,
    pub inverse: bool,
    pub name: Option<String>,
    pub constraints: Constraints,
}

impl MorphToMany {
    pub fn new(related: impl Into<String>, morph_name: impl Into<String>) -> Self {
        Self {
            related: related.into(),
            morph_name: morph_name.into(),
            table: None,
            foreign_pivot_key: None,
            related_pivot_key: None,
            parent_key: None,
            related_key: None,
            relation: None,
            inverse: false,
            name: None,
            constraints: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_foreign_pivot_key(mut self, key: impl Into<String>) -> Self {
        self.foreign_pivot_key = Some(key.into());
        self
    }

    pub fn with_related_pivot_key(mut self, key: impl Into<String>) -> Self {
        self.related_pivot_key = Some(key.into());
        self
    }

    pub fn with_parent_key(mut self, key: impl Into<String>) -> Self {
        self.parent_key = Some(key.into());
        self
    }

    pub fn with_related_key(mut self, key: impl Into<String>) -> Self {
        self.related_key = Some(key.into());
        self
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    /// Mark this declaration as the inverse side of the association.
    pub fn inverse(mut self) -> Self {
        self.inverse = true;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_constraint(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((column.into(), value.into()));
        self
    }
}

/// A declared association, tagged by kind.
///
/// Descriptors are immutable once constructed; the registry hands out
/// clones and never mutates cached entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RelationshipDescriptor {
    BelongsTo(BelongsTo),
    BelongsToMany(BelongsToMany),
    HasOne(HasOne),
    HasMany(HasMany),
    HasOneThrough(HasOneThrough),
    HasManyThrough(HasManyThrough),
    MorphOne(MorphOne),
    MorphMany(MorphMany),
    MorphTo(MorphTo),
    MorphToMany(MorphToMany),
}

impl RelationshipDescriptor {
    /// The kind tag for this descriptor.
    pub fn kind(&self) -> RelationshipKind {
        match self {
            Self::BelongsTo(_) => RelationshipKind::BelongsTo,
            Self::BelongsToMany(_) => RelationshipKind::BelongsToMany,
            Self::HasOne(_) => RelationshipKind::HasOne,
            Self::HasMany(_) => RelationshipKind::HasMany,
            Self::HasOneThrough(_) => RelationshipKind::HasOneThrough,
            Self::HasManyThrough(_) => RelationshipKind::HasManyThrough,
            Self::MorphOne(_) => RelationshipKind::MorphOne,
            Self::MorphMany(_) => RelationshipKind::MorphMany,
            Self::MorphTo(_) => RelationshipKind::MorphTo,
            Self::MorphToMany(_) => RelationshipKind::MorphToMany,
        }
    }

    /// The related model identifier; `None` for `morphTo`, which has no
    /// fixed target.
    pub fn related(&self) -> Option<&str> {
        match self {
            Self::BelongsTo(config) => Some(&config.related),
            Self::BelongsToMany(config) => Some(&config.related),
            Self::HasOne(config) => Some(&config.related),
            Self::HasMany(config) => Some(&config.related),
            Self::HasOneThrough(config) => Some(&config.related),
            Self::HasManyThrough(config) => Some(&config.related),
            Self::MorphOne(config) => Some(&config.related),
            Self::MorphMany(config) => Some(&config.related),
            Self::MorphTo(_) => None,
            Self::MorphToMany(config) => Some(&config.related),
        }
    }

    /// The explicit relation name, if one was declared.
    pub fn custom_name(&self) -> Option<&str> {
        match self {
            Self::BelongsTo(config) => config.name.as_deref(),
            Self::BelongsToMany(config) => config.name.as_deref(),
            Self::HasOne(config) => config.name.as_deref(),
            Self::HasMany(config) => config.name.as_deref(),
            Self::HasOneThrough(config) => config.name.as_deref(),
            Self::HasManyThrough(config) => config.name.as_deref(),
            Self::MorphOne(config) => config.name.as_deref(),
            Self::MorphMany(config) => config.name.as_deref(),
            Self::MorphTo(config) => config.name.as_deref(),
            Self::MorphToMany(config) => config.name.as_deref(),
        }
    }

    /// The equality constraints applied after construction, in insertion
    /// order.
    pub fn constraints(&self) -> &[(String, Value)] {
        match self {
            Self::BelongsTo(config) => &config.constraints,
            Self::BelongsToMany(config) => &config.constraints,
            Self::HasOne(config) => &config.constraints,
            Self::HasMany(config) => &config.constraints,
            Self::HasOneThrough(config) => &config.constraints,
            Self::HasManyThrough(config) => &config.constraints,
            Self::MorphOne(config) => &config.constraints,
            Self::MorphMany(config) => &config.constraints,
            Self::MorphTo(config) => &config.constraints,
            Self::MorphToMany(config) => &config.constraints,
        }
    }
}

impl From<BelongsTo> for RelationshipDescriptor {
    fn from(config: BelongsTo) -> Self {
        Self::BelongsTo(config)
    }
}

impl From<BelongsToMany> for RelationshipDescriptor {
    fn from(config: BelongsToMany) -> Self {
        Self::BelongsToMany(config)
    }
}

impl From<HasOne> for RelationshipDescriptor {
    fn from(config: HasOne) -> Self {
        Self::HasOne(config)
    }
}

impl From<HasMany> for RelationshipDescriptor {
    fn from(config: HasMany) -> Self {
        Self::HasMany(config)
    }
}

impl From<HasOneThrough> for RelationshipDescriptor {
    fn from(config: HasOneThrough) -> Self {
        Self::HasOneThrough(config)
    }
}

impl From<HasManyThrough> for RelationshipDescriptor {
    fn from(config: HasManyThrough) -> Self {
        Self::HasManyThrough(config)
    }
}

impl From<MorphOne> for RelationshipDescriptor {
    fn from(config: MorphOne) -> Self {
        Self::MorphOne(config)
    }
}

impl From<MorphMany> for RelationshipDescriptor {
    fn from(config: MorphMany) -> Self {
        Self::MorphMany(config)
    }
}

impl From<MorphTo> for RelationshipDescriptor {
    fn from(config: MorphTo) -> Self {
        Self::MorphTo(config)
    }
}

impl From<MorphToMany> for RelationshipDescriptor {
    fn from(config: MorphToMany) -> Self {
        Self::MorphToMany(config)
    }
}
