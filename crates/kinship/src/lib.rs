//! # kinship: declarative relationships and scopes for data models
//!
//! Model types declare their associations and query scopes as immutable
//! descriptors; a process-wide registry resolves and caches the metadata
//! once per type, and an explicit member resolver turns cached entries
//! into relation or query handles obtained from the host ORM through the
//! capability traits in [`model`].
//!
//! The crate builds no SQL and loads no rows: relation execution, joins,
//! pivot management, and eager loading belong to the host ORM.
//!
//! ```
//! use kinship::{
//!     HasMany, MemberResolver, MetadataRegistry, ModelMetadata,
//!     RelationshipDeclaration, Scope,
//! };
//!
//! struct Author;
//!
//! impl ModelMetadata for Author {
//!     fn model_name() -> &'static str {
//!         "Author"
//!     }
//!
//!     fn relationship_declarations() -> Vec<RelationshipDeclaration> {
//!         vec![
//!             RelationshipDeclaration::on_class(HasMany::new("Post")),
//!             RelationshipDeclaration::on_class(
//!                 HasMany::new("Post")
//!                     .with_name("publishedPosts")
//!                     .with_constraint("published", true),
//!             ),
//!         ]
//!     }
//!
//!     fn scope_declarations() -> Vec<Scope> {
//!         vec![Scope::with_operator("prolific", "post_count", ">", 10)]
//!     }
//! }
//!
//! let registry = MetadataRegistry::new();
//! registry.ensure_resolved::<Author>();
//! assert!(registry.has_relationship("Author", "publishedPosts"));
//! assert!(registry.has_scope("Author", "prolific"));
//! # let _ = MemberResolver::new(&registry);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod relationships;
pub mod scope;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use model::*;
pub use relationships::*;
pub use scope::*;
