//! Error types for descriptor parsing and member resolution.
//!
//! Host ORM failures are carried through `ResolveError::Host` unchanged;
//! the engine never translates or swallows them.

use thiserror::Error;

/// Result type alias for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors raised by the resolution engine itself.
///
/// `InvalidRelatedTarget`, `MissingRequiredParameter`, and
/// `InvalidWhereConstraints` are constructable but are not raised by the
/// resolver today; malformed targets and keys surface as host ORM errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// A relationship kind tag with no matching construction rule
    #[error("Unsupported relationship kind: {0}")]
    UnsupportedRelationshipKind(String),

    /// A related identifier that cannot be loaded as a model
    #[error("Invalid related target '{target}' for {kind} relationship")]
    InvalidRelatedTarget { target: String, kind: String },

    /// A descriptor missing a kind-mandatory field
    #[error("Missing required parameter '{parameter}' for {kind} relationship")]
    MissingRequiredParameter { parameter: String, kind: String },

    /// Malformed constraint shape on a descriptor
    #[error("Invalid where constraints for {0} relationship: constraints must be column => value pairs")]
    InvalidWhereConstraints(String),

    /// Failure surfaced by the host ORM, propagated unchanged
    #[error("Host ORM error: {0}")]
    Host(String),

    /// Descriptor serialization or deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ResolveError {
    /// Error for a kind tag the resolver does not recognize.
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedRelationshipKind(kind.into())
    }

    /// Error for a related identifier that does not resolve to a model.
    pub fn invalid_related_target(target: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::InvalidRelatedTarget {
            target: target.into(),
            kind: kind.into(),
        }
    }

    /// Error for a descriptor missing a kind-mandatory field.
    pub fn missing_required_parameter(parameter: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::MissingRequiredParameter {
            parameter: parameter.into(),
            kind: kind.into(),
        }
    }

    /// Error for malformed where constraints.
    pub fn invalid_where_constraints(kind: impl Into<String>) -> Self {
        Self::InvalidWhereConstraints(kind.into())
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        ResolveError::Serialization(err.to_string())
    }
}
