//! Relation name inference - pure helpers for deriving effective names
//!
//! `resolve_relation_name` is deterministic: the same descriptor always
//! yields the same name.

use super::descriptor::RelationshipDescriptor;

/// Compute the effective relation name for a class-level descriptor.
///
/// An explicit name wins verbatim. Otherwise the base name is the
/// lower-camel simple name of the related identifier, pluralized for the
/// collection kinds (`hasMany`, `belongsToMany`, `morphMany`,
/// `morphToMany`).
///
/// `morphTo` has no related target, so an explicit name is effectively
/// mandatory at the class level; without one this returns an empty base
/// name. Field-level declarations fall back to the field name before
/// reaching this function.
pub fn resolve_relation_name(descriptor: &RelationshipDescriptor) -> String {
    if let Some(name) = descriptor.custom_name() {
        return name.to_string();
    }

    let base = lower_camel(class_basename(descriptor.related().unwrap_or("")));

    if descriptor.kind().returns_many() {
        pluralize(&base)
    } else {
        base
    }
}

/// The unqualified simple name of a possibly path-qualified identifier.
pub fn class_basename(identifier: &str) -> &str {
    identifier.rsplit("::").next().unwrap_or(identifier)
}

/// Convert a simple name to lowerCamelCase, preserving interior capitals.
pub fn lower_camel(name: &str) -> String {
    let mut segments = name.split('_').filter(|segment| !segment.is_empty());
    let mut result = String::with_capacity(name.len());

    if let Some(first) = segments.next() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            result.extend(c.to_lowercase());
            result.push_str(chars.as_str());
        }
    }

    for segment in segments {
        let mut chars = segment.chars();
        if let Some(c) = chars.next() {
            result.extend(c.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    result
}

/// Simple English pluralization.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('y')
        && !name.ends_with("ay")
        && !name.ends_with("ey")
        && !name.ends_with("iy")
        && !name.ends_with("oy")
        && !name.ends_with("uy")
    {
        format!("{}ies", &name[..name.len() - 1])
    } else if name.ends_with('s')
        || name.ends_with("sh")
        || name.ends_with("ch")
        || name.ends_with('x')
        || name.ends_with('z')
    {
        format!("{}es", name)
    } else if name.is_empty() {
        String::new()
    } else {
        format!("{}s", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::descriptor::{
        BelongsTo, HasMany, HasOne, MorphMany, MorphTo, MorphToMany,
    };

    #[test]
    fn test_pluralization() {
        assert_eq!(pluralize("post"), "posts");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("status"), "statuses");
    }

    #[test]
    fn test_lower_camel() {
        assert_eq!(lower_camel("Post"), "post");
        assert_eq!(lower_camel("BlogPost"), "blogPost");
        assert_eq!(lower_camel("blog_post"), "blogPost");
        assert_eq!(lower_camel(""), "");
    }

    #[test]
    fn test_class_basename() {
        assert_eq!(class_basename("Post"), "Post");
        assert_eq!(class_basename("app::models::Post"), "Post");
    }

    #[test]
    fn test_explicit_name_wins_verbatim() {
        let descriptor = HasMany::new("Post").with_name("publishedPosts").into();
        assert_eq!(resolve_relation_name(&descriptor), "publishedPosts");

        // Explicit names are never pluralized or re-cased
        let descriptor = HasMany::new("Post").with_name("Archive").into();
        assert_eq!(resolve_relation_name(&descriptor), "Archive");
    }

    #[test]
    fn test_singular_kinds_stay_singular() {
        let descriptor = BelongsTo::new("Author").into();
        assert_eq!(resolve_relation_name(&descriptor), "author");

        let descriptor = HasOne::new("app::models::Profile").into();
        assert_eq!(resolve_relation_name(&descriptor), "profile");
    }

    #[test]
    fn test_collection_kinds_pluralize() {
        let descriptor = HasMany::new("Post").into();
        assert_eq!(resolve_relation_name(&descriptor), "posts");

        let descriptor = MorphMany::new("Comment", "commentable").into();
        assert_eq!(resolve_relation_name(&descriptor), "comments");

        let descriptor = MorphToMany::new("Tag", "taggable").into();
        assert_eq!(resolve_relation_name(&descriptor), "tags");

        let descriptor = HasMany::new("Category").into();
        assert_eq!(resolve_relation_name(&descriptor), "categories");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let descriptor: crate::RelationshipDescriptor = HasMany::new("BlogPost").into();
        let first = resolve_relation_name(&descriptor);
        let second = resolve_relation_name(&descriptor);
        assert_eq!(first, second);
        assert_eq!(first, "blogPosts");
    }

    #[test]
    fn test_morph_to_without_name_has_no_inferable_base() {
        let descriptor = MorphTo::new().into();
        assert_eq!(resolve_relation_name(&descriptor), "");

        let descriptor = MorphTo::new().with_name("commentable").into();
        assert_eq!(resolve_relation_name(&descriptor), "commentable");
    }
}
