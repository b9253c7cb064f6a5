//! Category tagging strategies.
//!
//! After mapped fields are resolved, a configuration hands the document to
//! its [`CategoryStrategy`]. Categories are normalized (trimmed, lower-cased)
//! at index time, so queries never need to normalize them.

use std::fmt;

use fieldmap_core::{Properties, Resource};

use crate::document::{FieldSpec, IndexDocument, IndexOptions};
use crate::names::{FIELD_CATEGORY, PROPERTY_SEARCH_CATEGORY};

/// Appends category fields to a document.
pub trait CategoryStrategy: Send + Sync + fmt::Debug {
    /// Short name used in configuration files (`property`, `tree`, `none`).
    fn name(&self) -> &'static str;

    /// Append category fields for `resource`.
    fn append(&self, document: &mut IndexDocument, resource: &Resource, searched: &Properties);

    /// Shape of the emitted field, if this strategy emits any.
    fn field_spec(&self) -> Option<FieldSpec> {
        Some(category_spec())
    }
}

fn category_spec() -> FieldSpec {
    FieldSpec::new(FIELD_CATEGORY, true, IndexOptions::Untokenized)
}

fn normalize(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Look up a strategy by its configuration name.
pub fn strategy_by_name(name: &str) -> Option<Box<dyn CategoryStrategy>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "property" | "" => Some(Box::new(PropertyCategories)),
        "tree" => Some(Box::new(CategoryTree)),
        "none" => Some(Box::new(NoCategories)),
        _ => None,
    }
}

/// Reads the searched `category` property into one exact-match field.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyCategories;

impl CategoryStrategy for PropertyCategories {
    fn name(&self) -> &'static str {
        "property"
    }

    fn append(&self, document: &mut IndexDocument, _resource: &Resource, searched: &Properties) {
        let Some(category) = searched.value(PROPERTY_SEARCH_CATEGORY) else {
            return;
        };
        let category = normalize(category);
        if !category.is_empty() {
            document.push(category_spec().index_field(category));
        }
    }
}

/// Emits every ancestor path of each resource category.
///
/// A resource in `Topics/Sports/Tennis` is tagged `topics/`,
/// `topics/sports/` and `topics/sports/tennis/`, so a search for any
/// ancestor category finds it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryTree;

impl CategoryTree {
    /// All ancestor paths of the given categories, normalized and without
    /// duplicates, in first-seen order.
    ///
    /// ```
    /// use fieldmap_fields::CategoryTree;
    ///
    /// let paths = CategoryTree::expand(&["Topics/Sports/", "topics/news"]);
    /// assert_eq!(paths, ["topics/", "topics/sports/", "topics/news/"]);
    /// ```
    pub fn expand<S: AsRef<str>>(categories: &[S]) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for category in categories {
            let mut prefix = String::new();
            for segment in normalize(category.as_ref())
                .split('/')
                .map(str::trim)
                .filter(|s| !s.is_empty())
            {
                prefix.push_str(segment);
                prefix.push('/');
                if !paths.contains(&prefix) {
                    paths.push(prefix.clone());
                }
            }
        }
        paths
    }
}

impl CategoryStrategy for CategoryTree {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn append(&self, document: &mut IndexDocument, resource: &Resource, _searched: &Properties) {
        let spec = category_spec();
        for path in Self::expand(&resource.categories) {
            document.push(spec.index_field(path));
        }
    }
}

/// Emits no category fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCategories;

impl CategoryStrategy for NoCategories {
    fn name(&self) -> &'static str {
        "none"
    }

    fn append(&self, _document: &mut IndexDocument, _resource: &Resource, _searched: &Properties) {}

    fn field_spec(&self) -> Option<FieldSpec> {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
