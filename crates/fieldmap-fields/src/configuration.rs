//! Field configurations.
//!
//! A [`FieldConfiguration`] is a named, ordered set of [`SearchField`]s plus
//! a category strategy and a list of structural fields. It is assembled with
//! a [`FieldConfigurationBuilder`] and sealed by
//! [`build`](FieldConfigurationBuilder::build), which computes every derived
//! view once. A sealed configuration is immutable, so it can be shared
//! between indexing threads behind an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use fieldmap_fields::{FieldConfiguration, FieldMapping, SearchField};
//!
//! let config = FieldConfiguration::builder("articles")
//!     .with_field(
//!         SearchField::new("teaser")
//!             .with_stored(true)
//!             .with_in_excerpt(true)
//!             .with_mapping(FieldMapping::item("Teaser")),
//!     )
//!     .build();
//!
//! assert_eq!(config.excerpt_field_names(), ["teaser"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use fieldmap_core::{ExtractionResult, Properties, Resource};

use crate::categories::{CategoryStrategy, PropertyCategories};
use crate::document::{FieldSpec, IndexDocument};
use crate::field::{MappingPolicy, SearchField};
use crate::mapping::{FieldMapping, ResourceContext};
use crate::names::*;
use crate::structural::StructuralField;

// ============================================================================
// Builder
// ============================================================================

/// A configuration in the building state.
#[derive(Clone)]
pub struct FieldConfigurationBuilder {
    name: String,
    description: String,
    fields: Vec<SearchField>,
    categories: Arc<dyn CategoryStrategy>,
    structural: Vec<StructuralField>,
}

impl FieldConfigurationBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fields: Vec::new(),
            categories: Arc::new(PropertyCategories),
            structural: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Register a field.
    ///
    /// A field with the same name replaces the earlier one but keeps its
    /// position.
    pub fn add_field(&mut self, field: SearchField) {
        match self.fields.iter_mut().find(|f| f.name() == field.name()) {
            Some(existing) => {
                log::debug!("Replacing field '{}' in '{}'", field.name(), self.name);
                *existing = field;
            }
            None => self.fields.push(field),
        }
    }

    pub fn with_field(mut self, field: SearchField) -> Self {
        self.add_field(field);
        self
    }

    pub fn categories(mut self, strategy: impl CategoryStrategy + 'static) -> Self {
        self.categories = Arc::new(strategy);
        self
    }

    pub fn categories_arc(mut self, strategy: Arc<dyn CategoryStrategy>) -> Self {
        self.categories = strategy;
        self
    }

    /// Append a structural field; duplicates are ignored.
    pub fn with_structural(mut self, field: StructuralField) -> Self {
        if !self.structural.contains(&field) {
            self.structural.push(field);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Seal the configuration.
    pub fn build(self) -> FieldConfiguration {
        let index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect();
        let excerpt_fields = self
            .fields
            .iter()
            .filter(|f| f.is_stored() && f.is_in_excerpt())
            .map(|f| f.name().to_string())
            .collect();

        FieldConfiguration {
            name: self.name,
            description: self.description,
            fields: self.fields,
            index,
            excerpt_fields,
            categories: self.categories,
            structural: self.structural,
        }
    }
}

impl fmt::Debug for FieldConfigurationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfigurationBuilder")
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .field("categories", &self.categories.name())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Sealed configuration
// ============================================================================

/// A sealed, immutable field configuration.
#[derive(Clone)]
pub struct FieldConfiguration {
    name: String,
    description: String,
    fields: Vec<SearchField>,
    index: HashMap<String, usize>,
    excerpt_fields: Vec<String>,
    categories: Arc<dyn CategoryStrategy>,
    structural: Vec<StructuralField>,
}

impl FieldConfiguration {
    pub fn builder(name: impl Into<String>) -> FieldConfigurationBuilder {
        FieldConfigurationBuilder::new(name)
    }

    /// Return to the building state with the same contents.
    pub fn to_builder(&self) -> FieldConfigurationBuilder {
        FieldConfigurationBuilder {
            name: self.name.clone(),
            description: self.description.clone(),
            fields: self.fields.clone(),
            categories: Arc::clone(&self.categories),
            structural: self.structural.clone(),
        }
    }

    /// The built-in `standard` configuration.
    ///
    /// | Field | Stored | Indexed | Source |
    /// |-------|--------|---------|--------|
    /// | `content` | yes, excerpt | tokenized | content |
    /// | `title-key` | no | untokenized, boost 0 | `Title` |
    /// | `title` | yes | tokenized | `Title` |
    /// | `keywords` | yes | tokenized | `Keywords` |
    /// | `description` | yes, excerpt | tokenized | `Description` |
    /// | `meta` | no | tokenized | title, keywords, description concatenated |
    pub fn standard() -> Self {
        FieldConfiguration::builder(STANDARD_CONFIGURATION)
            .description("The standard search index field configuration.")
            .with_field(
                SearchField::new(FIELD_CONTENT)
                    .with_stored(true)
                    .with_in_excerpt(true)
                    .with_mapping(FieldMapping::content()),
            )
            .with_field(
                SearchField::new(FIELD_TITLE_UNSTORED)
                    .with_tokenized(false)
                    .with_boost(0.0)
                    .with_display_name(crate::field::IGNORE_DISPLAY_NAME)
                    .with_mapping(FieldMapping::property(PROPERTY_TITLE)),
            )
            .with_field(
                SearchField::new(FIELD_TITLE)
                    .with_stored(true)
                    .with_mapping(FieldMapping::property(PROPERTY_TITLE)),
            )
            .with_field(
                SearchField::new(FIELD_KEYWORDS)
                    .with_stored(true)
                    .with_mapping(FieldMapping::property(PROPERTY_KEYWORDS)),
            )
            .with_field(
                SearchField::new(FIELD_DESCRIPTION)
                    .with_stored(true)
                    .with_in_excerpt(true)
                    .with_mapping(FieldMapping::property(PROPERTY_DESCRIPTION)),
            )
            .with_field(
                SearchField::new(FIELD_META)
                    .with_policy(MappingPolicy::Concatenate)
                    .with_display_name(crate::field::IGNORE_DISPLAY_NAME)
                    .with_mapping(FieldMapping::property(PROPERTY_TITLE))
                    .with_mapping(FieldMapping::property(PROPERTY_KEYWORDS))
                    .with_mapping(FieldMapping::property(PROPERTY_DESCRIPTION)),
            )
            .with_structural(StructuralField::Path)
            .with_structural(StructuralField::ParentFolders)
            .with_structural(StructuralField::Type)
            .with_structural(StructuralField::DateCreated)
            .with_structural(StructuralField::DateLastModified)
            .with_structural(StructuralField::ResourceLocales)
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Fields in registration order.
    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&SearchField> {
        self.index.get(name).and_then(|&i| self.fields.get(i))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of fields that are stored and marked in-excerpt, in order.
    pub fn excerpt_field_names(&self) -> &[String] {
        &self.excerpt_fields
    }

    pub fn category_strategy(&self) -> &dyn CategoryStrategy {
        self.categories.as_ref()
    }

    pub fn structural_fields(&self) -> &[StructuralField] {
        &self.structural
    }

    /// Shapes of the category and structural fields this configuration
    /// appends, skipping names already taken by mapped fields.
    pub fn appended_field_specs(&self) -> Vec<FieldSpec> {
        let mut specs: Vec<FieldSpec> = Vec::new();
        let candidates = self
            .categories
            .field_spec()
            .into_iter()
            .chain(self.structural.iter().map(StructuralField::spec));
        for spec in candidates {
            let taken = self.index.contains_key(&spec.name) || specs.iter().any(|s| s.name == spec.name);
            if !taken {
                specs.push(spec);
            }
        }
        specs
    }

    /// Append category fields with the configured strategy.
    ///
    /// Nothing is appended when a mapped field owns the category field name.
    pub fn append_categories(
        &self,
        document: &mut IndexDocument,
        resource: &Resource,
        searched: &Properties,
    ) {
        let shadowed = self
            .categories
            .field_spec()
            .is_some_and(|spec| self.index.contains_key(&spec.name));
        if shadowed {
            log::trace!("Category field of '{}' is shadowed by a mapped field", self.name);
            return;
        }
        self.categories.append(document, resource, searched);
    }

    /// Build the index document for one resource.
    ///
    /// Mapped fields come first, in registration order, followed by category
    /// fields and then structural fields. Fields without a value are
    /// omitted.
    pub fn resolve_document(
        &self,
        ctx: &ResourceContext<'_>,
        extraction: &ExtractionResult,
        properties: &Properties,
        searched: &Properties,
    ) -> IndexDocument {
        let mut document = IndexDocument::new(ctx.root_path());

        for field in &self.fields {
            let text = field.resolve_text(ctx, extraction, properties, searched);
            match field.build_index_field(text.as_deref()) {
                Some(built) => document.push(built),
                None => log::trace!("No value for '{}' in {}", field.name(), ctx.root_path()),
            }
        }

        self.append_categories(&mut document, ctx.resource, searched);

        for structural in &self.structural {
            if self.index.contains_key(structural.field_name()) {
                continue;
            }
            structural.append(&mut document, ctx.resource, extraction);
        }

        log::debug!(
            "Resolved {} fields for {} with configuration '{}'",
            document.len(),
            ctx.root_path(),
            self.name
        );
        document
    }
}

impl fmt::Debug for FieldConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfiguration")
            .field("name", &self.name)
            .field("fields", &self.fields.iter().map(SearchField::name).collect::<Vec<_>>())
            .field("categories", &self.categories.name())
            .field("structural", &self.structural)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
