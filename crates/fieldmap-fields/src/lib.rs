//! Search field mapping and field configuration engine.
//!
//! Decides, per indexed resource, which pieces of extracted content and
//! which properties end up in which named, typed index fields.
//!
//! # Features
//!
//! - `fts-tantivy`: Realize configurations as Tantivy schemas and documents
//!   (enabled by default)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      fieldmap-fields                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  FieldConfiguration (sealed, ordered fields)                │
//! │  ├── SearchField (flags, boost, MappingPolicy)              │
//! │  │   └── FieldMapping (MappingKind: content, property,      │
//! │  │       item, attribute, macro, geo, custom)               │
//! │  ├── CategoryStrategy (property, tree, none)                │
//! │  └── StructuralField (path, folders, dates, locales, ...)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ConfigurationLoader (TOML declarations)                    │
//! │  EngineSchema (Tantivy schema and documents)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use fieldmap_core::{ExtractionResult, InMemoryContentService, Properties, Resource};
//! use fieldmap_fields::{FieldConfiguration, ResourceContext};
//!
//! let config = FieldConfiguration::standard();
//! let service = InMemoryContentService::new();
//! let resource = Resource::new("/sites/default/index.html", "plain");
//! let ctx = ResourceContext::new(&resource, &service);
//!
//! let extraction = ExtractionResult::from_text("Welcome to the site");
//! let properties = Properties::new()
//!     .with("Title", "Home")
//!     .with("Keywords", "welcome");
//!
//! let doc = config.resolve_document(&ctx, &extraction, &properties, &properties);
//! assert_eq!(doc.text("title"), Some("Home"));
//! assert_eq!(doc.text("meta"), Some("Home\nwelcome"));
//! ```

pub mod categories;
pub mod configuration;
pub mod declaration;
pub mod document;
pub mod field;
pub mod mapping;
pub mod mapping_type;
pub mod names;
pub mod structural;

#[cfg(feature = "fts-tantivy")]
pub mod schema;

// Re-exports
pub use categories::{
    strategy_by_name, CategoryStrategy, CategoryTree, NoCategories, PropertyCategories,
};
pub use configuration::{FieldConfiguration, FieldConfigurationBuilder};
pub use declaration::{
    load_configuration, parse_configuration, ConfigurationDeclaration, ConfigurationLoader,
};
pub use document::{FieldSpec, IndexDocument, IndexField, IndexOptions};
pub use field::{MappingPolicy, SearchField, BOOST_DEFAULT};
pub use mapping::{
    parse_coordinates, validate_coordinates, DynamicResolver, FieldMapping, MappingInput,
    MappingKind, ResourceContext, MAX_LINK_DEPTH,
};
pub use mapping_type::FieldMappingType;
pub use structural::StructuralField;

#[cfg(feature = "fts-tantivy")]
pub use schema::EngineSchema;

/// True for empty or whitespace-only text.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
