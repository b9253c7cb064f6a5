//! fieldmap core: shared types, errors, and collaborator traits.
//!
//! This crate holds everything the field engine consumes from the
//! surrounding indexing pipeline. It has no internal fieldmap dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`resource`]: Resource snapshots and addressable attributes
//! - [`properties`]: Direct and search-inherited properties
//! - [`extraction`]: Per-locale extraction results
//! - [`locale`]: Locales and locale-candidate lookups
//! - [`geo`]: Geo mapping declarations of content types
//! - [`service`]: The [`ContentService`] trait and an in-memory implementation
//! - [`util`]: Root path helpers

pub mod error;
pub mod extraction;
pub mod geo;
pub mod locale;
pub mod properties;
pub mod resource;
pub mod service;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use extraction::{ExtractionResult, LocaleContent};
pub use geo::{GeoEntryType, GeoMapping, GeoMappingEntry};
pub use locale::{first_match, locale_candidates, Locale};
pub use properties::{Properties, Property};
pub use resource::{Resource, ResourceAttribute, ResourceState};
pub use service::{ContentService, InMemoryContentService, StoredResource};
