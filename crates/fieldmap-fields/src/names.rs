//! Well-known field and property names.
//!
//! Keeps the names used by the standard configuration, the category
//! strategies and the structural fields in one place.

// ============== Mapped fields (standard configuration) ==============

/// Extracted plain-text content.
pub const FIELD_CONTENT: &str = "content";

/// Title, stored and tokenized.
pub const FIELD_TITLE: &str = "title";

/// Title as a single exact-match term (sorting, exact lookups).
pub const FIELD_TITLE_UNSTORED: &str = "title-key";

pub const FIELD_KEYWORDS: &str = "keywords";

pub const FIELD_DESCRIPTION: &str = "description";

/// Title, keywords and description combined into one searchable field.
pub const FIELD_META: &str = "meta";

// ============== Category and structural fields ==============

pub const FIELD_CATEGORY: &str = "category";

pub const FIELD_PATH: &str = "path";

/// Every ancestor folder of the resource (multi-valued).
pub const FIELD_PARENT_FOLDERS: &str = "parent-folders";

pub const FIELD_TYPE: &str = "type";

pub const FIELD_DATE_CREATED: &str = "created";

pub const FIELD_DATE_LASTMODIFIED: &str = "lastmodified";

pub const FIELD_DATE_CONTENT: &str = "contentdate";

/// Locales the resource is available in.
pub const FIELD_RESOURCE_LOCALES: &str = "res_locales";

/// Locales that content was extracted for.
pub const FIELD_CONTENT_LOCALES: &str = "con_locales";

pub const FIELD_SIZE: &str = "size";

// ============== Properties ==============

pub const PROPERTY_TITLE: &str = "Title";

pub const PROPERTY_KEYWORDS: &str = "Keywords";

pub const PROPERTY_DESCRIPTION: &str = "Description";

/// Searched property holding the legacy category of a resource.
pub const PROPERTY_SEARCH_CATEGORY: &str = "category";

// ============== Configurations ==============

/// Name of the built-in configuration.
pub const STANDARD_CONFIGURATION: &str = "standard";
