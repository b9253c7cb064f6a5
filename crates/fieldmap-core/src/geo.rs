//! Geo-coordinate mapping declarations.
//!
//! A content type declares where its coordinates live as an ordered list of
//! entries. A `field` entry names an item holding a coordinate value, a
//! `link` entry names an item holding the root path of another resource
//! whose own declaration is consulted in turn.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a geo mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoEntryType {
    /// The item holds the coordinates.
    Field,
    /// The item holds a link to another resource.
    Link,
}

impl fmt::Display for GeoEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Link => f.write_str("link"),
        }
    }
}

/// One `{type, value}` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoMappingEntry {
    #[serde(rename = "type")]
    pub entry_type: GeoEntryType,
    /// Item xpath.
    pub value: String,
}

impl GeoMappingEntry {
    pub fn field(xpath: impl Into<String>) -> Self {
        Self {
            entry_type: GeoEntryType::Field,
            value: xpath.into(),
        }
    }

    pub fn link(xpath: impl Into<String>) -> Self {
        Self {
            entry_type: GeoEntryType::Link,
            value: xpath.into(),
        }
    }
}

/// Ordered geo mapping declaration of a content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoMapping {
    entries: Vec<GeoMappingEntry>,
}

impl GeoMapping {
    pub fn new(entries: Vec<GeoMappingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[GeoMappingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<GeoMappingEntry> for GeoMapping {
    fn from_iter<I: IntoIterator<Item = GeoMappingEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
