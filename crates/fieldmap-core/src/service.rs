//! Collaborator services consumed by field mappings.
//!
//! Some mappings need more than the snapshot the indexing pipeline hands
//! in: macro mappings re-extract content under another locale and geo
//! mappings follow links to other resources. They do so through
//! [`ContentService`], which the surrounding system implements on top of
//! its own storage.
//!
//! [`InMemoryContentService`] is a complete implementation backed by a map,
//! loadable from a JSON fixture. Tests and the CLI use it.
//!
//! # Fixture format
//!
//! ```json
//! {
//!   "resources": [
//!     {
//!       "resource": {"root_path": "/sites/default/a.xml", "type": "article"},
//!       "properties": [{"name": "Title", "value": "A"}],
//!       "extraction": {"locales": ["en"], "localized": {"en": {"content": "..."}}}
//!     }
//!   ],
//!   "geo_mappings": {"article": [{"type": "field", "value": "Coord"}]}
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::extraction::ExtractionResult;
use crate::geo::GeoMapping;
use crate::locale::Locale;
use crate::properties::Properties;
use crate::resource::Resource;
use crate::util::paths;

/// Access to resources, their content and their type configuration.
///
/// Calls may block on I/O. Implementations must be usable from many
/// indexing threads at once.
pub trait ContentService: Send + Sync {
    /// Read a resource snapshot by root path.
    fn read_resource(&self, root_path: &str) -> Result<Resource>;

    /// Read the properties of a resource.
    ///
    /// With `search` set, values missing on the resource are inherited from
    /// its folders, nearest folder first.
    fn read_properties(&self, root_path: &str, search: bool) -> Result<Properties>;

    /// Run content extraction for a resource.
    ///
    /// When `locale` is given and the content has that locale, the result's
    /// best view is that locale.
    fn extract(&self, resource: &Resource, locale: Option<&Locale>) -> Result<ExtractionResult>;

    /// The geo mapping declared by a resource type, if any.
    fn geo_mapping(&self, type_name: &str) -> Option<GeoMapping>;
}

/// One stored resource of an [`InMemoryContentService`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoredResource {
    pub resource: Resource,
    pub properties: Properties,
    /// Content extraction output; `None` makes `extract` fail.
    pub extraction: Option<ExtractionResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixture {
    resources: Vec<StoredResource>,
    geo_mappings: HashMap<String, GeoMapping>,
}

/// A [`ContentService`] backed by in-memory maps.
#[derive(Debug, Default)]
pub struct InMemoryContentService {
    resources: HashMap<String, StoredResource>,
    geo_mappings: HashMap<String, GeoMapping>,
}

impl InMemoryContentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a service from a JSON fixture (see the module docs).
    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: Fixture = serde_json::from_str(json)?;
        let mut service = Self::new();
        for stored in fixture.resources {
            service.insert(stored);
        }
        service.geo_mappings = fixture.geo_mappings;
        Ok(service)
    }

    /// Store a resource, replacing any resource with the same root path.
    pub fn insert(&mut self, stored: StoredResource) {
        self.resources
            .insert(stored.resource.root_path.clone(), stored);
    }

    /// Builder-style insert of a resource with properties and content.
    pub fn with_resource(
        mut self,
        resource: Resource,
        properties: Properties,
        extraction: Option<ExtractionResult>,
    ) -> Self {
        self.insert(StoredResource {
            resource,
            properties,
            extraction,
        });
        self
    }

    /// Register the geo mapping of a resource type.
    pub fn with_geo_mapping(mut self, type_name: impl Into<String>, mapping: GeoMapping) -> Self {
        self.geo_mappings.insert(type_name.into(), mapping);
        self
    }

    /// The stored entry for a root path.
    pub fn stored(&self, root_path: &str) -> Option<&StoredResource> {
        self.resources.get(root_path)
    }

    /// Root paths of all stored resources, sorted.
    pub fn root_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    fn lookup(&self, root_path: &str) -> Result<&StoredResource> {
        self.resources
            .get(root_path)
            .ok_or_else(|| Error::not_found(root_path, "resource"))
    }
}

impl ContentService for InMemoryContentService {
    fn read_resource(&self, root_path: &str) -> Result<Resource> {
        Ok(self.lookup(root_path)?.resource.clone())
    }

    fn read_properties(&self, root_path: &str, search: bool) -> Result<Properties> {
        let mut properties = self.lookup(root_path)?.properties.clone();
        if search {
            // nearest folder first; folders that are not stored contribute nothing
            for folder in paths::parent_folders(root_path).iter().rev() {
                match self.resources.get(folder) {
                    Some(stored) => properties.inherit_from(&stored.properties),
                    None => log::trace!("No stored folder {folder} to inherit from"),
                }
            }
        }
        Ok(properties)
    }

    fn extract(&self, resource: &Resource, locale: Option<&Locale>) -> Result<ExtractionResult> {
        let Some(extraction) = self.lookup(&resource.root_path)?.extraction.clone() else {
            log::debug!("No extraction stored for {}", resource.root_path);
            return Err(Error::extraction(&resource.root_path, "no extractable content"));
        };
        Ok(match locale {
            Some(locale) => extraction.focused_on(locale),
            None => extraction,
        })
    }

    fn geo_mapping(&self, type_name: &str) -> Option<GeoMapping> {
        self.geo_mappings.get(type_name).cloned()
    }
}
