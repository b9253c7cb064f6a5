//! Common test utilities for fieldmap-fields integration tests.

use fieldmap_core::{
    ContentService, ExtractionResult, GeoMapping, GeoMappingEntry, InMemoryContentService,
    Properties, Resource,
};
use fieldmap_fields::{FieldConfiguration, IndexDocument, ResourceContext};

/// A small site: a folder with inherited properties, an article, and a chain
/// of geo-linked resources.
pub struct TestHarness {
    pub service: InMemoryContentService,
}

impl TestHarness {
    pub fn new() -> Self {
        let service = InMemoryContentService::new()
            .with_geo_mapping("poi", GeoMapping::new(vec![GeoMappingEntry::field("Coord")]))
            .with_geo_mapping(
                "event",
                GeoMapping::new(vec![
                    GeoMappingEntry::field("Coord"),
                    GeoMappingEntry::link("Location"),
                ]),
            )
            .with_resource(
                Resource::new("/sites/", "folder"),
                Properties::new().with("Keywords", "site"),
                None,
            )
            .with_resource(
                Resource::new("/sites/news/", "folder"),
                Properties::new()
                    .with("Keywords", "news, press")
                    .with("category", " Press "),
                None,
            )
            .with_resource(
                Resource::new("/sites/news/article.xml", "article").with_locales(["en", "de"]),
                Properties::new()
                    .with("Title", "T")
                    .with("Description", "D"),
                Some(
                    ExtractionResult::new()
                        .with_locale_content("en", "English body")
                        .with_locale_content("de", "Deutscher Text")
                        .with_item("en", "Teaser", "Short teaser")
                        .with_default_locale("en"),
                ),
            );
        Self { service }
    }

    /// Add a resource with a single item.
    pub fn with_item(mut self, path: &str, type_name: &str, xpath: &str, value: &str) -> Self {
        self.service = self.service.with_resource(
            Resource::new(path, type_name).with_locales(["en"]),
            Properties::new(),
            Some(ExtractionResult::new().with_item("en", xpath, value)),
        );
        self
    }

    /// Resolve a stored resource the way an indexing pipeline would.
    pub fn resolve(&self, config: &FieldConfiguration, path: &str) -> IndexDocument {
        let resource = self.service.read_resource(path).unwrap();
        let properties = self.service.read_properties(path, false).unwrap();
        let searched = self.service.read_properties(path, true).unwrap();
        let extraction = self
            .service
            .extract(&resource, None)
            .unwrap_or_default();
        let ctx = ResourceContext::new(&resource, &self.service);
        config.resolve_document(&ctx, &extraction, &properties, &searched)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
