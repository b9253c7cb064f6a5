//! Integration tests for the built-in standard configuration.

use fieldmap_core::{Properties, Resource};
use fieldmap_fields::{FieldConfiguration, IndexOptions};

use crate::common::TestHarness;

const ARTICLE: &str = "/sites/news/article.xml";

#[test]
fn test_standard_article_document() {
    let harness = TestHarness::new();
    let doc = harness.resolve(&FieldConfiguration::standard(), ARTICLE);

    assert_eq!(doc.root_path, ARTICLE);
    assert_eq!(doc.text("content"), Some("English body"));
    assert_eq!(doc.text("title"), Some("T"));
    assert_eq!(doc.text("description"), Some("D"));
    // keywords are not set on the article itself
    assert_eq!(doc.text("keywords"), None);
    assert_eq!(doc.text("meta"), Some("T\nD"));
}

#[test]
fn test_searched_properties_feed_categories() {
    let harness = TestHarness::new();
    let doc = harness.resolve(&FieldConfiguration::standard(), ARTICLE);

    let category = doc.get("category").unwrap();
    assert_eq!(category.text, "press");
    assert_eq!(category.index, IndexOptions::Untokenized);
}

#[test]
fn test_structural_fields() {
    let harness = TestHarness::new();
    let doc = harness.resolve(&FieldConfiguration::standard(), ARTICLE);

    assert_eq!(doc.text("path"), Some(ARTICLE));
    assert_eq!(doc.text("type"), Some("article"));
    assert_eq!(doc.text("res_locales"), Some("en de"));
    assert_eq!(
        doc.values("parent-folders").collect::<Vec<_>>(),
        ["/", "/sites/", "/sites/news/"]
    );
}

#[test]
fn test_folder_without_content() {
    let harness = TestHarness::new();
    let doc = harness.resolve(&FieldConfiguration::standard(), "/sites/news/");

    assert!(!doc.contains("content"));
    assert!(!doc.contains("title"));
    assert_eq!(doc.text("category"), Some("press"));
    assert_eq!(doc.text("type"), Some("folder"));
}

#[test]
fn test_meta_concatenates_in_mapping_order() {
    let mut harness = TestHarness::new();
    harness.service = harness.service.with_resource(
        Resource::new("/sites/full.html", "plain"),
        Properties::new()
            .with("Description", "D")
            .with("Keywords", "K")
            .with("Title", "T"),
        None,
    );
    let doc = harness.resolve(&FieldConfiguration::standard(), "/sites/full.html");
    assert_eq!(doc.text("meta"), Some("T\nK\nD"));
    assert!(doc.get("meta").unwrap().stored_text().is_none());
}
