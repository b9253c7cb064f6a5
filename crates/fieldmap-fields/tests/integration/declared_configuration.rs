//! Integration tests for configurations declared in TOML files.

use std::io::Write;

use fieldmap_fields::{
    load_configuration, ConfigurationLoader, DynamicResolver, FieldConfiguration, MappingPolicy,
};

use crate::common::TestHarness;

const DECLARATION: &str = r#"
name = "articles"
description = "Articles with teasers"
categories = "property"
structural = ["path"]

[[fields]]
name = "teaser"
stored = "yes"
indexed = "tokenized"
excerpt = "true"

[[fields.mappings]]
type = "item"
param = "Teaser"

[[fields]]
name = "headline"
stored = "yes"
boost = "2.0"
policy = "concatenate"

[[fields.mappings]]
type = "property"
param = "Title"

[[fields.mappings]]
type = "dynamic"
param = "(%(locale))"

[[fields]]
name = "shouted"
stored = true

[[fields.mappings]]
type = "dynamic"
class = "custom"
param = "shout"

[[fields]]
name = "broken"
boost = "heavy"

[[fields.mappings]]
type = "unheard-of"
param = "x"
"#;

fn write_declaration() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DECLARATION.as_bytes()).unwrap();
    file
}

fn loader() -> ConfigurationLoader {
    ConfigurationLoader::new().with_resolver(DynamicResolver::new("shout", |input| {
        input
            .properties
            .value("Title")
            .map(|t| format!("{}!", t.to_uppercase()))
    }))
}

#[test]
fn test_load_and_resolve_declared_configuration() {
    let file = write_declaration();
    let config = loader().load(file.path()).unwrap();
    let harness = TestHarness::new();
    let doc = harness.resolve(&config, "/sites/news/article.xml");

    assert_eq!(doc.text("teaser"), Some("Short teaser"));
    assert_eq!(doc.text("headline"), Some("T\n(en)"));
    assert_eq!(doc.get("headline").unwrap().boost, Some(2.0));
    assert_eq!(doc.text("shouted"), Some("T!"));
    assert!(!doc.contains("broken"));
    assert_eq!(doc.text("category"), Some("press"));
    assert_eq!(doc.text("path"), Some("/sites/news/article.xml"));
    assert_eq!(
        doc.names(),
        ["teaser", "headline", "shouted", "category", "path"]
    );
}

#[test]
fn test_declared_field_settings() {
    let file = write_declaration();
    let config = loader().load(file.path()).unwrap();

    assert_eq!(config.excerpt_field_names(), ["teaser"]);
    assert_eq!(config.field("headline").unwrap().policy(), MappingPolicy::Concatenate);
    let broken = config.field("broken").unwrap();
    assert_eq!(broken.boost(), 1.0);
    assert!(broken.mappings().is_empty());
}

#[test]
fn test_unregistered_custom_resolver_is_skipped() {
    let file = write_declaration();
    let config = load_configuration(file.path()).unwrap();
    assert!(config.field("shouted").unwrap().mappings().is_empty());
}

#[test]
fn test_extending_a_loaded_configuration() {
    let file = write_declaration();
    let loaded = loader().load(file.path()).unwrap();
    let merged: FieldConfiguration = FieldConfiguration::standard()
        .fields()
        .iter()
        .cloned()
        .fold(loaded.to_builder(), |builder, field| builder.with_field(field))
        .build();

    assert_eq!(merged.len(), loaded.len() + 6);
    assert_eq!(merged.excerpt_field_names(), ["teaser", "content", "description"]);
}
