//! Integration tests for geo mappings following links between resources.

use fieldmap_fields::{FieldConfiguration, FieldMapping, SearchField};

use crate::common::TestHarness;

fn geo_configuration() -> FieldConfiguration {
    FieldConfiguration::builder("geo")
        .with_field(
            SearchField::new("geocoords")
                .with_stored(true)
                .with_tokenized(false)
                .with_mapping(FieldMapping::geo(None)),
        )
        .with_field(
            SearchField::new("title")
                .with_stored(true)
                .with_mapping(FieldMapping::item("Title").with_default("untitled")),
        )
        .build()
}

#[test]
fn test_direct_coordinates() {
    let harness = TestHarness::new().with_item("/poi/tower.xml", "poi", "Coord", "48.2,11.5");
    let doc = harness.resolve(&geo_configuration(), "/poi/tower.xml");
    assert_eq!(doc.text("geocoords"), Some("48.2,11.5"));
}

#[test]
fn test_location_picker_json() {
    let harness = TestHarness::new().with_item(
        "/poi/tower.xml",
        "poi",
        "Coord",
        r#"{"address":"Tower","lat":"48.2","lng":11.5,"type":"roadmap"}"#,
    );
    let doc = harness.resolve(&geo_configuration(), "/poi/tower.xml");
    assert_eq!(doc.text("geocoords"), Some("48.2,11.5"));
}

#[test]
fn test_linked_coordinates() {
    let harness = TestHarness::new()
        .with_item("/events/concert.xml", "event", "Location", "/poi/hall.xml")
        .with_item("/poi/hall.xml", "poi", "Coord", "52.5,13.4");
    let doc = harness.resolve(&geo_configuration(), "/events/concert.xml");
    assert_eq!(doc.text("geocoords"), Some("52.5,13.4"));
}

#[test]
fn test_chain_of_three_links_yields_no_coordinates() {
    let harness = TestHarness::new()
        .with_item("/events/a.xml", "event", "Location", "/events/b.xml")
        .with_item("/events/b.xml", "event", "Location", "/events/c.xml")
        .with_item("/events/c.xml", "event", "Location", "/poi/hall.xml")
        .with_item("/poi/hall.xml", "poi", "Coord", "52.5,13.4");
    let doc = harness.resolve(&geo_configuration(), "/events/a.xml");

    assert!(!doc.contains("geocoords"));
    // sibling fields are unaffected
    assert_eq!(doc.text("title"), Some("untitled"));
}

#[test]
fn test_broken_link_degrades_to_missing_field() {
    let harness =
        TestHarness::new().with_item("/events/a.xml", "event", "Location", "/nowhere.xml");
    let doc = harness.resolve(&geo_configuration(), "/events/a.xml");
    assert!(!doc.contains("geocoords"));
    assert!(doc.contains("title"));
}
