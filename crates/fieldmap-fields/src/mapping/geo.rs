//! Geo-coordinate mappings.
//!
//! A geo mapping walks an ordered list of [`GeoMappingEntry`] values:
//!
//! - `field` entries name an item holding coordinates, either as
//!   `"lat,lng"` or as the location-picker JSON object
//!   `{"lat": 48.2, "lng": 11.5, ...}`. The first valid pair wins.
//! - `link` entries name an item holding the root path of another resource.
//!   That resource is read and extracted, and the geo mapping of its type is
//!   applied to it.
//!
//! Links are followed at most [`MAX_LINK_DEPTH`] levels deep. Trying to
//! follow a link beyond that is a hard failure for the whole mapping; any
//! other problem with an entry only skips that entry.

use fieldmap_core::{
    ContentService, Error, ExtractionResult, GeoEntryType, GeoMapping, GeoMappingEntry, Locale,
    Resource, Result,
};
use serde_json::Value;

use super::{lookup_item, ResourceContext};

/// Maximum number of links followed from the indexed resource.
pub const MAX_LINK_DEPTH: usize = 2;

/// Check a `"lat,lng"` pair.
///
/// ```
/// use fieldmap_fields::validate_coordinates;
///
/// assert!(validate_coordinates("48.2,11.5"));
/// assert!(!validate_coordinates("200,11.5"));
/// assert!(!validate_coordinates("abc"));
/// assert!(!validate_coordinates(""));
/// ```
pub fn validate_coordinates(value: &str) -> bool {
    split_pair(value).is_some()
}

fn split_pair(value: &str) -> Option<(f64, f64)> {
    let (lat, lng) = value.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    in_range(lat, lng).then_some((lat, lng))
}

fn in_range(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}

/// Parse coordinates from an item value into the normalized `"lat,lng"`
/// form.
///
/// Returns `None` for blank, malformed or out-of-range values.
///
/// ```
/// use fieldmap_fields::parse_coordinates;
///
/// assert_eq!(parse_coordinates(" 48.2 , 11.5 ").as_deref(), Some("48.2,11.5"));
/// assert_eq!(
///     parse_coordinates(r#"{"address":"Munich","lat":48.2,"lng":"11.5"}"#).as_deref(),
///     Some("48.2,11.5")
/// );
/// assert_eq!(parse_coordinates(r#"{"lat":48.2}"#), None);
/// ```
pub fn parse_coordinates(value: &str) -> Option<String> {
    let value = value.trim();
    let (lat, lng) = if value.starts_with('{') {
        let json: Value = serde_json::from_str(value).ok()?;
        let lat = json_number(json.get("lat")?)?;
        let lng = json_number(json.get("lng")?)?;
        in_range(lat, lng).then_some((lat, lng))?
    } else {
        split_pair(value)?
    };
    Some(format!("{lat},{lng}"))
}

fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Resolve coordinates for the indexed resource.
///
/// Uses the inline configuration if given, otherwise the geo mapping of the
/// resource's type.
pub(crate) fn resolve(
    ctx: &ResourceContext<'_>,
    extraction: &ExtractionResult,
    config: Option<&GeoMapping>,
    locale: Option<&Locale>,
) -> Option<String> {
    let owned;
    let config = match config {
        Some(config) => config,
        None => {
            owned = ctx.service.geo_mapping(&ctx.resource.type_name)?;
            &owned
        }
    };

    let walker = GeoWalker {
        service: ctx.service,
        locale,
    };
    match walker.walk(ctx.resource, extraction, config, 0) {
        Ok(value) => value,
        Err(e) => {
            log::error!(
                "Geo mapping of {} failed: {e}",
                ctx.root_path()
            );
            None
        }
    }
}

struct GeoWalker<'a> {
    service: &'a dyn ContentService,
    locale: Option<&'a Locale>,
}

impl GeoWalker<'_> {
    /// Try every entry in order for one resource at the given link depth.
    ///
    /// `Err` is reserved for exceeding the link depth.
    fn walk(
        &self,
        resource: &Resource,
        extraction: &ExtractionResult,
        config: &GeoMapping,
        depth: usize,
    ) -> Result<Option<String>> {
        for entry in config.entries() {
            let found = match entry.entry_type {
                GeoEntryType::Field => self.field(resource, extraction, entry),
                GeoEntryType::Link => self.link(resource, extraction, entry, depth)?,
            };
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    fn field(
        &self,
        resource: &Resource,
        extraction: &ExtractionResult,
        entry: &GeoMappingEntry,
    ) -> Option<String> {
        let raw = lookup_item(extraction, self.locale, &resource.locales, &entry.value)?;
        let coordinates = parse_coordinates(&raw);
        if coordinates.is_none() {
            log::warn!(
                "Invalid coordinates '{raw}' in {} at {}",
                resource.root_path,
                entry.value
            );
        }
        coordinates
    }

    fn link(
        &self,
        resource: &Resource,
        extraction: &ExtractionResult,
        entry: &GeoMappingEntry,
        depth: usize,
    ) -> Result<Option<String>> {
        let Some(target) = lookup_item(extraction, self.locale, &resource.locales, &entry.value)
        else {
            return Ok(None);
        };
        if depth >= MAX_LINK_DEPTH {
            return Err(Error::LinkDepthExceeded {
                depth: depth + 1,
                max: MAX_LINK_DEPTH,
                path: resource.root_path.clone(),
            });
        }

        match self.follow(link_target(&target)) {
            Ok((linked, content, config)) => self.walk(&linked, &content, &config, depth + 1),
            Err(e) => {
                log::warn!(
                    "Skipping geo link {} -> {target}: {e}",
                    resource.root_path
                );
                Ok(None)
            }
        }
    }

    fn follow(&self, root_path: &str) -> Result<(Resource, ExtractionResult, GeoMapping)> {
        let linked = self.service.read_resource(root_path)?;
        let config = self
            .service
            .geo_mapping(&linked.type_name)
            .ok_or_else(|| Error::not_found(&linked.type_name, "geo mapping"))?;
        let content = self.service.extract(&linked, self.locale)?;
        Ok((linked, content, config))
    }
}

/// Strip a query string or fragment from a link value.
fn link_target(value: &str) -> &str {
    value
        .split(['?', '#'])
        .next()
        .unwrap_or(value)
        .trim()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fieldmap_core::{InMemoryContentService, Properties};
    use proptest::prelude::*;

    fn poi(path: &str, coord: &str) -> (Resource, ExtractionResult) {
        (
            Resource::new(path, "poi"),
            ExtractionResult::new().with_item("en", "Coord", coord),
        )
    }

    fn linking(path: &str, target: &str) -> (Resource, ExtractionResult) {
        (
            Resource::new(path, "event"),
            ExtractionResult::new().with_item("en", "Location", target),
        )
    }

    fn service(entries: Vec<(Resource, ExtractionResult)>) -> InMemoryContentService {
        let mut service = InMemoryContentService::new()
            .with_geo_mapping("poi", GeoMapping::new(vec![GeoMappingEntry::field("Coord")]))
            .with_geo_mapping(
                "event",
                GeoMapping::new(vec![
                    GeoMappingEntry::field("Coord"),
                    GeoMappingEntry::link("Location"),
                ]),
            );
        for (resource, extraction) in entries {
            service = service.with_resource(resource, Properties::new(), Some(extraction));
        }
        service
    }

    fn resolve_for(service: &InMemoryContentService, path: &str) -> Option<String> {
        let resource = service.read_resource(path).unwrap();
        let extraction = service.extract(&resource, None).unwrap();
        let ctx = ResourceContext::new(&resource, service);
        resolve(&ctx, &extraction, None, None)
    }

    fn walk_from(service: &InMemoryContentService, path: &str) -> Result<Option<String>> {
        let resource = service.read_resource(path).unwrap();
        let extraction = service.extract(&resource, None).unwrap();
        let config = service.geo_mapping(&resource.type_name).unwrap();
        let walker = GeoWalker {
            service,
            locale: None,
        };
        walker.walk(&resource, &extraction, &config, 0)
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates("48.2,11.5"));
        assert!(validate_coordinates(" -90 , 180 "));
        assert!(!validate_coordinates("200,11.5"));
        assert!(!validate_coordinates("48.2,181"));
        assert!(!validate_coordinates("abc"));
        assert!(!validate_coordinates(""));
        assert!(!validate_coordinates("48.2"));
        assert!(!validate_coordinates("48.2,11.5,3"));
        assert!(!validate_coordinates("NaN,1"));
    }

    #[test]
    fn test_parse_coordinates_json() {
        assert_eq!(
            parse_coordinates(r#"{"lat": 48.2, "lng": 11.5, "zoom": 10}"#).as_deref(),
            Some("48.2,11.5")
        );
        assert_eq!(parse_coordinates(r#"{"lat": 95, "lng": 11.5}"#), None);
        assert_eq!(parse_coordinates("{not json"), None);
    }

    #[test]
    fn test_link_target() {
        assert_eq!(link_target("/sites/a.xml?__locale=de"), "/sites/a.xml");
        assert_eq!(link_target(" /sites/b.xml "), "/sites/b.xml");
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    #[test]
    fn test_field_entry() {
        let svc = service(vec![poi("/p.xml", "48.2,11.5")]);
        assert_eq!(resolve_for(&svc, "/p.xml").as_deref(), Some("48.2,11.5"));
    }

    #[test]
    fn test_invalid_field_yields_none() {
        let svc = service(vec![poi("/p.xml", "200,11.5")]);
        assert_eq!(resolve_for(&svc, "/p.xml"), None);
    }

    #[test]
    fn test_single_link() {
        let svc = service(vec![linking("/e.xml", "/p.xml"), poi("/p.xml", "1,2")]);
        assert_eq!(resolve_for(&svc, "/e.xml").as_deref(), Some("1,2"));
    }

    #[test]
    fn test_two_links_within_bound() {
        let svc = service(vec![
            linking("/a.xml", "/b.xml"),
            linking("/b.xml", "/p.xml"),
            poi("/p.xml", "3,4"),
        ]);
        assert_eq!(resolve_for(&svc, "/a.xml").as_deref(), Some("3,4"));
    }

    #[test]
    fn test_link_chain_exceeding_depth_is_none() {
        // A -> B -> C -> P: C would need a third link
        let svc = service(vec![
            linking("/a.xml", "/b.xml"),
            linking("/b.xml", "/c.xml"),
            linking("/c.xml", "/p.xml"),
            poi("/p.xml", "5,6"),
        ]);
        assert_eq!(resolve_for(&svc, "/a.xml"), None);
        assert!(matches!(
            walk_from(&svc, "/a.xml"),
            Err(Error::LinkDepthExceeded { depth: 3, max: MAX_LINK_DEPTH, ref path }) if path == "/c.xml"
        ));
    }

    #[test]
    fn test_missing_link_is_a_plain_miss() {
        let svc = service(vec![linking("/e.xml", "/gone.xml")]);
        assert!(matches!(walk_from(&svc, "/e.xml"), Ok(None)));
    }

    #[test]
    fn test_link_cycle_terminates() {
        let svc = service(vec![linking("/a.xml", "/b.xml"), linking("/b.xml", "/a.xml")]);
        assert_eq!(resolve_for(&svc, "/a.xml"), None);
        assert!(matches!(
            walk_from(&svc, "/a.xml"),
            Err(Error::LinkDepthExceeded { .. })
        ));
    }

    #[test]
    fn test_missing_link_target_tries_next_entry() {
        let (resource, extraction) = linking("/e.xml", "/gone.xml");
        let extraction = extraction.with_item("en", "Fallback", "7,8");
        let svc = service(vec![(resource, extraction)]);
        let resource = svc.read_resource("/e.xml").unwrap();
        let extraction = svc.extract(&resource, None).unwrap();
        let ctx = ResourceContext::new(&resource, &svc);
        let config = GeoMapping::new(vec![
            GeoMappingEntry::link("Location"),
            GeoMappingEntry::field("Fallback"),
        ]);
        assert_eq!(
            resolve(&ctx, &extraction, Some(&config), None).as_deref(),
            Some("7,8")
        );
    }

    #[test]
    fn test_no_geo_mapping_for_type() {
        let svc = InMemoryContentService::new().with_resource(
            Resource::new("/x.xml", "plain"),
            Properties::new(),
            Some(ExtractionResult::new()),
        );
        assert_eq!(resolve_for(&svc, "/x.xml"), None);
    }

    proptest! {
        #[test]
        fn test_in_range_pairs_validate(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let pair = format!("{lat},{lng}");
            prop_assert!(validate_coordinates(&pair));
            prop_assert!(parse_coordinates(&pair).is_some());
        }

        #[test]
        fn test_out_of_range_latitude_rejected(lat in 90.0001f64..1000.0, lng in -180.0f64..=180.0) {
            let pair = format!("{lat},{lng}");
            prop_assert!(!validate_coordinates(&pair));
        }

        #[test]
        fn test_validate_never_panics(s in "\\PC*") {
            let _ = validate_coordinates(&s);
        }
    }
}
