//! Field mappings: rules that produce one candidate value for a field.
//!
//! Each [`FieldMapping`] carries a [`MappingKind`] holding exactly the data
//! its variant needs, plus an optional default value and locale override.
//! Resolution is a single `match` over the kind.
//!
//! Mappings hold no per-resource state; everything about the resource being
//! indexed is passed to [`FieldMapping::resolve`]. Failures inside a mapping
//! (unreadable resources, failed extraction, malformed coordinates) are
//! logged and turn into "no value". They never reach the caller.
//!
//! # Example
//!
//! ```rust
//! use fieldmap_core::{ExtractionResult, InMemoryContentService, Properties, Resource};
//! use fieldmap_fields::{FieldMapping, ResourceContext};
//!
//! let service = InMemoryContentService::new();
//! let resource = Resource::new("/sites/default/a.html", "plain");
//! let ctx = ResourceContext::new(&resource, &service);
//! let properties = Properties::new().with("Title", "Hello");
//!
//! let mapping = FieldMapping::property("Title");
//! let value = mapping.resolve(&ctx, &ExtractionResult::new(), &properties, &Properties::new());
//! assert_eq!(value.as_deref(), Some("Hello"));
//! ```

pub mod geo;
pub mod macros;

use std::fmt;
use std::sync::Arc;

use fieldmap_core::{
    first_match, locale_candidates, ContentService, Error, ExtractionResult, GeoMapping, Locale,
    Properties, Resource, ResourceAttribute, Result,
};

use crate::is_blank;
use crate::mapping_type::FieldMappingType;

pub use geo::{parse_coordinates, validate_coordinates, MAX_LINK_DEPTH};
pub use macros::MacroResolver;

/// Prefix of the item holding localized content when plain content is blank.
const LOCALIZED_CONTENT_ITEM_PREFIX: &str = "content_";

// ============================================================================
// Resolution inputs
// ============================================================================

/// The resource being indexed, plus the service needed to re-read it or
/// follow links away from it.
#[derive(Clone, Copy)]
pub struct ResourceContext<'a> {
    pub resource: &'a Resource,
    pub service: &'a dyn ContentService,
}

impl<'a> ResourceContext<'a> {
    pub fn new(resource: &'a Resource, service: &'a dyn ContentService) -> Self {
        Self { resource, service }
    }

    pub fn root_path(&self) -> &str {
        &self.resource.root_path
    }
}

impl fmt::Debug for ResourceContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceContext")
            .field("root_path", &self.resource.root_path)
            .finish_non_exhaustive()
    }
}

/// Everything a [`DynamicResolver`] closure can look at.
#[derive(Debug, Clone, Copy)]
pub struct MappingInput<'a> {
    pub context: &'a ResourceContext<'a>,
    pub extraction: &'a ExtractionResult,
    pub properties: &'a Properties,
    pub searched: &'a Properties,
    /// The mapping's locale override, if any.
    pub locale: Option<&'a Locale>,
}

type ResolverFn = dyn Fn(&MappingInput<'_>) -> Option<String> + Send + Sync;

/// A named, user-supplied resolution function.
#[derive(Clone)]
pub struct DynamicResolver {
    name: String,
    func: Arc<ResolverFn>,
}

impl DynamicResolver {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&MappingInput<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, input: &MappingInput<'_>) -> Option<String> {
        (self.func)(input)
    }
}

impl fmt::Debug for DynamicResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicResolver")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Mapping kinds
// ============================================================================

/// Where a mapping takes its value from.
#[derive(Debug, Clone)]
pub enum MappingKind {
    /// Best-locale plain-text content.
    Content,
    /// A property of the resource itself.
    Property { name: String },
    /// A property resolved through folder inheritance.
    PropertySearch { name: String },
    /// One extracted content item.
    Item { xpath: String },
    /// A resource attribute.
    Attribute(ResourceAttribute),
    /// A macro template resolved against re-extracted content.
    Macro {
        template: String,
        /// Additional name/value pairs available as macros.
        macros: Vec<(String, String)>,
    },
    /// Geo coordinates, optionally following links to other resources.
    ///
    /// With no inline configuration, the geo mapping of the resource's type
    /// is used.
    Geo { config: Option<GeoMapping> },
    /// A user-supplied closure.
    Custom(DynamicResolver),
}

/// One (field, source) rule.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    kind: MappingKind,
    default_value: Option<String>,
    locale: Option<Locale>,
}

impl FieldMapping {
    pub fn new(kind: MappingKind) -> Self {
        Self {
            kind,
            default_value: None,
            locale: None,
        }
    }

    pub fn content() -> Self {
        Self::new(MappingKind::Content)
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self::new(MappingKind::Property { name: name.into() })
    }

    pub fn property_search(name: impl Into<String>) -> Self {
        Self::new(MappingKind::PropertySearch { name: name.into() })
    }

    pub fn item(xpath: impl Into<String>) -> Self {
        Self::new(MappingKind::Item {
            xpath: xpath.into(),
        })
    }

    pub fn attribute(attribute: ResourceAttribute) -> Self {
        Self::new(MappingKind::Attribute(attribute))
    }

    pub fn macro_template(template: impl Into<String>) -> Self {
        Self::new(MappingKind::Macro {
            template: template.into(),
            macros: Vec::new(),
        })
    }

    pub fn geo(config: Option<GeoMapping>) -> Self {
        Self::new(MappingKind::Geo { config })
    }

    pub fn custom(resolver: DynamicResolver) -> Self {
        Self::new(MappingKind::Custom(resolver))
    }

    /// Build a mapping from a type tag and its parameter string.
    ///
    /// `content` ignores the parameter; `dynamic` treats it as a macro
    /// template. Every other type requires a non-blank parameter, and
    /// `attribute` requires a known attribute name.
    pub fn from_type(mapping_type: FieldMappingType, param: Option<&str>) -> Result<Self> {
        let param = param.map(str::trim).filter(|p| !p.is_empty());
        let required = || {
            param.map(str::to_string).ok_or_else(|| {
                Error::config(format!("mapping type '{mapping_type}' requires a parameter"))
            })
        };
        Ok(match mapping_type {
            FieldMappingType::Content => Self::content(),
            FieldMappingType::Property => Self::property(required()?),
            FieldMappingType::PropertySearch => Self::property_search(required()?),
            FieldMappingType::Item => Self::item(required()?),
            FieldMappingType::Attribute => Self::attribute(required()?.parse()?),
            FieldMappingType::Dynamic => Self::macro_template(required()?),
        })
    }

    /// Set the value used when the mapping itself yields nothing.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.default_value = (!is_blank(&value)).then_some(value);
        self
    }

    /// Resolve against a specific locale instead of the best one.
    pub fn with_locale(mut self, locale: impl Into<Locale>) -> Self {
        let locale = locale.into();
        self.locale = (!locale.is_empty()).then_some(locale);
        self
    }

    /// Add a user-defined macro; only meaningful for macro mappings.
    pub fn with_macro(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let MappingKind::Macro { macros, .. } = &mut self.kind {
            macros.push((name.into(), value.into()));
        }
        self
    }

    pub fn kind(&self) -> &MappingKind {
        &self.kind
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// The type tag of this mapping.
    pub fn mapping_type(&self) -> FieldMappingType {
        match &self.kind {
            MappingKind::Content => FieldMappingType::Content,
            MappingKind::Property { .. } => FieldMappingType::Property,
            MappingKind::PropertySearch { .. } => FieldMappingType::PropertySearch,
            MappingKind::Item { .. } => FieldMappingType::Item,
            MappingKind::Attribute(_) => FieldMappingType::Attribute,
            MappingKind::Macro { .. } | MappingKind::Geo { .. } | MappingKind::Custom(_) => {
                FieldMappingType::Dynamic
            }
        }
    }

    /// The parameter as it would appear in a declaration.
    pub fn param(&self) -> Option<&str> {
        match &self.kind {
            MappingKind::Content | MappingKind::Geo { .. } => None,
            MappingKind::Property { name } | MappingKind::PropertySearch { name } => Some(name),
            MappingKind::Item { xpath } => Some(xpath),
            MappingKind::Attribute(attribute) => Some(attribute.as_str()),
            MappingKind::Macro { template, .. } => Some(template),
            MappingKind::Custom(resolver) => Some(resolver.name()),
        }
    }

    /// Resolve this mapping for one resource.
    ///
    /// A blank result falls back to the mapping's default value.
    pub fn resolve(
        &self,
        ctx: &ResourceContext<'_>,
        extraction: &ExtractionResult,
        properties: &Properties,
        searched: &Properties,
    ) -> Option<String> {
        let value = match &self.kind {
            MappingKind::Content => self.resolve_content(extraction),
            MappingKind::Property { name } => properties.value(name).map(str::to_string),
            MappingKind::PropertySearch { name } => searched.value(name).map(str::to_string),
            MappingKind::Item { xpath } => {
                lookup_item(extraction, self.locale.as_ref(), &ctx.resource.locales, xpath)
            }
            MappingKind::Attribute(attribute) => ctx.resource.attribute(*attribute),
            MappingKind::Macro { template, macros } => {
                self.resolve_macro(ctx, extraction, properties, searched, template, macros)
            }
            MappingKind::Geo { config } => {
                geo::resolve(ctx, extraction, config.as_ref(), self.locale.as_ref())
            }
            MappingKind::Custom(resolver) => resolver.call(&MappingInput {
                context: ctx,
                extraction,
                properties,
                searched,
                locale: self.locale.as_ref(),
            }),
        };

        value
            .filter(|v| !is_blank(v))
            .or_else(|| self.default_value.clone())
    }

    fn resolve_content(&self, extraction: &ExtractionResult) -> Option<String> {
        let locale = self
            .locale
            .as_ref()
            .filter(|l| extraction.locale_content(l).is_some())
            .or_else(|| extraction.best_locale());

        let Some(locale) = locale else {
            return Some(extraction.neutral().content.clone());
        };
        let content = extraction
            .locale_content(locale)
            .unwrap_or_else(|| extraction.best());
        if !is_blank(&content.content) {
            return Some(content.content.clone());
        }

        let key = format!("{LOCALIZED_CONTENT_ITEM_PREFIX}{locale}");
        extraction
            .item(locale, &key)
            .filter(|v| !is_blank(v))
            .map(str::to_string)
    }

    fn resolve_macro(
        &self,
        ctx: &ResourceContext<'_>,
        extraction: &ExtractionResult,
        properties: &Properties,
        searched: &Properties,
        template: &str,
        macros: &[(String, String)],
    ) -> Option<String> {
        let locale = self
            .locale
            .clone()
            .or_else(|| extraction.best_locale().cloned());

        let content = match ctx.service.extract(ctx.resource, locale.as_ref()) {
            Ok(content) => content,
            Err(e) => {
                log::warn!(
                    "Failed to read structured content of {} for macro mapping: {e}",
                    ctx.root_path()
                );
                return None;
            }
        };

        let resolver = MacroResolver::new(ctx.resource, &content, properties, searched)
            .with_locale(locale)
            .with_macros(macros);
        Some(resolver.resolve(template))
    }
}

// ============================================================================
// Item lookup
// ============================================================================

/// Look up an item through the locale candidate chain.
///
/// Candidates are the requested locale, the extraction's default locale,
/// every extracted locale, then the resource's locales. Locale-neutral items
/// are consulted last.
pub(crate) fn lookup_item(
    extraction: &ExtractionResult,
    requested: Option<&Locale>,
    resource_locales: &[Locale],
    xpath: &str,
) -> Option<String> {
    let available: Vec<Locale> = extraction
        .locales()
        .iter()
        .chain(resource_locales)
        .cloned()
        .collect();
    let default = extraction
        .default_locale()
        .or_else(|| extraction.best_locale());
    let candidates = locale_candidates(requested, default, &available);

    first_match(&candidates, |locale| {
        extraction
            .locale_content(locale)
            .and_then(|c| c.item(xpath))
            .filter(|v| !is_blank(v))
            .map(str::to_string)
    })
    .or_else(|| {
        extraction
            .neutral()
            .item(xpath)
            .filter(|v| !is_blank(v))
            .map(str::to_string)
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fieldmap_core::InMemoryContentService;

    fn resolve_with(
        mapping: &FieldMapping,
        resource: &Resource,
        service: &InMemoryContentService,
        extraction: &ExtractionResult,
    ) -> Option<String> {
        let ctx = ResourceContext::new(resource, service);
        let properties = Properties::new()
            .with("Title", "Direct title")
            .with("Blank", "  ");
        let searched = Properties::new()
            .with("Title", "Direct title")
            .with("Keywords", "inherited");
        mapping.resolve(&ctx, extraction, &properties, &searched)
    }

    fn resolve(mapping: &FieldMapping, extraction: &ExtractionResult) -> Option<String> {
        let resource = Resource::new("/sites/default/a.xml", "article").with_locales(["en", "de"]);
        resolve_with(mapping, &resource, &InMemoryContentService::new(), extraction)
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    #[test]
    fn test_from_type() {
        let m = FieldMapping::from_type(FieldMappingType::Property, Some(" Title ")).unwrap();
        assert_eq!(m.mapping_type(), FieldMappingType::Property);
        assert_eq!(m.param(), Some("Title"));

        let m = FieldMapping::from_type(FieldMappingType::Content, Some("ignored")).unwrap();
        assert_eq!(m.param(), None);

        let m = FieldMapping::from_type(FieldMappingType::Attribute, Some("dateCreated")).unwrap();
        assert!(matches!(m.kind(), MappingKind::Attribute(ResourceAttribute::DateCreated)));

        let m = FieldMapping::from_type(FieldMappingType::Dynamic, Some("%(locale)")).unwrap();
        assert!(matches!(m.kind(), MappingKind::Macro { .. }));
    }

    #[test]
    fn test_from_type_rejects_missing_param() {
        assert!(FieldMapping::from_type(FieldMappingType::Item, None).is_err());
        assert!(FieldMapping::from_type(FieldMappingType::Property, Some("  ")).is_err());
        assert!(FieldMapping::from_type(FieldMappingType::Attribute, Some("colour")).is_err());
    }

    #[test]
    fn test_dynamic_variants_share_type() {
        let custom = FieldMapping::custom(DynamicResolver::new("x", |_| None));
        assert_eq!(custom.mapping_type(), FieldMappingType::Dynamic);
        assert_eq!(FieldMapping::geo(None).mapping_type(), FieldMappingType::Dynamic);
        assert_eq!(custom.param(), Some("x"));
    }

    #[test]
    fn test_blank_default_is_ignored() {
        assert_eq!(FieldMapping::content().with_default("  ").default_value(), None);
    }

    // ------------------------------------------------------------------------
    // Property and attribute mappings
    // ------------------------------------------------------------------------

    #[test]
    fn test_property_direct_and_searched() {
        let empty = ExtractionResult::new();
        assert_eq!(
            resolve(&FieldMapping::property("Title"), &empty).as_deref(),
            Some("Direct title")
        );
        assert_eq!(resolve(&FieldMapping::property("Keywords"), &empty), None);
        assert_eq!(
            resolve(&FieldMapping::property_search("Keywords"), &empty).as_deref(),
            Some("inherited")
        );
    }

    #[test]
    fn test_blank_value_falls_back_to_default() {
        let mapping = FieldMapping::property("Blank").with_default("fallback");
        assert_eq!(
            resolve(&mapping, &ExtractionResult::new()).as_deref(),
            Some("fallback")
        );
    }

    #[test]
    fn test_attribute() {
        let mapping = FieldMapping::attribute(ResourceAttribute::Type);
        assert_eq!(
            resolve(&mapping, &ExtractionResult::new()).as_deref(),
            Some("article")
        );
    }

    // ------------------------------------------------------------------------
    // Content mapping
    // ------------------------------------------------------------------------

    #[test]
    fn test_content_best_locale() {
        let extraction = ExtractionResult::new()
            .with_locale_content("en", "english")
            .with_locale_content("de", "deutsch")
            .with_default_locale("de");
        assert_eq!(
            resolve(&FieldMapping::content(), &extraction).as_deref(),
            Some("deutsch")
        );
        assert_eq!(
            resolve(&FieldMapping::content().with_locale("en"), &extraction).as_deref(),
            Some("english")
        );
    }

    #[test]
    fn test_content_falls_back_to_localized_item() {
        let extraction = ExtractionResult::new()
            .with_locale_content("en", "")
            .with_item("en", "content_en", "from item");
        assert_eq!(
            resolve(&FieldMapping::content(), &extraction).as_deref(),
            Some("from item")
        );
    }

    #[test]
    fn test_content_neutral() {
        let extraction = ExtractionResult::from_text("plain text");
        assert_eq!(
            resolve(&FieldMapping::content(), &extraction).as_deref(),
            Some("plain text")
        );
        assert_eq!(resolve(&FieldMapping::content(), &ExtractionResult::new()), None);
    }

    // ------------------------------------------------------------------------
    // Item mapping
    // ------------------------------------------------------------------------

    #[test]
    fn test_content_and_item_from_fixture_without_locale_list() {
        let extraction: ExtractionResult = serde_json::from_str(
            r#"{"localized": {"en": {"content": "Body text", "items": {"Title": "T"}}}}"#,
        )
        .unwrap();
        let resource = Resource::new("/sites/default/b.xml", "article");
        let service = InMemoryContentService::new();
        assert_eq!(
            resolve_with(&FieldMapping::content(), &resource, &service, &extraction).as_deref(),
            Some("Body text")
        );
        assert_eq!(
            resolve_with(&FieldMapping::item("Title"), &resource, &service, &extraction).as_deref(),
            Some("T")
        );
    }

    #[test]
    fn test_item_locale_chain() {
        let extraction = ExtractionResult::new()
            .with_item("en", "Teaser", "")
            .with_item("de", "Teaser", "Anriss")
            .with_default_locale("en");
        assert_eq!(
            resolve(&FieldMapping::item("Teaser"), &extraction).as_deref(),
            Some("Anriss")
        );
    }

    #[test]
    fn test_item_prefers_requested_locale() {
        let extraction = ExtractionResult::new()
            .with_item("en", "Teaser", "teaser")
            .with_item("de", "Teaser", "Anriss")
            .with_default_locale("en");
        let mapping = FieldMapping::item("Teaser").with_locale("de_AT");
        assert_eq!(resolve(&mapping, &extraction).as_deref(), Some("Anriss"));
    }

    #[test]
    fn test_item_neutral_fallback() {
        let extraction = ExtractionResult::new()
            .with_locale_content("en", "text")
            .with_neutral_item("Code", "X1");
        assert_eq!(
            resolve(&FieldMapping::item("Code"), &extraction).as_deref(),
            Some("X1")
        );
        assert_eq!(resolve(&FieldMapping::item("Missing"), &extraction), None);
    }

    // ------------------------------------------------------------------------
    // Macro and custom mappings
    // ------------------------------------------------------------------------

    #[test]
    fn test_macro_mapping_reextracts() {
        let resource = Resource::new("/a.xml", "article");
        let service = InMemoryContentService::new().with_resource(
            resource.clone(),
            Properties::new(),
            Some(
                ExtractionResult::new()
                    .with_item("en", "Name", "Alice")
                    .with_item("de", "Name", "Alicia"),
            ),
        );
        let mapping = FieldMapping::macro_template("%(value:Name) (%(locale))").with_locale("de");
        let value = resolve_with(&mapping, &resource, &service, &ExtractionResult::new());
        assert_eq!(value.as_deref(), Some("Alicia (de)"));
    }

    #[test]
    fn test_macro_mapping_extraction_failure_yields_default() {
        let resource = Resource::new("/missing.xml", "article");
        let mapping = FieldMapping::macro_template("%(value:Name)").with_default("none");
        let value = resolve_with(
            &mapping,
            &resource,
            &InMemoryContentService::new(),
            &ExtractionResult::new(),
        );
        assert_eq!(value.as_deref(), Some("none"));
    }

    #[test]
    fn test_custom_mapping() {
        let mapping = FieldMapping::custom(DynamicResolver::new("upper-title", |input| {
            input.properties.value("Title").map(str::to_uppercase)
        }));
        assert_eq!(
            resolve(&mapping, &ExtractionResult::new()).as_deref(),
            Some("DIRECT TITLE")
        );
    }
}
