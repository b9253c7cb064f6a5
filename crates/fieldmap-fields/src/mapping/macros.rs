//! Macro resolution for `dynamic` mappings.
//!
//! Templates contain macros in either `%(key)` or `${key}` form. Supported
//! keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `value:<xpath>` | content item, through the locale candidate chain |
//! | `property:<name>` | direct property |
//! | `property-search:<name>` | search-inherited property |
//! | `attribute:<name>` | resource attribute, e.g. `attribute:dateCreated` |
//! | `locale` | the locale the content was read in |
//! | `content` | best-locale plain text |
//! | any other | user-defined macro, if registered |
//!
//! Macros that resolve to nothing are removed from the output.

use std::sync::LazyLock;

use fieldmap_core::{ExtractionResult, Locale, Properties, Resource, ResourceAttribute};
use regex::{Captures, Regex};

use super::lookup_item;

#[allow(clippy::expect_used)]
static MACRO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%\(([^()]+)\)|\$\{([^{}]+)\}").expect("Invalid macro regex")
});

const KEY_VALUE: &str = "value:";
const KEY_PROPERTY: &str = "property:";
const KEY_PROPERTY_SEARCH: &str = "property-search:";
const KEY_ATTRIBUTE: &str = "attribute:";
const KEY_LOCALE: &str = "locale";
const KEY_CONTENT: &str = "content";

/// Resolves macros against one resource and its re-read content.
#[derive(Debug)]
pub struct MacroResolver<'a> {
    resource: &'a Resource,
    content: &'a ExtractionResult,
    properties: &'a Properties,
    searched: &'a Properties,
    locale: Option<Locale>,
    macros: &'a [(String, String)],
}

impl<'a> MacroResolver<'a> {
    pub fn new(
        resource: &'a Resource,
        content: &'a ExtractionResult,
        properties: &'a Properties,
        searched: &'a Properties,
    ) -> Self {
        Self {
            resource,
            content,
            properties,
            searched,
            locale: None,
            macros: &[],
        }
    }

    /// Locale used for `value:` lookups and the `locale` macro.
    pub fn with_locale(mut self, locale: Option<Locale>) -> Self {
        self.locale = locale;
        self
    }

    /// User-defined name/value macros.
    pub fn with_macros(mut self, macros: &'a [(String, String)]) -> Self {
        self.macros = macros;
        self
    }

    /// Resolve every macro in `template`.
    pub fn resolve(&self, template: &str) -> String {
        MACRO_PATTERN
            .replace_all(template, |caps: &Captures<'_>| {
                let key = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map_or("", |m| m.as_str());
                self.resolve_key(key.trim()).unwrap_or_default()
            })
            .into_owned()
    }

    /// Resolve a single macro key.
    pub fn resolve_key(&self, key: &str) -> Option<String> {
        if let Some(xpath) = key.strip_prefix(KEY_VALUE) {
            return lookup_item(
                self.content,
                self.locale.as_ref(),
                &self.resource.locales,
                xpath.trim(),
            );
        }
        if let Some(name) = key.strip_prefix(KEY_PROPERTY_SEARCH) {
            return self.searched.value(name.trim()).map(str::to_string);
        }
        if let Some(name) = key.strip_prefix(KEY_PROPERTY) {
            return self.properties.value(name.trim()).map(str::to_string);
        }
        if let Some(name) = key.strip_prefix(KEY_ATTRIBUTE) {
            return match name.trim().parse::<ResourceAttribute>() {
                Ok(attribute) => self.resource.attribute(attribute),
                Err(e) => {
                    log::debug!("Unknown attribute macro '{key}': {e}");
                    None
                }
            };
        }
        match key {
            KEY_LOCALE => self
                .locale
                .as_ref()
                .or_else(|| self.content.best_locale())
                .map(Locale::to_string),
            KEY_CONTENT => Some(self.content.best().content.clone()),
            _ => self
                .macros
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
