//! Content extraction results.
//!
//! An [`ExtractionResult`] is what the extraction subsystem produces for a
//! resource: plain text per locale plus per-locale content items keyed by
//! xpath (`Title`, `Teaser[1]/Text`, ...). Binary documents usually carry a
//! single locale-neutral text.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Text and items extracted for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleContent {
    /// Plain text of all indexable values.
    pub content: String,
    /// Individual values keyed by xpath.
    pub items: BTreeMap<String, String>,
}

impl LocaleContent {
    /// Look up an item by xpath.
    pub fn item(&self, xpath: &str) -> Option<&str> {
        self.items.get(xpath).map(String::as_str)
    }
}

/// Structured output of converting a resource's raw content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawExtraction")]
pub struct ExtractionResult {
    default_locale: Option<Locale>,
    locales: Vec<Locale>,
    localized: HashMap<Locale, LocaleContent>,
    neutral: LocaleContent,
}

/// Serialized shape of an [`ExtractionResult`].
///
/// `locales` may be partial or missing; every locale with content is
/// registered on conversion.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawExtraction {
    default_locale: Option<Locale>,
    locales: Vec<Locale>,
    localized: HashMap<Locale, LocaleContent>,
    neutral: LocaleContent,
}

impl From<RawExtraction> for ExtractionResult {
    fn from(raw: RawExtraction) -> Self {
        let mut locales = raw.locales;
        let mut unlisted: Vec<&Locale> = raw
            .localized
            .keys()
            .filter(|l| !locales.contains(l))
            .collect();
        // map order is arbitrary
        unlisted.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        let unlisted: Vec<Locale> = unlisted.into_iter().cloned().collect();
        locales.extend(unlisted);

        Self {
            default_locale: raw.default_locale,
            locales,
            localized: raw.localized,
            neutral: raw.neutral,
        }
    }
}

impl ExtractionResult {
    /// Create an empty extraction result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result holding only locale-neutral text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().with_content(text)
    }

    /// Set the locale-neutral text.
    pub fn with_content(mut self, text: impl Into<String>) -> Self {
        self.neutral.content = text.into();
        self
    }

    /// Set a locale-neutral item.
    pub fn with_neutral_item(mut self, xpath: impl Into<String>, value: impl Into<String>) -> Self {
        self.neutral.items.insert(xpath.into(), value.into());
        self
    }

    /// Set the text for a locale, registering the locale if needed.
    pub fn with_locale_content(mut self, locale: impl Into<Locale>, text: impl Into<String>) -> Self {
        let locale = locale.into();
        self.entry(locale).content = text.into();
        self
    }

    /// Set an item for a locale, registering the locale if needed.
    pub fn with_item(
        mut self,
        locale: impl Into<Locale>,
        xpath: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let locale = locale.into();
        self.entry(locale).items.insert(xpath.into(), value.into());
        self
    }

    /// Set the default locale. It does not need to have content.
    pub fn with_default_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    fn entry(&mut self, locale: Locale) -> &mut LocaleContent {
        if !self.locales.contains(&locale) {
            self.locales.push(locale.clone());
        }
        self.localized.entry(locale).or_default()
    }

    /// The explicitly set default locale.
    pub fn default_locale(&self) -> Option<&Locale> {
        self.default_locale.as_ref()
    }

    /// Locales with content, in the order they were added.
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// The best-matching locale: the default locale if it has content,
    /// otherwise the first locale with content.
    pub fn best_locale(&self) -> Option<&Locale> {
        self.default_locale
            .as_ref()
            .filter(|l| self.localized.contains_key(*l))
            .or_else(|| self.locales.first())
    }

    /// Content for a specific locale, if any was extracted.
    pub fn locale_content(&self, locale: &Locale) -> Option<&LocaleContent> {
        self.localized.get(locale)
    }

    /// The best-locale view, falling back to the locale-neutral content.
    pub fn best(&self) -> &LocaleContent {
        self.best_locale()
            .and_then(|l| self.localized.get(l))
            .unwrap_or(&self.neutral)
    }

    /// The locale-neutral content.
    pub fn neutral(&self) -> &LocaleContent {
        &self.neutral
    }

    /// Item lookup in one locale, falling back to neutral items.
    pub fn item(&self, locale: &Locale, xpath: &str) -> Option<&str> {
        self.localized
            .get(locale)
            .and_then(|c| c.item(xpath))
            .or_else(|| self.neutral.item(xpath))
    }

    /// Narrow the best view to `locale` if content exists for it.
    ///
    /// Used when a resource is re-read under an overridden locale.
    pub fn focused_on(mut self, locale: &Locale) -> Self {
        if self.localized.contains_key(locale) {
            self.default_locale = Some(locale.clone());
        }
        self
    }
}
