//! Search field descriptors.
//!
//! A [`SearchField`] names one index field, owns its ordered mappings and
//! decides how resolved text is stored and indexed.
//!
//! Storage flags keep two invariants at all times:
//!
//! - compressed implies stored
//! - tokenized implies indexed
//!
//! Boost is never negative; an unparseable boost becomes [`BOOST_DEFAULT`].

use std::hash::{Hash, Hasher};

use fieldmap_core::{ExtractionResult, Properties};
use serde::{Deserialize, Serialize};

use crate::document::{IndexField, IndexOptions};
use crate::is_blank;
use crate::mapping::{FieldMapping, ResourceContext};

/// Boost applied when none is configured.
pub const BOOST_DEFAULT: f32 = 1.0;

/// Display name meaning "do not display this field".
pub const IGNORE_DISPLAY_NAME: &str = "-";

/// Separator between values of a concatenating field.
pub const CONCATENATE_SEPARATOR: &str = "\n";

/// How a field combines the values of its mappings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingPolicy {
    /// The first mapping with a non-blank value wins.
    #[default]
    FirstNonBlank,
    /// Every non-blank value, in mapping order, joined by newlines.
    Concatenate,
}

impl MappingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstNonBlank => "first-non-blank",
            Self::Concatenate => "concatenate",
        }
    }

    /// Parse a policy token; blank or unknown input yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first-non-blank" | "first" => Some(Self::FirstNonBlank),
            "concatenate" | "concat" => Some(Self::Concatenate),
            _ => None,
        }
    }
}

/// A named, typed field of a configuration.
///
/// Two fields are equal when their names are equal.
#[derive(Debug, Clone)]
pub struct SearchField {
    name: String,
    display_name: Option<String>,
    default_value: Option<String>,
    boost: f32,
    mappings: Vec<FieldMapping>,
    stored: bool,
    compressed: bool,
    indexed: bool,
    tokenized: bool,
    in_excerpt: bool,
    displayed: bool,
    policy: MappingPolicy,
}

impl SearchField {
    /// Create an indexed, tokenized, unstored field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            default_value: None,
            boost: BOOST_DEFAULT,
            mappings: Vec::new(),
            stored: false,
            compressed: false,
            indexed: true,
            tokenized: true,
            in_excerpt: false,
            displayed: true,
            policy: MappingPolicy::FirstNonBlank,
        }
    }

    // ------------------------------------------------------------------
    // Builder-style configuration
    // ------------------------------------------------------------------

    pub fn with_mapping(mut self, mapping: FieldMapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub fn with_stored(mut self, stored: bool) -> Self {
        self.set_stored(stored);
        self
    }

    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.set_compressed(compressed);
        self
    }

    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.set_indexed(indexed);
        self
    }

    pub fn with_tokenized(mut self, tokenized: bool) -> Self {
        self.set_tokenized(tokenized);
        self
    }

    pub fn with_in_excerpt(mut self, in_excerpt: bool) -> Self {
        self.set_in_excerpt(in_excerpt);
        self
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.set_boost(boost);
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.set_default_value(value);
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.set_display_name(display_name);
        self
    }

    pub fn with_policy(mut self, policy: MappingPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ------------------------------------------------------------------
    // Typed setters
    // ------------------------------------------------------------------

    pub fn add_mapping(&mut self, mapping: FieldMapping) {
        self.mappings.push(mapping);
    }

    /// Clearing `stored` also clears `compressed`.
    pub fn set_stored(&mut self, stored: bool) {
        self.stored = stored;
        if !stored {
            self.compressed = false;
        }
    }

    /// Setting `compressed` forces `stored`.
    pub fn set_compressed(&mut self, compressed: bool) {
        self.compressed = compressed;
        if compressed {
            self.stored = true;
        }
    }

    /// Clearing `indexed` also clears `tokenized`.
    pub fn set_indexed(&mut self, indexed: bool) {
        self.indexed = indexed;
        if !indexed {
            self.tokenized = false;
        }
    }

    /// Setting `tokenized` forces `indexed`.
    pub fn set_tokenized(&mut self, tokenized: bool) {
        self.tokenized = tokenized;
        if tokenized {
            self.indexed = true;
        }
    }

    pub fn set_in_excerpt(&mut self, in_excerpt: bool) {
        self.in_excerpt = in_excerpt;
    }

    /// Negative boosts become 0; NaN becomes the default.
    pub fn set_boost(&mut self, boost: f32) {
        self.boost = if boost.is_nan() {
            BOOST_DEFAULT
        } else {
            boost.max(0.0)
        };
    }

    pub fn set_default_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.default_value = (!is_blank(&value)).then_some(value);
    }

    /// `-` marks the field as not displayed.
    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        let display_name = display_name.into();
        let trimmed = display_name.trim();
        if trimmed == IGNORE_DISPLAY_NAME {
            self.displayed = false;
            self.display_name = None;
        } else {
            self.displayed = true;
            self.display_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
    }

    pub fn set_policy(&mut self, policy: MappingPolicy) {
        self.policy = policy;
    }

    // ------------------------------------------------------------------
    // Legacy string setters
    // ------------------------------------------------------------------

    /// `compress` stores compressed, `yes`/`true` stores, anything else does
    /// not store.
    pub fn set_stored_str(&mut self, value: &str) {
        match value.trim().to_ascii_lowercase().as_str() {
            "compress" => self.set_compressed(true),
            "yes" | "true" => {
                self.set_compressed(false);
                self.set_stored(true);
            }
            _ => self.set_stored(false),
        }
    }

    /// `tokenized`/`yes`/`true` indexes tokenized, `untokenized` indexes as
    /// a single term, anything else does not index.
    pub fn set_indexed_str(&mut self, value: &str) {
        match value.trim().to_ascii_lowercase().as_str() {
            "tokenized" | "yes" | "true" => self.set_tokenized(true),
            "untokenized" => {
                self.set_indexed(true);
                self.set_tokenized(false);
            }
            _ => self.set_indexed(false),
        }
    }

    pub fn set_in_excerpt_str(&mut self, value: &str) {
        let value = value.trim();
        self.in_excerpt = value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes");
    }

    /// Parse failures fall back to [`BOOST_DEFAULT`].
    pub fn set_boost_str(&mut self, value: &str) {
        match value.trim().parse::<f32>() {
            Ok(boost) => self.set_boost(boost),
            Err(e) => {
                log::warn!(
                    "Invalid boost '{value}' for field '{}', using {BOOST_DEFAULT}: {e}",
                    self.name
                );
                self.boost = BOOST_DEFAULT;
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The display name, defaulting to the field name.
    pub fn display_name(&self) -> Option<&str> {
        if !self.displayed {
            return None;
        }
        Some(self.display_name.as_deref().unwrap_or(&self.name))
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn is_stored(&self) -> bool {
        self.stored
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn is_tokenized(&self) -> bool {
        self.tokenized
    }

    pub fn is_in_excerpt(&self) -> bool {
        self.in_excerpt
    }

    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    pub fn policy(&self) -> MappingPolicy {
        self.policy
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions::from_flags(self.indexed, self.tokenized)
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolve the field's mappings under its policy.
    pub fn resolve_text(
        &self,
        ctx: &ResourceContext<'_>,
        extraction: &ExtractionResult,
        properties: &Properties,
        searched: &Properties,
    ) -> Option<String> {
        let mut values = self
            .mappings
            .iter()
            .filter_map(|m| m.resolve(ctx, extraction, properties, searched))
            .filter(|v| !is_blank(v));

        match self.policy {
            MappingPolicy::FirstNonBlank => values.next(),
            MappingPolicy::Concatenate => {
                let joined = values.collect::<Vec<_>>().join(CONCATENATE_SEPARATOR);
                (!joined.is_empty()).then_some(joined)
            }
        }
    }

    /// Turn resolved text into an index field.
    ///
    /// Blank text is replaced by the default value. If that is blank too,
    /// the field is omitted.
    ///
    /// ```
    /// use fieldmap_fields::SearchField;
    ///
    /// let field = SearchField::new("rating").with_default("none").with_boost(2.0);
    /// let built = field.build_index_field(Some("  ")).unwrap();
    /// assert_eq!(built.text, "none");
    /// assert_eq!(built.boost, Some(2.0));
    ///
    /// assert!(SearchField::new("empty").build_index_field(None).is_none());
    /// ```
    pub fn build_index_field(&self, content: Option<&str>) -> Option<IndexField> {
        let text = content
            .filter(|c| !is_blank(c))
            .or(self.default_value.as_deref())?;

        #[allow(clippy::float_cmp)]
        let boost = (self.boost != BOOST_DEFAULT).then_some(self.boost);

        Some(IndexField {
            name: self.name.clone(),
            text: text.to_string(),
            stored: self.stored || self.compressed,
            compressed: self.compressed,
            index: self.index_options(),
            boost,
        })
    }
}

impl PartialEq for SearchField {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SearchField {}

impl Hash for SearchField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
