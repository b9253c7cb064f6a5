//! Field configurations declared in TOML.
//!
//! ```toml
//! name = "articles"
//! description = "Article index"
//! categories = "tree"             # property | tree | none
//! structural = ["path", "type"]
//!
//! [[fields]]
//! name = "meta"
//! display = "-"
//! stored = "no"                   # yes | no | true | false | compress
//! indexed = "tokenized"           # tokenized | untokenized | yes | no
//! excerpt = false
//! boost = 1.5
//! policy = "concatenate"          # first-non-blank | concatenate
//!
//! [[fields.mappings]]
//! type = "property"
//! param = "Title"
//!
//! [[fields.mappings]]
//! type = "dynamic"
//! class = "geo"
//!
//! [[fields.mappings.geo]]
//! type = "field"
//! value = "Coord"
//! ```
//!
//! Flag values accept strings, booleans and numbers. Loading is lenient:
//! unknown mapping types, missing parameters and unknown category strategies
//! or structural fields are logged and skipped, and an unparseable boost
//! falls back to the default. Only an unreadable file, malformed TOML or a
//! missing configuration name are errors.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use fieldmap_core::{Error, GeoMapping, GeoMappingEntry, Result};
use serde::{Deserialize, Serialize};

use crate::categories::strategy_by_name;
use crate::configuration::{FieldConfiguration, FieldConfigurationBuilder};
use crate::field::{MappingPolicy, SearchField};
use crate::mapping::{DynamicResolver, FieldMapping};
use crate::mapping_type::FieldMappingType;
use crate::structural::StructuralField;

const CLASS_GEO: &str = "geo";
const CLASS_MACRO: &str = "macro";
const CLASS_CUSTOM: &str = "custom";

/// A scalar that may be written as a string, boolean or number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Text(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Top-level declaration of a configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationDeclaration {
    pub name: String,
    pub description: String,
    /// Category strategy name; `property` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    pub structural: Vec<String>,
    pub fields: Vec<FieldDeclaration>,
}

/// Declaration of one field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDeclaration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexed: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    pub mappings: Vec<MappingDeclaration>,
}

/// Declaration of one mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingDeclaration {
    #[serde(rename = "type")]
    pub mapping_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// For `dynamic` mappings: `macro` (default), `geo` or `custom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Inline geo entries for `class = "geo"`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub geo: Vec<GeoMappingEntry>,
    /// User-defined macros for macro mappings.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub macros: BTreeMap<String, String>,
}

// ============================================================================
// Loader
// ============================================================================

/// Turns declarations into sealed configurations.
///
/// Custom mappings (`class = "custom"`) refer by `param` to resolvers
/// registered here.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationLoader {
    resolvers: HashMap<String, DynamicResolver>,
}

impl ConfigurationLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a custom resolver available to declarations.
    pub fn with_resolver(mut self, resolver: DynamicResolver) -> Self {
        self.resolvers.insert(resolver.name().to_string(), resolver);
        self
    }

    /// Read and build a configuration file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<FieldConfiguration> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        log::debug!("Loading field configuration from {}", path.display());
        self.parse(&text)
    }

    /// Parse and build a configuration from TOML text.
    pub fn parse(&self, text: &str) -> Result<FieldConfiguration> {
        let declaration: ConfigurationDeclaration = toml::from_str(text)
            .map_err(|e| Error::config(format!("Invalid field configuration: {e}")))?;
        self.build(&declaration)
    }

    /// Build a configuration from a parsed declaration.
    pub fn build(&self, declaration: &ConfigurationDeclaration) -> Result<FieldConfiguration> {
        let name = declaration.name.trim();
        if name.is_empty() {
            return Err(Error::config("Field configuration has no name"));
        }

        let mut builder: FieldConfigurationBuilder =
            FieldConfiguration::builder(name).description(declaration.description.trim());

        if let Some(categories) = &declaration.categories {
            match strategy_by_name(categories) {
                Some(strategy) => builder = builder.categories_arc(strategy.into()),
                None => log::warn!(
                    "Unknown category strategy '{categories}' in '{name}', using 'property'"
                ),
            }
        }

        for structural in &declaration.structural {
            match structural.parse::<StructuralField>() {
                Ok(field) => builder = builder.with_structural(field),
                Err(e) => log::warn!("Skipping structural field in '{name}': {e}"),
            }
        }

        for field in &declaration.fields {
            if let Some(field) = self.build_field(name, field) {
                builder.add_field(field);
            }
        }

        let configuration = builder.build();
        log::info!(
            "Loaded field configuration '{}' with {} fields",
            configuration.name(),
            configuration.len()
        );
        Ok(configuration)
    }

    fn build_field(&self, configuration: &str, declaration: &FieldDeclaration) -> Option<SearchField> {
        let name = declaration.name.trim();
        if name.is_empty() {
            log::warn!("Skipping unnamed field in '{configuration}'");
            return None;
        }

        let mut field = SearchField::new(name);
        if let Some(display) = &declaration.display {
            field.set_display_name(display.as_str());
        }
        if let Some(stored) = &declaration.stored {
            field.set_stored_str(&stored.to_string());
        }
        if let Some(indexed) = &declaration.indexed {
            field.set_indexed_str(&indexed.to_string());
        }
        if let Some(excerpt) = &declaration.excerpt {
            field.set_in_excerpt_str(&excerpt.to_string());
        }
        if let Some(boost) = &declaration.boost {
            field.set_boost_str(&boost.to_string());
        }
        if let Some(default) = &declaration.default {
            field.set_default_value(default.as_str());
        }
        if let Some(policy) = &declaration.policy {
            match MappingPolicy::parse(policy) {
                Some(policy) => field.set_policy(policy),
                None => log::warn!("Unknown policy '{policy}' for field '{name}', using first-non-blank"),
            }
        }

        for mapping in &declaration.mappings {
            match self.build_mapping(mapping) {
                Ok(mapping) => field.add_mapping(mapping),
                Err(e) => log::warn!("Skipping mapping of field '{name}': {e}"),
            }
        }

        Some(field)
    }

    fn build_mapping(&self, declaration: &MappingDeclaration) -> Result<FieldMapping> {
        let mapping_type: FieldMappingType = declaration.mapping_type.parse()?;
        let param = declaration.param.as_deref();

        let mut mapping = match mapping_type {
            FieldMappingType::Dynamic => self.build_dynamic(declaration)?,
            _ => FieldMapping::from_type(mapping_type, param)?,
        };
        if let Some(default) = &declaration.default {
            mapping = mapping.with_default(default.as_str());
        }
        if let Some(locale) = &declaration.locale {
            mapping = mapping.with_locale(locale.as_str());
        }
        Ok(mapping)
    }

    fn build_dynamic(&self, declaration: &MappingDeclaration) -> Result<FieldMapping> {
        let class = declaration
            .class
            .as_deref()
            .map(str::trim)
            .unwrap_or(CLASS_MACRO)
            .to_ascii_lowercase();
        let param = declaration.param.as_deref();

        match class.as_str() {
            CLASS_MACRO => {
                let mut mapping = FieldMapping::from_type(FieldMappingType::Dynamic, param)?;
                for (name, value) in &declaration.macros {
                    mapping = mapping.with_macro(name.as_str(), value.as_str());
                }
                Ok(mapping)
            }
            CLASS_GEO => {
                let config = (!declaration.geo.is_empty())
                    .then(|| GeoMapping::new(declaration.geo.clone()));
                Ok(FieldMapping::geo(config))
            }
            CLASS_CUSTOM => {
                let name = param.map(str::trim).unwrap_or_default();
                self.resolvers
                    .get(name)
                    .cloned()
                    .map(FieldMapping::custom)
                    .ok_or_else(|| Error::not_found(name, "dynamic resolver"))
            }
            other => Err(Error::config(format!("unknown dynamic mapping class '{other}'"))),
        }
    }
}

/// Parse a configuration without custom resolvers.
pub fn parse_configuration(text: &str) -> Result<FieldConfiguration> {
    ConfigurationLoader::new().parse(text)
}

/// Load a configuration file without custom resolvers.
pub fn load_configuration(path: impl AsRef<Path>) -> Result<FieldConfiguration> {
    ConfigurationLoader::new().load(path)
}

// ============================================================================
// Tests
// ============================================================================
