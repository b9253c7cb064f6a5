//! Command implementations.
//!
//! Each command returns its output as a string; `main` prints it.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use fieldmap_core::{ContentService, Error as CoreError, ExtractionResult, InMemoryContentService};
use fieldmap_fields::{
    load_configuration, EngineSchema, FieldConfiguration, FieldMapping, IndexDocument,
    ResourceContext, SearchField,
};
use tantivy::schema::FieldType;

use crate::config::FieldmapConfig;
use crate::error::Result;

/// Load the field configuration a command works on.
///
/// An explicit path wins over the settings; with neither, the built-in
/// `standard` configuration is used.
pub fn load_field_configuration(
    path: Option<&Path>,
    settings: &FieldmapConfig,
) -> Result<FieldConfiguration> {
    match path.or(settings.configuration.as_deref()) {
        Some(path) => Ok(load_configuration(path)?),
        None => {
            log::debug!("No field configuration given, using the standard configuration");
            Ok(FieldConfiguration::standard())
        }
    }
}

// ============================================================================
// fields
// ============================================================================

/// List fields with their flags and mappings.
pub fn cmd_fields(configuration: &FieldConfiguration) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Configuration: {}", configuration.name());
    if !configuration.description().is_empty() {
        let _ = writeln!(out, "Description:   {}", configuration.description());
    }
    let _ = writeln!(
        out,
        "Categories:    {}",
        configuration.category_strategy().name()
    );
    let structural: Vec<String> = configuration
        .structural_fields()
        .iter()
        .map(ToString::to_string)
        .collect();
    if !structural.is_empty() {
        let _ = writeln!(out, "Structural:    {}", structural.join(", "));
    }

    for field in configuration.fields() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}  [{}]", field.name(), field_flags(field));
        if let Some(display) = field.display_name() {
            let _ = writeln!(out, "    display: {display}");
        }
        if let Some(default) = field.default_value() {
            let _ = writeln!(out, "    default: {default}");
        }
        for mapping in field.mappings() {
            let _ = writeln!(out, "    - {}", describe_mapping(mapping));
        }
    }
    out
}

fn field_flags(field: &SearchField) -> String {
    let mut flags = Vec::new();
    if field.is_stored() {
        flags.push("stored".to_string());
    }
    if field.is_compressed() {
        flags.push("compressed".to_string());
    }
    if field.is_tokenized() {
        flags.push("tokenized".to_string());
    } else if field.is_indexed() {
        flags.push("untokenized".to_string());
    }
    if field.is_in_excerpt() {
        flags.push("excerpt".to_string());
    }
    flags.push(format!("boost={}", field.boost()));
    flags.push(format!("policy={}", field.policy().as_str()));
    flags.join(", ")
}

fn describe_mapping(mapping: &FieldMapping) -> String {
    let mut text = mapping.mapping_type().to_string();
    if let Some(param) = mapping.param() {
        let _ = write!(text, " {param}");
    }
    if let Some(locale) = mapping.locale() {
        let _ = write!(text, " (locale {locale})");
    }
    if let Some(default) = mapping.default_value() {
        let _ = write!(text, " (default '{default}')");
    }
    text
}

// ============================================================================
// resolve
// ============================================================================

/// Resolve resources of a JSON fixture and render their documents as JSON.
///
/// With `root_path` a single document is printed, otherwise an array with
/// one document per stored resource.
pub fn cmd_resolve(
    configuration: &FieldConfiguration,
    fixture: &Path,
    root_path: Option<&str>,
    settings: &FieldmapConfig,
) -> Result<String> {
    let text = fs::read_to_string(fixture).map_err(|e| CoreError::io_with_path(e, fixture))?;
    let service = InMemoryContentService::from_json(&text)?;

    let output = match root_path {
        Some(root_path) => {
            let document = resolve_resource(configuration, &service, root_path)?;
            to_json(&document, settings.pretty)?
        }
        None => {
            let documents = service
                .root_paths()
                .into_iter()
                .map(|path| resolve_resource(configuration, &service, path))
                .collect::<Result<Vec<_>>>()?;
            log::info!("Resolved {} resources", documents.len());
            to_json(&documents, settings.pretty)?
        }
    };
    Ok(output)
}

/// Resolve one stored resource the way the indexer would.
///
/// A resource without extractable content still yields its property and
/// structural fields. Extraction errors that are not specific to the
/// resource abort the run.
pub fn resolve_resource(
    configuration: &FieldConfiguration,
    service: &dyn ContentService,
    root_path: &str,
) -> Result<IndexDocument> {
    let resource = service.read_resource(root_path)?;
    let properties = service.read_properties(root_path, false)?;
    let searched = service.read_properties(root_path, true)?;
    let extraction = match service.extract(&resource, None) {
        Ok(extraction) => extraction,
        Err(e) if e.is_per_resource() => {
            log::warn!("{e}; resolving {root_path} without content");
            ExtractionResult::new()
        }
        Err(e) => return Err(e.into()),
    };

    let ctx = ResourceContext::new(&resource, service);
    Ok(configuration.resolve_document(&ctx, &extraction, &properties, &searched))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

// ============================================================================
// schema
// ============================================================================

/// Describe the engine schema of a configuration.
pub fn cmd_schema(configuration: &FieldConfiguration) -> Result<String> {
    let engine = EngineSchema::build(configuration)?;
    let boosts = engine.full_text_fields();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Schema for '{}' ({} fields)",
        configuration.name(),
        engine.len()
    );
    for (field, entry) in engine.schema().fields() {
        let tokenizer = match entry.field_type() {
            FieldType::Str(options) => options
                .get_indexing_options()
                .map(|indexing| indexing.tokenizer().to_string()),
            _ => None,
        };
        let mut line = format!(
            "  {:<16} stored={:<5} indexed={:<5}",
            entry.name(),
            entry.is_stored(),
            entry.is_indexed()
        );
        if let Some(tokenizer) = tokenizer {
            let _ = write!(line, " tokenizer={tokenizer}");
        }
        if let Some((_, boost)) = boosts.iter().find(|(f, _)| *f == field) {
            let _ = write!(line, " boost={boost}");
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
