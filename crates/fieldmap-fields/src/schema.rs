//! Tantivy realization of a field configuration.
//!
//! [`EngineSchema::build`] derives a Tantivy schema from a
//! [`FieldConfiguration`]: one text field per search field, plus the
//! category and structural fields the configuration appends.
//!
//! # Field Options
//!
//! | Flags | Tantivy options |
//! |-------|-----------------|
//! | tokenized | `en_stem` tokenizer, frequencies and positions |
//! | untokenized | `raw` tokenizer (exact match) |
//! | not indexed | stored only |
//!
//! Stored and compressed fields are both stored; Tantivy compresses its
//! document store as a whole. Boosts do not exist at index time in Tantivy,
//! so they are exposed through [`EngineSchema::full_text_fields`] for query
//! weighting instead.
//!
//! # Tokenizer
//!
//! Uses English stemming tokenizer (`en_stem`) for tokenized fields:
//! - SimpleTokenizer → LowerCaser → Stemmer(English)
//!
//! Call [`EngineSchema::register_tokenizers`] after creating or opening an
//! index.

use std::collections::HashMap;
use std::fmt;

use fieldmap_core::{Error, Result};
use tantivy::schema::{
    Field, IndexRecordOption, Schema, SchemaBuilder, TextFieldIndexing, TextOptions,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, Stemmer, TextAnalyzer};
use tantivy::{Index, TantivyDocument};

use crate::configuration::FieldConfiguration;
use crate::document::{IndexDocument, IndexOptions};

/// Name of the stemming tokenizer used for tokenized fields.
pub const STEMMING_TOKENIZER: &str = "en_stem";

/// Tantivy schema plus typed access to its fields by name.
#[derive(Clone)]
pub struct EngineSchema {
    schema: Schema,
    fields: HashMap<String, Field>,
    full_text: Vec<(Field, f32)>,
}

impl EngineSchema {
    /// Build the schema for a configuration.
    ///
    /// Fails if a field name is not acceptable to Tantivy.
    pub fn build(configuration: &FieldConfiguration) -> Result<Self> {
        let mut builder = SchemaBuilder::new();
        let mut fields = HashMap::new();
        let mut full_text = Vec::new();

        for search_field in configuration.fields() {
            let field = add_field(
                &mut builder,
                search_field.name(),
                search_field.is_stored() || search_field.is_compressed(),
                search_field.index_options(),
            )?;
            fields.insert(search_field.name().to_string(), field);
            if search_field.is_tokenized() && search_field.boost() > 0.0 {
                full_text.push((field, search_field.boost()));
            }
        }

        for spec in configuration.appended_field_specs() {
            let field = add_field(&mut builder, &spec.name, spec.stored, spec.index)?;
            fields.insert(spec.name, field);
        }

        log::debug!(
            "Built engine schema for '{}' with {} fields",
            configuration.name(),
            fields.len()
        );

        Ok(Self {
            schema: builder.build(),
            fields,
            full_text,
        })
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<Field> {
        self.fields.get(name).copied()
    }

    /// Number of fields in the schema.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Register custom tokenizers with a Tantivy index.
    ///
    /// Must be called after creating/opening an index to enable stemming.
    pub fn register_tokenizers(index: &Index) {
        let en_stem = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(Stemmer::new(tantivy::tokenizer::Language::English))
            .build();

        index.tokenizers().register(STEMMING_TOKENIZER, en_stem);
    }

    /// Create an in-memory index with tokenizers registered.
    pub fn create_index_in_ram(&self) -> Index {
        let index = Index::create_in_ram(self.schema.clone());
        Self::register_tokenizers(&index);
        index
    }

    /// Tokenized fields with a positive boost, in configuration order.
    ///
    /// Suitable for weighting a multi-field query.
    pub fn full_text_fields(&self) -> Vec<(Field, f32)> {
        self.full_text.clone()
    }

    /// Convert a resolved document.
    ///
    /// Every field of the document must exist in the schema.
    pub fn to_document(&self, document: &IndexDocument) -> Result<TantivyDocument> {
        let mut tantivy_doc = TantivyDocument::new();
        for index_field in &document.fields {
            let field = self.field(&index_field.name).ok_or_else(|| {
                Error::not_found(&index_field.name, "schema field")
            })?;
            tantivy_doc.add_text(field, &index_field.text);
        }
        Ok(tantivy_doc)
    }
}

fn add_field(
    builder: &mut SchemaBuilder,
    name: &str,
    stored: bool,
    index: IndexOptions,
) -> Result<Field> {
    if name.is_empty() || name.starts_with('-') {
        return Err(Error::config(format!("Invalid engine field name: '{name}'")));
    }

    let mut options = match index {
        IndexOptions::Tokenized => TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(STEMMING_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        ),
        IndexOptions::Untokenized => TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer("raw")
                .set_index_option(IndexRecordOption::Basic),
        ),
        IndexOptions::NotIndexed => TextOptions::default(),
    };
    if stored {
        options = options.set_stored();
    }
    Ok(builder.add_text_field(name, options))
}

impl fmt::Debug for EngineSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineSchema")
            .field("field_count", &self.fields.len())
            .field("full_text_fields", &self.full_text.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
