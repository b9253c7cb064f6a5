//! Resolved index fields and documents.
//!
//! This module defines the outbound side of the engine: [`IndexField`], one
//! typed field representation ready for an index writer, and
//! [`IndexDocument`], the ordered list of fields assembled for a resource.
//!
//! # Creating Fields
//!
//! Fields are normally produced by
//! [`SearchField::build_index_field`](crate::SearchField::build_index_field),
//! but fixed-shape fields (categories, structural fields) are created from a
//! [`FieldSpec`]:
//!
//! ```rust
//! use fieldmap_fields::{FieldSpec, IndexOptions};
//!
//! let spec = FieldSpec::new("path", true, IndexOptions::Untokenized);
//! let field = spec.index_field("/sites/default/index.html");
//! assert_eq!(field.stored_text(), Some("/sites/default/index.html"));
//! assert!(!field.is_tokenized());
//! ```

use serde::{Deserialize, Serialize};

/// How the engine indexes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexOptions {
    /// Not searchable; stored only (or dropped if not stored either).
    NotIndexed,
    /// Indexed as a single exact-match term.
    Untokenized,
    /// Analyzed into terms with positions.
    Tokenized,
}

impl IndexOptions {
    /// Translate the indexed/tokenized flag pair.
    ///
    /// Tokenized implies indexed, so `(false, true)` is treated as not
    /// indexed.
    pub fn from_flags(indexed: bool, tokenized: bool) -> Self {
        match (indexed, tokenized) {
            (false, _) => Self::NotIndexed,
            (true, false) => Self::Untokenized,
            (true, true) => Self::Tokenized,
        }
    }

    pub fn is_indexed(&self) -> bool {
        !matches!(self, Self::NotIndexed)
    }

    pub fn is_tokenized(&self) -> bool {
        matches!(self, Self::Tokenized)
    }
}

/// Fixed storage shape of a field that has no mappings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub stored: bool,
    pub index: IndexOptions,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, stored: bool, index: IndexOptions) -> Self {
        Self {
            name: name.into(),
            stored,
            index,
        }
    }

    /// Create a field of this shape holding `text`.
    pub fn index_field(&self, text: impl Into<String>) -> IndexField {
        IndexField {
            name: self.name.clone(),
            text: text.into(),
            stored: self.stored,
            compressed: false,
            index: self.index,
            boost: None,
        }
    }
}

/// A typed field representation consumed by an index writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexField {
    /// Field name.
    pub name: String,
    /// Resolved text.
    pub text: String,
    /// Whether the text is stored (always true when compressed).
    pub stored: bool,
    /// Whether stored text should be compressed.
    pub compressed: bool,
    /// Indexing mode.
    pub index: IndexOptions,
    /// Boost, present only when it differs from the default of 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

impl IndexField {
    /// The stored text, or `None` if the field is not stored.
    pub fn stored_text(&self) -> Option<&str> {
        self.stored.then_some(self.text.as_str())
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_indexed()
    }

    pub fn is_tokenized(&self) -> bool {
        self.index.is_tokenized()
    }
}

/// The ordered field list assembled for one resource.
///
/// A name may occur more than once (multi-valued fields such as
/// `parent-folders`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Root path of the resource the document was built for.
    pub root_path: String,
    pub fields: Vec<IndexField>,
}

impl IndexDocument {
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn push(&mut self, field: IndexField) {
        self.fields.push(field);
    }

    /// First field with the given name.
    pub fn get(&self, name: &str) -> Option<&IndexField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Text of the first field with the given name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).map(|f| f.text.as_str())
    }

    /// Texts of every field with the given name, in order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.name == name)
            .map(|f| f.text.as_str())
    }

    /// Field names in document order, with repeats.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<IndexField> {
        self.fields
    }
}

// ============================================================================
// Tests
// ============================================================================
