//! Fields derived from resource metadata rather than from mappings.

use std::fmt;
use std::str::FromStr;

use fieldmap_core::util::paths;
use fieldmap_core::{Error, ExtractionResult, Locale, Resource, ResourceAttribute};
use serde::{Deserialize, Serialize};

use crate::document::{FieldSpec, IndexDocument, IndexOptions};
use crate::names::*;

/// A structural field a configuration can append to every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StructuralField {
    /// Root path, exact match.
    Path,
    /// Every ancestor folder, one value each.
    ParentFolders,
    /// Resource type name.
    Type,
    DateCreated,
    DateLastModified,
    DateContent,
    /// Locales of the resource, space separated.
    ResourceLocales,
    /// Locales content was extracted for, space separated.
    ContentLocales,
    /// Content length in bytes.
    Size,
}

impl StructuralField {
    pub const ALL: [StructuralField; 9] = [
        Self::Path,
        Self::ParentFolders,
        Self::Type,
        Self::DateCreated,
        Self::DateLastModified,
        Self::DateContent,
        Self::ResourceLocales,
        Self::ContentLocales,
        Self::Size,
    ];

    /// The index field name.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Path => FIELD_PATH,
            Self::ParentFolders => FIELD_PARENT_FOLDERS,
            Self::Type => FIELD_TYPE,
            Self::DateCreated => FIELD_DATE_CREATED,
            Self::DateLastModified => FIELD_DATE_LASTMODIFIED,
            Self::DateContent => FIELD_DATE_CONTENT,
            Self::ResourceLocales => FIELD_RESOURCE_LOCALES,
            Self::ContentLocales => FIELD_CONTENT_LOCALES,
            Self::Size => FIELD_SIZE,
        }
    }

    /// Storage shape of the field.
    ///
    /// Locale lists are tokenized so each locale is searchable; everything
    /// else is a single exact-match term.
    pub fn spec(&self) -> FieldSpec {
        let (stored, index) = match self {
            Self::ParentFolders => (false, IndexOptions::Untokenized),
            Self::ResourceLocales | Self::ContentLocales => (true, IndexOptions::Tokenized),
            _ => (true, IndexOptions::Untokenized),
        };
        FieldSpec::new(self.field_name(), stored, index)
    }

    /// Append this field's values for a resource.
    pub fn append(
        &self,
        document: &mut IndexDocument,
        resource: &Resource,
        extraction: &ExtractionResult,
    ) {
        let spec = self.spec();
        let attribute = |a| resource.attribute(a);
        let values: Vec<String> = match self {
            Self::Path => vec![resource.root_path.clone()],
            Self::ParentFolders => paths::parent_folders(&resource.root_path),
            Self::Type => vec![resource.type_name.clone()],
            Self::DateCreated => attribute(ResourceAttribute::DateCreated).into_iter().collect(),
            Self::DateLastModified => attribute(ResourceAttribute::DateLastModified)
                .into_iter()
                .collect(),
            Self::DateContent => attribute(ResourceAttribute::DateContent).into_iter().collect(),
            Self::ResourceLocales => vec![join_locales(&resource.locales)],
            Self::ContentLocales => vec![join_locales(extraction.locales())],
            Self::Size => vec![resource.length.to_string()],
        };
        for value in values.into_iter().filter(|v| !v.is_empty()) {
            document.push(spec.index_field(value));
        }
    }
}

fn join_locales(locales: &[Locale]) -> String {
    locales
        .iter()
        .map(Locale::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for StructuralField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for StructuralField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.field_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::parse(format!("unknown structural field: {s}")))
    }
}

impl TryFrom<String> for StructuralField {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StructuralField> for String {
    fn from(field: StructuralField) -> Self {
        field.field_name().to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
