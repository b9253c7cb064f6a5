//! The closed set of mapping types.
//!
//! A mapping type says where a mapping takes its value from. Its canonical
//! string form is what configuration files use.

use std::fmt;
use std::str::FromStr;

use fieldmap_core::Error;
use serde::{Deserialize, Serialize};

/// How a field mapping sources its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldMappingType {
    /// Extracted plain-text content.
    Content,
    /// A property of the resource itself.
    Property,
    /// A property resolved through folder inheritance.
    PropertySearch,
    /// A single extracted content item, addressed by xpath.
    Item,
    /// A value computed by code (macros, geo coordinates, closures).
    Dynamic,
    /// A resource attribute such as the creation date.
    Attribute,
}

impl FieldMappingType {
    /// All types in their canonical order.
    pub const ALL: [FieldMappingType; 6] = [
        Self::Content,
        Self::Property,
        Self::PropertySearch,
        Self::Item,
        Self::Dynamic,
        Self::Attribute,
    ];

    /// Canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Property => "property",
            Self::PropertySearch => "property-search",
            Self::Item => "item",
            Self::Dynamic => "dynamic",
            Self::Attribute => "attribute",
        }
    }

    /// Parse a type token, ignoring case and surrounding whitespace.
    ///
    /// Blank or unknown tokens yield `None`; this never fails loudly.
    ///
    /// ```
    /// use fieldmap_fields::FieldMappingType;
    ///
    /// assert_eq!(FieldMappingType::parse(" Property-Search "), Some(FieldMappingType::PropertySearch));
    /// assert_eq!(FieldMappingType::parse(""), None);
    /// assert_eq!(FieldMappingType::parse("bogus"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
    }

    /// Like [`parse`](Self::parse), for optional input.
    pub fn parse_opt(value: Option<&str>) -> Option<Self> {
        value.and_then(Self::parse)
    }
}

impl fmt::Display for FieldMappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldMappingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownMappingType(s.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_canonical_strings() {
        let names: Vec<&str> = FieldMappingType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            names,
            ["content", "property", "property-search", "item", "dynamic", "attribute"]
        );
    }

    #[test]
    fn test_roundtrip_every_variant() {
        for t in FieldMappingType::ALL {
            assert_eq!(FieldMappingType::parse(&t.to_string()), Some(t));
        }
    }

    #[test]
    fn test_parse_absent() {
        assert_eq!(FieldMappingType::parse(""), None);
        assert_eq!(FieldMappingType::parse("   "), None);
        assert_eq!(FieldMappingType::parse("bogus"), None);
        assert_eq!(FieldMappingType::parse_opt(None), None);
    }

    #[test]
    fn test_parse_tolerant() {
        assert_eq!(FieldMappingType::parse("CONTENT"), Some(FieldMappingType::Content));
        assert_eq!(FieldMappingType::parse("\titem\n"), Some(FieldMappingType::Item));
    }

    #[test]
    fn test_ordering() {
        assert!(FieldMappingType::Content < FieldMappingType::Attribute);
        assert!(FieldMappingType::Property < FieldMappingType::PropertySearch);
    }

    #[test]
    fn test_from_str_error() {
        let err = "nope".parse::<FieldMappingType>().unwrap_err();
        assert!(matches!(err, Error::UnknownMappingType(ref s) if s == "nope"));
    }

    #[test]
    fn test_serde_uses_canonical_form() {
        let json = serde_json::to_string(&FieldMappingType::PropertySearch).unwrap();
        assert_eq!(json, "\"property-search\"");
    }

    proptest! {
        #[test]
        fn test_parse_never_panics(s in "\\PC*") {
            let _ = FieldMappingType::parse(&s);
        }

        #[test]
        fn test_parse_ignores_case_and_padding(idx in 0usize..6, upper in any::<bool>(), pad in "[ \t]{0,3}") {
            let t = FieldMappingType::ALL[idx];
            let token = if upper { t.as_str().to_uppercase() } else { t.as_str().to_string() };
            let padded = format!("{pad}{token}{pad}");
            prop_assert_eq!(FieldMappingType::parse(&padded), Some(t));
        }
    }
}
