//! Locales and locale fallback.
//!
//! Lookups that depend on a locale never walk nested loops over mutable
//! locale sets. Instead the caller builds an ordered list of candidates with
//! [`locale_candidates`] and hands it to [`first_match`] together with a
//! lookup closure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A content locale such as `en`, `de` or `en_US`.
///
/// Locales are normalized on construction: surrounding whitespace is
/// trimmed and `-` separators become `_`, so `"en-US"` and `"en_US"` compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Creates a normalized locale.
    ///
    /// ```
    /// use fieldmap_core::Locale;
    ///
    /// assert_eq!(Locale::new(" en-US ").as_str(), "en_US");
    /// ```
    pub fn new(locale: impl AsRef<str>) -> Self {
        Self(locale.as_ref().trim().replace('-', "_"))
    }

    /// Returns the locale as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the language-only locale (`en` for `en_US`), if it differs.
    pub fn language(&self) -> Option<Locale> {
        self.0
            .split_once('_')
            .map(|(lang, _)| Locale(lang.to_string()))
    }

    /// Returns `true` if this locale has no text.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Locale {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Locale {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

/// Build the ordered, de-duplicated list of locales to try for a lookup.
///
/// Order: the requested locale, then its language-only form, then the
/// default locale, then every available locale in order. Empty locales are
/// skipped.
///
/// ```
/// use fieldmap_core::{locale_candidates, Locale};
///
/// let available = vec![Locale::new("de"), Locale::new("en")];
/// let candidates = locale_candidates(Some(&Locale::new("en_GB")), Some(&Locale::new("de")), &available);
/// let names: Vec<&str> = candidates.iter().map(Locale::as_str).collect();
/// assert_eq!(names, ["en_GB", "en", "de"]);
/// ```
pub fn locale_candidates(
    requested: Option<&Locale>,
    default: Option<&Locale>,
    available: &[Locale],
) -> Vec<Locale> {
    let mut candidates: Vec<Locale> = Vec::with_capacity(available.len() + 3);
    let mut push = |locale: Locale| {
        if !locale.is_empty() && !candidates.contains(&locale) {
            candidates.push(locale);
        }
    };

    if let Some(requested) = requested {
        push(requested.clone());
        if let Some(language) = requested.language() {
            push(language);
        }
    }
    if let Some(default) = default {
        push(default.clone());
    }
    for locale in available {
        push(locale.clone());
    }

    candidates
}

/// Return the first value produced by `lookup` over the candidates.
pub fn first_match<T, F>(candidates: &[Locale], mut lookup: F) -> Option<T>
where
    F: FnMut(&Locale) -> Option<T>,
{
    candidates.iter().find_map(|locale| lookup(locale))
}
