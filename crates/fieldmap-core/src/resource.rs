//! Resource identity and metadata as seen by the field engine.
//!
//! The engine never reads or writes resources itself. The indexing pipeline
//! hands it a [`Resource`] snapshot, and any re-reads go through a
//! [`ContentService`](crate::ContentService).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::locale::Locale;
use crate::util::paths;

/// Publishing state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceState {
    /// Published and not modified since.
    #[default]
    Unchanged,
    /// Modified since the last publish.
    Changed,
    /// Never published.
    New,
    /// Marked as deleted.
    Deleted,
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unchanged => "unchanged",
            Self::Changed => "changed",
            Self::New => "new",
            Self::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// Snapshot of a resource handed in by the indexing pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// Full path including the site root, e.g. `/sites/default/news/a.html`.
    /// Folders end with `/`.
    pub root_path: String,
    pub structure_id: Uuid,
    pub resource_id: Uuid,
    /// Resource type name, e.g. `plain`, `binary`, `article`.
    #[serde(rename = "type")]
    pub type_name: String,
    pub state: ResourceState,
    pub date_created: DateTime<Utc>,
    pub date_last_modified: DateTime<Utc>,
    /// Date of the last content change, as opposed to metadata changes.
    pub date_content: DateTime<Utc>,
    pub date_released: Option<DateTime<Utc>>,
    pub date_expired: Option<DateTime<Utc>>,
    pub user_created: String,
    pub user_last_modified: String,
    /// Content length in bytes.
    pub length: u64,
    pub version: u32,
    /// Locales the resource is available in (from its `locale` setting).
    pub locales: Vec<Locale>,
    /// Category paths assigned to the resource, e.g. `topics/sports/`.
    pub categories: Vec<String>,
}

impl Resource {
    /// Create a resource snapshot with the given root path and type.
    ///
    /// All other metadata starts out at its default (epoch dates, nil ids).
    pub fn new(root_path: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Set the locales.
    pub fn with_locales<I, L>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Locale>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Set the category paths.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the content length.
    pub fn with_length(mut self, length: u64) -> Self {
        self.length = length;
        self
    }

    /// Set created, last-modified and content dates at once.
    pub fn with_dates(mut self, created: DateTime<Utc>, last_modified: DateTime<Utc>) -> Self {
        self.date_created = created;
        self.date_last_modified = last_modified;
        self.date_content = last_modified;
        self
    }

    /// The resource name (last path segment, without trailing slash).
    pub fn name(&self) -> &str {
        paths::resource_name(&self.root_path)
    }

    /// Returns `true` if this resource is a folder.
    pub fn is_folder(&self) -> bool {
        self.root_path.ends_with('/')
    }

    /// Read a single attribute as a string.
    ///
    /// Dates are rendered as RFC 3339 in UTC with second precision. Optional
    /// dates that are unset yield `None`.
    pub fn attribute(&self, attribute: ResourceAttribute) -> Option<String> {
        let date = |d: &DateTime<Utc>| d.to_rfc3339_opts(SecondsFormat::Secs, true);
        match attribute {
            ResourceAttribute::DateContent => Some(date(&self.date_content)),
            ResourceAttribute::DateCreated => Some(date(&self.date_created)),
            ResourceAttribute::DateExpired => self.date_expired.as_ref().map(date),
            ResourceAttribute::DateLastModified => Some(date(&self.date_last_modified)),
            ResourceAttribute::DateReleased => self.date_released.as_ref().map(date),
            ResourceAttribute::Length => Some(self.length.to_string()),
            ResourceAttribute::Name => Some(self.name().to_string()),
            ResourceAttribute::ResourceId => Some(self.resource_id.to_string()),
            ResourceAttribute::RootPath => Some(self.root_path.clone()),
            ResourceAttribute::State => Some(self.state.to_string()),
            ResourceAttribute::StructureId => Some(self.structure_id.to_string()),
            ResourceAttribute::Type => Some(self.type_name.clone()),
            ResourceAttribute::UserCreated => Some(self.user_created.clone()),
            ResourceAttribute::UserLastModified => Some(self.user_last_modified.clone()),
            ResourceAttribute::Version => Some(self.version.to_string()),
        }
    }
}

/// Resource attributes addressable by `attribute` mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceAttribute {
    DateContent,
    DateCreated,
    DateExpired,
    DateLastModified,
    DateReleased,
    Length,
    Name,
    ResourceId,
    RootPath,
    State,
    StructureId,
    Type,
    UserCreated,
    UserLastModified,
    Version,
}

impl ResourceAttribute {
    /// All attributes, in declaration order.
    pub const ALL: [ResourceAttribute; 15] = [
        Self::DateContent,
        Self::DateCreated,
        Self::DateExpired,
        Self::DateLastModified,
        Self::DateReleased,
        Self::Length,
        Self::Name,
        Self::ResourceId,
        Self::RootPath,
        Self::State,
        Self::StructureId,
        Self::Type,
        Self::UserCreated,
        Self::UserLastModified,
        Self::Version,
    ];

    /// Canonical attribute name as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateContent => "dateContent",
            Self::DateCreated => "dateCreated",
            Self::DateExpired => "dateExpired",
            Self::DateLastModified => "dateLastModified",
            Self::DateReleased => "dateReleased",
            Self::Length => "length",
            Self::Name => "name",
            Self::ResourceId => "resourceId",
            Self::RootPath => "rootPath",
            Self::State => "state",
            Self::StructureId => "structureId",
            Self::Type => "type",
            Self::UserCreated => "userCreated",
            Self::UserLastModified => "userLastModified",
            Self::Version => "version",
        }
    }
}

impl fmt::Display for ResourceAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceAttribute {
    type Err = Error;

    /// Case-insensitive; `-` and `_` are ignored so `date-created` works too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|attr| attr.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::parse(format!("unknown resource attribute '{s}'")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Resource {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let modified = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();
        Resource::new("/sites/default/news/article.xml", "article")
            .with_dates(created, modified)
            .with_length(2048)
            .with_locales(["en", "de"])
    }

    #[test]
    fn test_name_and_folder() {
        let res = sample();
        assert_eq!(res.name(), "article.xml");
        assert!(!res.is_folder());

        let folder = Resource::new("/sites/default/news/", "folder");
        assert_eq!(folder.name(), "news");
        assert!(folder.is_folder());
    }

    #[test]
    fn test_attribute_dates() {
        let res = sample();
        assert_eq!(
            res.attribute(ResourceAttribute::DateCreated).as_deref(),
            Some("2024-03-01T08:30:00Z")
        );
        assert_eq!(
            res.attribute(ResourceAttribute::DateContent).as_deref(),
            Some("2024-03-02T09:00:00Z")
        );
        assert_eq!(res.attribute(ResourceAttribute::DateExpired), None);
    }

    #[test]
    fn test_attribute_scalars() {
        let res = sample();
        assert_eq!(res.attribute(ResourceAttribute::Length).as_deref(), Some("2048"));
        assert_eq!(res.attribute(ResourceAttribute::Type).as_deref(), Some("article"));
        assert_eq!(res.attribute(ResourceAttribute::State).as_deref(), Some("unchanged"));
    }

    #[test]
    fn test_attribute_parse() {
        assert_eq!(
            "dateLastModified".parse::<ResourceAttribute>().unwrap(),
            ResourceAttribute::DateLastModified
        );
        assert_eq!(
            " ROOT_PATH ".parse::<ResourceAttribute>().unwrap(),
            ResourceAttribute::RootPath
        );
        assert!("bogus".parse::<ResourceAttribute>().is_err());
    }

    #[test]
    fn test_attribute_display_parse_agree() {
        for attr in ResourceAttribute::ALL {
            assert_eq!(attr.to_string().parse::<ResourceAttribute>().unwrap(), attr);
        }
    }

    #[test]
    fn test_resource_deserialize_defaults() {
        let json = r#"{"root_path": "/a.txt", "type": "plain"}"#;
        let res: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(res.type_name, "plain");
        assert_eq!(res.length, 0);
        assert!(res.locales.is_empty());
    }
}
