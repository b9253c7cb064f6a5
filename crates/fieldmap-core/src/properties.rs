//! Resource properties.
//!
//! A property can carry two values: one attached to the structure (shared by
//! all siblings of a resource) and one attached to the resource itself. The
//! structure value wins when both are set.

use serde::{Deserialize, Serialize};

/// A single named property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name, e.g. `Title`.
    pub name: String,
    /// Value attached to the structure.
    #[serde(default, rename = "value", skip_serializing_if = "Option::is_none")]
    pub structure_value: Option<String>,
    /// Value attached to the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_value: Option<String>,
}

impl Property {
    /// Create a property with a structure value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structure_value: Some(value.into()),
            resource_value: None,
        }
    }

    /// Create a property with only a resource value.
    pub fn resource(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structure_value: None,
            resource_value: Some(value.into()),
        }
    }

    /// The effective value: structure value first, then resource value.
    pub fn value(&self) -> Option<&str> {
        self.structure_value
            .as_deref()
            .or(self.resource_value.as_deref())
    }
}

/// An ordered list of properties, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Vec<Property>);

impl Properties {
    /// Create an empty property list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property by exact name.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.0.iter().find(|p| p.name == name)
    }

    /// Look up the effective value of a property.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Property::value)
    }

    /// Insert a property, replacing any existing one with the same name.
    pub fn insert(&mut self, property: Property) {
        match self.0.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.0.push(property),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(Property::new(name, value));
        self
    }

    /// Fill in every property missing here from `parent`.
    ///
    /// This is one step of search inheritance: walking from a resource up
    /// through its folders, values closer to the resource win. A property
    /// that is present but has no value counts as missing.
    pub fn inherit_from(&mut self, parent: &Properties) {
        for property in &parent.0 {
            if property.value().is_none() {
                continue;
            }
            match self.0.iter_mut().find(|p| p.name == property.name) {
                Some(existing) if existing.value().is_none() => *existing = property.clone(),
                Some(_) => {}
                None => self.0.push(property.clone()),
            }
        }
    }

    /// Iterate over the properties in order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (name, value) in iter {
            properties.insert(Property::new(name, value));
        }
        properties
    }
}
