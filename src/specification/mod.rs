//! Specification carrier passed through transformers

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Attribute map shared by specifications and their elements
pub type Attributes = BTreeMap<String, serde_yaml::Value>;

/// Design model under exploration.
///
/// The exploration engine owns the structure; transformers receive it by
/// mutable reference and rewrite it in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    /// Specification name
    pub name: String,

    /// Specification-level attributes
    #[serde(default)]
    pub attributes: Attributes,

    /// Model elements (resources, tasks, links, ...)
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A single element of a specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element identifier
    pub id: String,

    /// Element attributes
    #[serde(default)]
    pub attributes: Attributes,
}

impl Specification {
    /// Create an empty specification
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an element, builder style
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Find an element by id
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Load a specification from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read specification {:?}", path))?;
        let specification = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse specification {:?}", path))?;
        Ok(specification)
    }

    /// Serialize the specification to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_yaml::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}
