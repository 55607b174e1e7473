//! Name-based lookup of transformer descriptors for configuration-driven binding

use std::collections::BTreeMap;

use super::{
    AttributeDefaults, FromParameters, Namespace, SpecificationTransformer, TransformerDescriptor,
};
use crate::BindingError;

/// Catalog of transformers that configuration files may refer to by name
#[derive(Debug, Clone, Default)]
pub struct TransformerCatalog {
    entries: BTreeMap<String, TransformerDescriptor>,
}

impl TransformerCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the built-in transformers
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.register::<AttributeDefaults>(AttributeDefaults::NAME);
        catalog.register::<Namespace>(Namespace::NAME);
        catalog
    }

    /// Make `T` available under `name`
    pub fn register<T>(&mut self, name: impl Into<String>)
    where
        T: SpecificationTransformer + FromParameters,
    {
        self.entries
            .insert(name.into(), TransformerDescriptor::of::<T>());
    }

    /// Resolve a name to its descriptor
    pub fn lookup(&self, name: &str) -> Result<TransformerDescriptor, BindingError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| BindingError::InvalidTransformerType {
                name: name.to_string(),
            })
    }

    /// Catalog name registered for a descriptor, if any
    pub fn name_of(&self, descriptor: &TransformerDescriptor) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, d)| *d == descriptor)
            .map(|(name, _)| name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransformerDescriptor)> {
        self.entries.iter().map(|(name, d)| (name.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
