//! Host parameter bindings consumed by transformer constructors

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::BindingError;

/// Named parameter values bound during assembly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    values: BTreeMap<String, serde_yaml::Value>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a parameter value, replacing any previous binding
    pub fn bind(&mut self, key: impl Into<String>, value: serde_yaml::Value) {
        let key = key.into();
        if let Some(previous) = self.values.insert(key.clone(), value) {
            warn!("Parameter '{}' rebound (previous value: {:?})", key, previous);
        }
    }

    /// Look up a parameter and deserialize it
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BindingError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .map_err(|source| BindingError::InvalidParameter {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    /// Look up a parameter that must be present
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T, BindingError> {
        self.get(key)?.ok_or_else(|| BindingError::MissingParameter {
            key: key.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, serde_yaml::Value)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, serde_yaml::Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
