//! Modules built from a configuration file

use anyhow::Result;
use std::collections::BTreeMap;

use crate::module::{Binder, ExplorationModule, TransformerBinder, TransformerModule};

/// Binds configured parameter values
#[derive(Debug, Clone, Default)]
pub struct ParameterModule {
    parameters: BTreeMap<String, serde_yaml::Value>,
}

impl ParameterModule {
    pub fn new(parameters: BTreeMap<String, serde_yaml::Value>) -> Self {
        Self { parameters }
    }
}

impl ExplorationModule for ParameterModule {
    fn name(&self) -> &str {
        "parameters"
    }

    fn configure(&self, binder: &mut Binder<'_>) -> Result<()> {
        for (key, value) in &self.parameters {
            binder.bind_parameter(key.clone(), value.clone());
        }
        Ok(())
    }
}

/// Binds transformers listed by catalog name
#[derive(Debug, Clone, Default)]
pub struct ConfiguredTransformers {
    names: Vec<String>,
}

impl ConfiguredTransformers {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl TransformerModule for ConfiguredTransformers {
    fn name(&self) -> &str {
        "configured-transformers"
    }

    fn bind_transformers(&self, binder: &mut TransformerBinder<'_, '_>) -> Result<()> {
        for name in &self.names {
            binder.bind_transformer_named(name)?;
        }
        Ok(())
    }
}
