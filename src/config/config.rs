//! Main configuration structure and implementation

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{ConfiguredTransformers, ParameterModule};
use crate::module::ExplorationModule;

/// Supported configuration version
pub const CONFIG_VERSION: &str = "1.0";

/// Transformer configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Configuration version
    pub version: String,

    /// Parameters made available to transformer constructors
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_yaml::Value>,

    /// Catalog names of the transformers to enable
    #[serde(default)]
    pub transformers: Vec<String>,
}

impl TransformConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {:?}", path))?;
        let config: TransformConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        if let Some(blank) = self.transformers.iter().find(|t| t.trim().is_empty()) {
            return Err(anyhow!("Transformer names must not be blank: {:?}", blank));
        }

        Ok(())
    }

    /// Modules that bind this configuration into an assembly
    pub fn into_modules(self) -> Vec<Box<dyn ExplorationModule>> {
        vec![
            Box::new(ParameterModule::new(self.parameters)),
            Box::new(ConfiguredTransformers::new(self.transformers)),
        ]
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            parameters: BTreeMap::new(),
            transformers: Vec::new(),
        }
    }
}
