//! Namespace transformer

use anyhow::{anyhow, Result};

use crate::config::Parameters;
use crate::specification::Specification;
use crate::transformer::{FromParameters, SpecificationTransformer};

/// Prefixes every element id with a namespace
#[derive(Debug, Clone)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    pub const NAME: &'static str = "namespace";

    /// Parameter holding the namespace
    pub const PARAMETER: &'static str = "namespace";

    const SEPARATOR: char = '/';

    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        if namespace.is_empty() || namespace.contains(Self::SEPARATOR) {
            return Err(anyhow!("Invalid namespace: {:?}", namespace));
        }
        Ok(Self {
            prefix: format!("{}{}", namespace, Self::SEPARATOR),
        })
    }
}

impl SpecificationTransformer for Namespace {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transform(&self, specification: &mut Specification) -> Result<()> {
        for element in &mut specification.elements {
            // already namespaced ids are left alone so reapplying is harmless
            if !element.id.starts_with(&self.prefix) {
                element.id = format!("{}{}", self.prefix, element.id);
            }
        }
        Ok(())
    }
}

impl FromParameters for Namespace {
    fn from_parameters(parameters: &Parameters) -> Result<Self> {
        let namespace: String = parameters.require(Self::PARAMETER)?;
        Self::new(namespace)
    }
}
