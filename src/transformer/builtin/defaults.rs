//! Attribute defaults transformer

use anyhow::Result;

use crate::config::Parameters;
use crate::specification::{Attributes, Specification};
use crate::transformer::{FromParameters, SpecificationTransformer};

/// Fills in element attributes that a specification leaves unset
#[derive(Debug, Clone, Default)]
pub struct AttributeDefaults {
    defaults: Attributes,
}

impl AttributeDefaults {
    pub const NAME: &'static str = "attribute-defaults";

    /// Parameter holding the default attribute map
    pub const PARAMETER: &'static str = "attribute_defaults";

    pub fn new(defaults: Attributes) -> Self {
        Self { defaults }
    }
}

impl SpecificationTransformer for AttributeDefaults {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transform(&self, specification: &mut Specification) -> Result<()> {
        for element in &mut specification.elements {
            for (key, value) in &self.defaults {
                element
                    .attributes
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }
        }
        Ok(())
    }
}

impl FromParameters for AttributeDefaults {
    fn from_parameters(parameters: &Parameters) -> Result<Self> {
        let defaults = parameters.get(Self::PARAMETER)?.unwrap_or_default();
        Ok(Self::new(defaults))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::Element;
    use serde_yaml::Value;

    #[test]
    fn test_fills_missing_attributes_only() {
        let mut defaults = Attributes::new();
        defaults.insert("cost".to_string(), Value::from(1));
        defaults.insert("power".to_string(), Value::from(0));
        let transformer = AttributeDefaults::new(defaults);

        let mut spec = Specification::new("test")
            .with_element(Element::new("cpu").with_attribute("cost", Value::from(7)))
            .with_element(Element::new("bus"));

        transformer.transform(&mut spec).unwrap();

        let cpu = spec.element("cpu").unwrap();
        assert_eq!(cpu.attributes.get("cost"), Some(&Value::from(7)));
        assert_eq!(cpu.attributes.get("power"), Some(&Value::from(0)));
        let bus = spec.element("bus").unwrap();
        assert_eq!(bus.attributes.get("cost"), Some(&Value::from(1)));
    }

    #[test]
    fn test_missing_parameter_yields_no_defaults() {
        let transformer = AttributeDefaults::from_parameters(&Parameters::new()).unwrap();
        assert!(transformer.defaults.is_empty());
    }

    #[test]
    fn test_invalid_parameter_fails_construction() {
        let mut parameters = Parameters::new();
        parameters.bind(AttributeDefaults::PARAMETER, Value::from("not a map"));
        assert!(AttributeDefaults::from_parameters(&parameters).is_err());
    }
}
