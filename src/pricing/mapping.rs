use std::collections::HashMap;

use crate::catalog::Model;
use crate::consts::DEFAULT_PRICING_KEY;

/// Which upstream pricing entry each catalog model is billed at.
///
/// Out of the box every model points at the same entry; individual models
/// can be redirected from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingMap {
    default_key: String,
    overrides: HashMap<Model, String>,
}

impl Default for PricingMap {
    fn default() -> Self {
        Self::new(DEFAULT_PRICING_KEY)
    }
}

impl PricingMap {
    pub fn new(default_key: impl Into<String>) -> Self {
        Self {
            default_key: default_key.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, model: Model, key: impl Into<String>) -> Self {
        self.overrides.insert(model, key.into());
        self
    }

    pub fn key_for(&self, model: Model) -> &str {
        self.overrides
            .get(&model)
            .map_or(self.default_key.as_str(), String::as_str)
    }

    pub fn is_overridden(&self, model: Model) -> bool {
        self.overrides.contains_key(&model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sends_every_model_to_one_key() {
        let map = PricingMap::default();
        for model in Model::ALL {
            assert_eq!(map.key_for(model), "gpt-4-vision-preview");
            assert!(!map.is_overridden(model));
        }
    }

    #[test]
    fn overrides_apply_per_model() {
        let map = PricingMap::default()
            .with_override(Model::Gpt4o, "gpt-4o")
            .with_override(Model::Gpt41Mini, "gpt-4.1-mini");
        assert_eq!(map.key_for(Model::Gpt4o), "gpt-4o");
        assert_eq!(map.key_for(Model::Gpt41Mini), "gpt-4.1-mini");
        assert_eq!(map.key_for(Model::O3), "gpt-4-vision-preview");
        assert!(map.is_overridden(Model::Gpt4o));
    }

    #[test]
    fn custom_default_key() {
        let map = PricingMap::new("openai/gpt-4o");
        assert_eq!(map.key_for(Model::Cua), "openai/gpt-4o");
    }
}
