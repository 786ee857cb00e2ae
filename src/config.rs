use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use image_tokens::consts::APP_DIR;
use image_tokens::{DetailLevel, Model, PricingMap};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

/// `[pricing]` table: where each model's price comes from
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PricingConfig {
    #[serde(default)]
    pub(crate) default_key: Option<String>,
    /// model id -> LiteLLM key
    #[serde(default)]
    pub(crate) keys: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) offline: bool,
    #[serde(default)]
    pub(crate) no_cost: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    #[serde(default)]
    pub(crate) model: Option<Model>,
    #[serde(default)]
    pub(crate) detail: Option<DetailLevel>,
    #[serde(default)]
    pub(crate) pricing_url: Option<String>,
    #[serde(default)]
    pub(crate) cache_path: Option<PathBuf>,
    #[serde(default)]
    pub(crate) pricing: PricingConfig,
}

impl Config {
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if !path.exists() {
                continue;
            }
            if let Some(config) = Self::from_path(&path) {
                return config;
            }
        }
        Self::default()
    }

    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config");
                return None;
            }
        };
        match toml::from_str::<Config>(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse config");
                None
            }
        }
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/image-tokens/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join(APP_DIR).join("config.toml"));
        }

        // 2. Platform config dir (Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join(APP_DIR).join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.image-tokens.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".image-tokens.toml"));
        }

        paths
    }

    /// Build the model -> pricing key map, skipping unknown model ids
    pub(crate) fn pricing_map(&self) -> PricingMap {
        let mut map = match &self.pricing.default_key {
            Some(key) => PricingMap::new(key.clone()),
            None => PricingMap::default(),
        };
        for (model_id, key) in &self.pricing.keys {
            match model_id.parse::<Model>() {
                Ok(model) => map = map.with_override(model, key.clone()),
                Err(e) => tracing::warn!(error = %e, "ignoring pricing override"),
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Config {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("image-tokens")));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse("");
        assert!(!config.offline);
        assert!(config.model.is_none());
        assert_eq!(config.pricing_map(), PricingMap::default());
    }

    #[test]
    fn parses_model_and_detail() {
        let config = parse(
            r#"
            model = "gpt-4o-mini"
            detail = "low"
            color = "never"
            "#,
        );
        assert_eq!(config.model, Some(Model::Gpt4oMini));
        assert_eq!(config.detail, Some(DetailLevel::Low));
        assert!(matches!(config.color, Some(ConfigColorMode::Never)));
    }

    #[test]
    fn pricing_overrides_are_applied() {
        let config = parse(
            r#"
            [pricing]
            default_key = "gpt-4o"

            [pricing.keys]
            "gpt-4.1-mini" = "gpt-4.1-mini"
            "not-a-model" = "whatever"
            "#,
        );
        let map = config.pricing_map();
        assert_eq!(map.key_for(Model::Gpt41Mini), "gpt-4.1-mini");
        assert_eq!(map.key_for(Model::O3), "gpt-4o");
    }

    #[test]
    fn from_path_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = [").unwrap();
        assert!(Config::from_path(&path).is_none());

        fs::write(&path, "offline = true").unwrap();
        assert!(Config::from_path(&path).unwrap().offline);
    }
}
