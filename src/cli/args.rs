//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use image_tokens::{DetailLevel, Model};

use crate::config::{Config, ConfigColorMode};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "image-tokens")]
#[command(
    about = "Estimate image input tokens and cost for OpenAI vision models",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Model to estimate for (default: gpt-4.1)
    #[arg(short, long, global = true)]
    pub(crate) model: Option<Model>,

    /// Detail level for images without an explicit one: low or high (default: high)
    #[arg(short, long, global = true)]
    pub(crate) detail: Option<DetailLevel>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Use offline cached pricing (skip fetching from LiteLLM)
    #[arg(short = 'O', long, global = true)]
    pub(crate) offline: bool,

    /// Hide costs
    #[arg(long, global = true)]
    pub(crate) no_cost: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Locale for number formatting (e.g., "en", "de", "fr")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Price table URL (LiteLLM JSON format)
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) pricing_url: Option<String>,

    /// Pricing cache file
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) cache_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.offline && config.offline {
            self.offline = true;
        }
        if !self.no_cost && config.no_cost {
            self.no_cost = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // Optional values: only apply if CLI didn't set them
        if self.model.is_none() {
            self.model = config.model;
        }
        if self.detail.is_none() {
            self.detail = config.detail;
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }
        if self.pricing_url.is_none() {
            self.pricing_url = config.pricing_url.clone();
        }
        if self.cache_path.is_none() {
            self.cache_path = config.cache_path.clone();
        }

        self
    }

    pub(crate) fn model(&self) -> Model {
        self.model.unwrap_or_default()
    }

    pub(crate) fn detail(&self) -> DetailLevel {
        self.detail.unwrap_or_default()
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn show_cost(&self) -> bool {
        !self.no_cost
    }
}
