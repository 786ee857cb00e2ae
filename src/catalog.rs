//! Vision model catalog
//!
//! The closed set of models the estimator knows about and how each one
//! accounts for image input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How a model turns pixels into tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelFamily {
    /// Counts 32px patches and applies a per-patch multiplier
    Patch { multiplier: f64 },
    /// Flat base cost plus a fixed cost per 512px tile at high detail
    Tile { base_tokens: u32, tile_tokens: u32 },
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Model {
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
    #[serde(rename = "gpt-4.1-nano")]
    Gpt41Nano,
    #[serde(rename = "o4-mini")]
    O4Mini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[default]
    #[serde(rename = "gpt-4.1")]
    Gpt41,
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "o1")]
    O1,
    #[serde(rename = "o1-pro")]
    O1Pro,
    #[serde(rename = "o3")]
    O3,
    #[serde(rename = "cua")]
    Cua,
}

impl Model {
    /// Every catalog entry, in display order
    pub const ALL: [Model; 10] = [
        Model::Gpt41Mini,
        Model::Gpt41Nano,
        Model::O4Mini,
        Model::Gpt4o,
        Model::Gpt41,
        Model::Gpt4oMini,
        Model::O1,
        Model::O1Pro,
        Model::O3,
        Model::Cua,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Gpt41Nano => "gpt-4.1-nano",
            Model::O4Mini => "o4-mini",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::O1 => "o1",
            Model::O1Pro => "o1-pro",
            Model::O3 => "o3",
            Model::Cua => "cua",
        }
    }

    /// Human-readable label for tables
    pub fn display_name(self) -> &'static str {
        match self {
            Model::Gpt41Mini => "GPT-4.1 Mini",
            Model::Gpt41Nano => "GPT-4.1 Nano",
            Model::O4Mini => "O4 Mini",
            Model::Gpt4o => "GPT-4O",
            Model::Gpt41 => "GPT-4.1",
            Model::Gpt4oMini => "GPT-4O Mini",
            Model::O1 => "O1",
            Model::O1Pro => "O1 Pro",
            Model::O3 => "O3",
            Model::Cua => "CUA",
        }
    }

    pub fn family(self) -> ModelFamily {
        match self {
            Model::Gpt41Mini => ModelFamily::Patch { multiplier: 1.62 },
            Model::Gpt41Nano => ModelFamily::Patch { multiplier: 2.46 },
            Model::O4Mini => ModelFamily::Patch { multiplier: 1.72 },
            Model::Gpt4o | Model::Gpt41 => ModelFamily::Tile {
                base_tokens: 85,
                tile_tokens: 170,
            },
            Model::Gpt4oMini => ModelFamily::Tile {
                base_tokens: 2833,
                tile_tokens: 5667,
            },
            Model::O1 | Model::O1Pro | Model::O3 => ModelFamily::Tile {
                base_tokens: 75,
                tile_tokens: 150,
            },
            Model::Cua => ModelFamily::Tile {
                base_tokens: 65,
                tile_tokens: 129,
            },
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Model::ALL
            .into_iter()
            .find(|m| m.id() == wanted)
            .ok_or_else(|| AppError::UnknownModel {
                input: s.to_string(),
            })
    }
}
