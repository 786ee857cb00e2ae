//! Value types shared by the estimator and its callers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Pixel size of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub(crate) fn longest_side(self) -> u32 {
        self.width.max(self.height)
    }

    pub(crate) fn shortest_side(self) -> u32 {
        self.width.min(self.height)
    }

    /// Uniformly rescale, flooring each side to whole pixels
    pub(crate) fn scaled_by(self, scale: f64) -> Self {
        Self {
            width: (f64::from(self.width) * scale).floor() as u32,
            height: (f64::from(self.height) * scale).floor() as u32,
        }
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT` (also accepts `X` and `×` as separator).
/// Zero-sized sides are rejected here so the estimator never sees them.
impl FromStr for ImageDimensions {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidDimensions {
            input: s.to_string(),
        };
        let (w, h) = s.trim().split_once(['x', 'X', '×']).ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(AppError::ZeroDimension {
                input: s.to_string(),
            });
        }
        Ok(Self { width, height })
    }
}

/// Requested fidelity for tile-based models
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Low,
    #[default]
    High,
}

impl DetailLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DetailLevel::Low => "low",
            DetailLevel::High => "high",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(DetailLevel::Low),
            "high" => Ok(DetailLevel::High),
            _ => Err(AppError::InvalidDetail {
                input: s.to_string(),
            }),
        }
    }
}

/// Outcome of a single estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenCalculationResult {
    pub tokens: f64,
    /// Working size the tokens were measured on, present only when the
    /// algorithm had to rescale the image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaled_dimensions: Option<ImageDimensions>,
}

/// Split of an estimate into flat and per-unit tokens.
/// `base + tile == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TokenBreakdown {
    pub base: f64,
    pub tile: f64,
    pub total: f64,
}

impl TokenBreakdown {
    pub fn add(&mut self, other: &TokenBreakdown) {
        self.base += other.base;
        self.tile += other.tile;
        self.total += other.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dimensions() {
        assert_eq!(
            "1024x768".parse::<ImageDimensions>().unwrap(),
            ImageDimensions::new(1024, 768)
        );
        assert_eq!(
            " 10X20 ".parse::<ImageDimensions>().unwrap(),
            ImageDimensions::new(10, 20)
        );
        assert_eq!(
            "640×480".parse::<ImageDimensions>().unwrap(),
            ImageDimensions::new(640, 480)
        );
    }

    #[test]
    fn parse_dimensions_rejects_garbage() {
        for bad in ["", "1024", "x768", "10x", "ax b", "-1x5", "1.5x2"] {
            assert!(
                matches!(
                    bad.parse::<ImageDimensions>(),
                    Err(AppError::InvalidDimensions { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn parse_dimensions_rejects_zero() {
        assert!(matches!(
            "0x100".parse::<ImageDimensions>(),
            Err(AppError::ZeroDimension { .. })
        ));
        assert!(matches!(
            "100x0".parse::<ImageDimensions>(),
            Err(AppError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn scaled_by_floors() {
        let d = ImageDimensions::new(4096, 4096).scaled_by(0.30618621784789724);
        assert_eq!(d, ImageDimensions::new(1254, 1254));
    }

    #[test]
    fn detail_parse_and_display() {
        assert_eq!("LOW".parse::<DetailLevel>().unwrap(), DetailLevel::Low);
        assert_eq!("high".parse::<DetailLevel>().unwrap(), DetailLevel::High);
        assert!("auto".parse::<DetailLevel>().is_err());
        assert_eq!(DetailLevel::default().to_string(), "high");
    }

    #[test]
    fn breakdown_add_accumulates() {
        let mut sum = TokenBreakdown::default();
        sum.add(&TokenBreakdown {
            base: 85.0,
            tile: 680.0,
            total: 765.0,
        });
        sum.add(&TokenBreakdown {
            base: 85.0,
            tile: 0.0,
            total: 85.0,
        });
        assert_eq!(sum.total, 850.0);
        assert_eq!(sum.base + sum.tile, sum.total);
    }
}
