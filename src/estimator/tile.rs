//! High-detail tiling for base/tile models

use super::types::{ImageDimensions, TokenCalculationResult};

const HIGH_DETAIL_MAX_SIZE: u32 = 2048;
const HIGH_DETAIL_MIN_SIZE: u32 = 768;
const HIGH_DETAIL_TILE_SIZE: u32 = 512;

/// Fit within 2048x2048, then bring the shortest side down to 768.
/// Returns `None` when neither step applies; images are never upscaled.
pub(super) fn fit_high_detail(dims: ImageDimensions) -> Option<ImageDimensions> {
    let mut current = dims;
    let mut scaled = false;

    if current.longest_side() > HIGH_DETAIL_MAX_SIZE {
        let scale = f64::from(HIGH_DETAIL_MAX_SIZE) / f64::from(current.longest_side());
        current = current.scaled_by(scale);
        scaled = true;
    }

    let shortest = current.shortest_side();
    if shortest > HIGH_DETAIL_MIN_SIZE {
        let scale = f64::from(HIGH_DETAIL_MIN_SIZE) / f64::from(shortest);
        current = current.scaled_by(scale);
        scaled = true;
    }

    scaled.then_some(current)
}

pub(super) fn tile_count(dims: ImageDimensions) -> u32 {
    dims.width.div_ceil(HIGH_DETAIL_TILE_SIZE) * dims.height.div_ceil(HIGH_DETAIL_TILE_SIZE)
}

pub(super) fn calculate(
    dims: ImageDimensions,
    base_tokens: u32,
    tile_tokens: u32,
) -> TokenCalculationResult {
    let scaled_dimensions = fit_high_detail(dims);
    let tiles = tile_count(scaled_dimensions.unwrap_or(dims));

    TokenCalculationResult {
        tokens: f64::from(base_tokens) + f64::from(tile_tokens) * f64::from(tiles),
        scaled_dimensions,
    }
}
