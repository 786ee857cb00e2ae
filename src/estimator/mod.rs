//! Image token estimation
//!
//! Pure functions mapping `(dimensions, model, detail)` to the number of input
//! tokens a vision model charges. Nothing here does I/O or holds state, so the
//! functions can be called from any number of threads.

mod patch;
mod tile;
mod types;

use rayon::prelude::*;

use crate::catalog::{Model, ModelFamily};

pub use types::{DetailLevel, ImageDimensions, TokenBreakdown, TokenCalculationResult};

/// Estimate the tokens for one image.
///
/// Patch-family models ignore `detail`. Callers must pass positive dimensions.
pub fn calculate_tokens(
    dimensions: ImageDimensions,
    model: Model,
    detail: DetailLevel,
) -> TokenCalculationResult {
    match (model.family(), detail) {
        (ModelFamily::Patch { multiplier }, _) => patch::calculate(dimensions, multiplier),
        (ModelFamily::Tile { base_tokens, .. }, DetailLevel::Low) => TokenCalculationResult {
            tokens: f64::from(base_tokens),
            scaled_dimensions: None,
        },
        (
            ModelFamily::Tile {
                base_tokens,
                tile_tokens,
            },
            DetailLevel::High,
        ) => tile::calculate(dimensions, base_tokens, tile_tokens),
    }
}

/// Split a result into its flat part and its per-tile (or per-patch) part.
pub fn breakdown(
    model: Model,
    detail: DetailLevel,
    result: &TokenCalculationResult,
) -> TokenBreakdown {
    let total = result.tokens;
    match (model.family(), detail) {
        (ModelFamily::Patch { .. }, _) => TokenBreakdown {
            base: 0.0,
            tile: total,
            total,
        },
        (ModelFamily::Tile { .. }, DetailLevel::Low) => TokenBreakdown {
            base: total,
            tile: 0.0,
            total,
        },
        (ModelFamily::Tile { base_tokens, .. }, DetailLevel::High) => {
            let base = f64::from(base_tokens);
            TokenBreakdown {
                base,
                tile: total - base,
                total,
            }
        }
    }
}

/// Estimate a batch of images in parallel, preserving input order.
pub fn estimate_batch(
    images: &[(ImageDimensions, DetailLevel)],
    model: Model,
) -> Vec<TokenCalculationResult> {
    images
        .par_iter()
        .map(|&(dims, detail)| calculate_tokens(dims, model, detail))
        .collect()
}
