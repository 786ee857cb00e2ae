//! Patch accounting for multiplier-based models (gpt-4.1-mini, gpt-4.1-nano, o4-mini)

use super::types::{ImageDimensions, TokenCalculationResult};

const PATCH_SIZE: u64 = 32;
pub(super) const MAX_PATCHES: u64 = 1536;

/// Number of 32px patches covering the image.
/// Each axis is padded by `PATCH_SIZE - 1` before rounding up.
fn patch_count(dims: ImageDimensions) -> u64 {
    let per_axis = |side: u32| (u64::from(side) + PATCH_SIZE - 1).div_ceil(PATCH_SIZE);
    per_axis(dims.width) * per_axis(dims.height)
}

/// Single-pass shrink: oversized images are rescaled once to the patch
/// budget and the result is clamped to the cap.
pub(super) fn calculate(dims: ImageDimensions, multiplier: f64) -> TokenCalculationResult {
    let mut total_patches = patch_count(dims);
    let mut scaled_dimensions = None;

    if total_patches > MAX_PATCHES {
        let area = f64::from(dims.width) * f64::from(dims.height);
        let budget = (MAX_PATCHES * PATCH_SIZE * PATCH_SIZE) as f64;
        let shrink = (budget / area).sqrt();
        let resized = dims.scaled_by(shrink);
        total_patches = patch_count(resized);
        scaled_dimensions = Some(resized);
    }

    TokenCalculationResult {
        tokens: total_patches.min(MAX_PATCHES) as f64 * multiplier,
        scaled_dimensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn patch_count_pads_each_axis() {
        // ceil((512 + 31) / 32) = 17
        assert_eq!(patch_count(ImageDimensions::new(512, 512)), 289);
        assert_eq!(patch_count(ImageDimensions::new(1, 1)), 1);
        assert_eq!(patch_count(ImageDimensions::new(2, 2)), 4);
        assert_eq!(patch_count(ImageDimensions::new(4096, 4096)), 129 * 129);
    }

    #[test]
    fn under_cap_is_not_rescaled() {
        let result = calculate(ImageDimensions::new(512, 512), 1.62);
        assert!(approx(result.tokens, 468.18));
        assert_eq!(result.scaled_dimensions, None);
    }

    #[test]
    fn oversized_image_is_shrunk_then_clamped() {
        let result = calculate(ImageDimensions::new(4096, 4096), 1.62);
        assert_eq!(
            result.scaled_dimensions,
            Some(ImageDimensions::new(1254, 1254))
        );
        // 41 * 41 = 1681 patches after one shrink, clamped to 1536
        assert!(approx(result.tokens, 2488.32));
    }

    #[test]
    fn exactly_at_cap_is_kept() {
        // 48 * 32 patches: (1505 + 31) / 32 = 48, (993 + 31) / 32 = 32
        let result = calculate(ImageDimensions::new(1505, 993), 1.0);
        assert_eq!(result.tokens, 1536.0);
        assert_eq!(result.scaled_dimensions, None);
    }
}
