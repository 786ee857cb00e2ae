//! Estimate report: token estimates joined with prices for display

use image_tokens::{
    DetailLevel, ImageDimensions, Model, PricingDb, TokenBreakdown, breakdown, estimate_batch,
};

use crate::cli::ImageSpec;

/// Dollar cost of each part of a breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct TokenCosts {
    pub(crate) base: f64,
    pub(crate) tile: f64,
    pub(crate) total: f64,
}

impl TokenCosts {
    fn of(tokens: &TokenBreakdown, model: Model, pricing_db: &PricingDb) -> Self {
        Self {
            base: pricing_db.cost(model, tokens.base),
            tile: pricing_db.cost(model, tokens.tile),
            total: pricing_db.cost(model, tokens.total),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ImageEstimate {
    pub(crate) dimensions: ImageDimensions,
    pub(crate) scaled: Option<ImageDimensions>,
    pub(crate) detail: DetailLevel,
    pub(crate) tokens: TokenBreakdown,
    pub(crate) cost: TokenCosts,
}

#[derive(Debug, Clone)]
pub(crate) struct EstimateReport {
    pub(crate) model: Model,
    pub(crate) images: Vec<ImageEstimate>,
    pub(crate) total: TokenBreakdown,
    pub(crate) total_cost: TokenCosts,
}

impl EstimateReport {
    pub(crate) fn build(
        specs: &[ImageSpec],
        model: Model,
        default_detail: DetailLevel,
        pricing_db: &PricingDb,
    ) -> Self {
        let inputs: Vec<(ImageDimensions, DetailLevel)> = specs
            .iter()
            .map(|spec| (spec.dimensions, spec.detail.unwrap_or(default_detail)))
            .collect();
        let results = estimate_batch(&inputs, model);

        let mut total = TokenBreakdown::default();
        let images: Vec<ImageEstimate> = inputs
            .iter()
            .zip(&results)
            .map(|(&(dimensions, detail), result)| {
                let tokens = breakdown(model, detail, result);
                total.add(&tokens);
                ImageEstimate {
                    dimensions,
                    scaled: result.scaled_dimensions,
                    detail,
                    tokens,
                    cost: TokenCosts::of(&tokens, model, pricing_db),
                }
            })
            .collect();

        Self {
            model,
            images,
            total_cost: TokenCosts::of(&total, model, pricing_db),
            total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use image_tokens::StaticSource;

    fn spec(s: &str) -> ImageSpec {
        s.parse().unwrap()
    }

    #[test]
    fn totals_add_up_across_images() {
        let db = PricingDb::default();
        let report = EstimateReport::build(
            &[spec("1024x1024"), spec("4096x2048"), spec("1024x1024:low")],
            Model::Gpt41,
            DetailLevel::High,
            &db,
        );
        assert_eq!(report.images.len(), 3);
        assert_eq!(report.images[2].detail, DetailLevel::Low);
        assert_eq!(report.images[2].tokens.total, 85.0);
        assert_eq!(report.total.total, 765.0 + 1105.0 + 85.0);
        assert_eq!(report.total.base, 85.0 * 3.0);
        // No prices loaded
        assert_eq!(report.total_cost, TokenCosts::default());
    }

    #[test]
    fn costs_follow_loaded_prices() {
        let db = PricingDb::default();
        db.initialize(&StaticSource::new(
            r#"{"gpt-4-vision-preview": {"input_cost_per_token": 1e-5}}"#,
        ));
        let report =
            EstimateReport::build(&[spec("1024x1024")], Model::Gpt4o, DetailLevel::High, &db);
        let cost = report.images[0].cost;
        assert!((cost.base - 0.00085).abs() < 1e-12);
        assert!((cost.tile - 0.0068).abs() < 1e-12);
        assert!((cost.total - 0.00765).abs() < 1e-12);
        assert_eq!(report.images[0].scaled, Some(ImageDimensions::new(768, 768)));
    }
}
