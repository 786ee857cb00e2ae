use image_tokens::{Model, ModelFamily, PricingDb};

use crate::report::EstimateReport;

pub(crate) fn output_estimate_json(report: &EstimateReport, show_cost: bool) -> String {
    let images: Vec<serde_json::Value> = report
        .images
        .iter()
        .map(|image| {
            let mut obj = serde_json::json!({
                "width": image.dimensions.width,
                "height": image.dimensions.height,
                "detail": image.detail,
                "base_tokens": image.tokens.base,
                "tile_tokens": image.tokens.tile,
                "total_tokens": image.tokens.total,
            });
            if let Some(scaled) = image.scaled {
                obj["scaled_width"] = serde_json::json!(scaled.width);
                obj["scaled_height"] = serde_json::json!(scaled.height);
            }
            if show_cost {
                obj["base_cost"] = serde_json::json!(image.cost.base);
                obj["tile_cost"] = serde_json::json!(image.cost.tile);
                obj["cost"] = serde_json::json!(image.cost.total);
            }
            obj
        })
        .collect();

    let mut summary = serde_json::json!({
        "images": report.images.len(),
        "base_tokens": report.total.base,
        "tile_tokens": report.total.tile,
        "total_tokens": report.total.total,
    });
    if show_cost {
        summary["base_cost"] = serde_json::json!(report.total_cost.base);
        summary["tile_cost"] = serde_json::json!(report.total_cost.tile);
        summary["cost"] = serde_json::json!(report.total_cost.total);
    }

    let output = serde_json::json!({
        "model": report.model,
        "images": images,
        "summary": summary,
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize JSON output");
        "{}".to_string()
    })
}

pub(crate) fn output_models_json(pricing_db: &PricingDb, show_cost: bool) -> String {
    let output: Vec<serde_json::Value> = Model::ALL
        .iter()
        .map(|&model| {
            let mut obj = serde_json::json!({
                "model": model,
                "name": model.display_name(),
                "pricing_key": pricing_db.mapping().key_for(model),
            });
            match model.family() {
                ModelFamily::Patch { multiplier } => {
                    obj["family"] = serde_json::json!("patch");
                    obj["multiplier"] = serde_json::json!(multiplier);
                }
                ModelFamily::Tile {
                    base_tokens,
                    tile_tokens,
                } => {
                    obj["family"] = serde_json::json!("tile");
                    obj["base_tokens"] = serde_json::json!(base_tokens);
                    obj["tile_tokens"] = serde_json::json!(tile_tokens);
                }
            }
            if show_cost {
                obj["input_cost_per_token"] = pricing_db
                    .entry(model)
                    .map_or(serde_json::Value::Null, |entry| {
                        serde_json::json!(entry.input_cost_per_token)
                    });
            }
            obj
        })
        .collect();

    serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to serialize JSON output");
        "[]".to_string()
    })
}
