use std::collections::HashMap;

use super::types::{PriceEntry, RawPriceTable};

/// Keep every entry with a usable `input_cost_per_token`.
///
/// LiteLLM ships non-model entries (e.g. `sample_spec`) and entries priced per
/// second or per character; those have no numeric per-token input cost and
/// are dropped.
pub(super) fn parse_litellm_data(data: &RawPriceTable) -> HashMap<String, PriceEntry> {
    data.iter()
        .filter_map(|(name, value)| {
            let input = value.get("input_cost_per_token")?.as_f64()?;
            if !input.is_finite() || input < 0.0 {
                return None;
            }
            Some((
                name.clone(),
                PriceEntry {
                    input_cost_per_token: input,
                },
            ))
        })
        .collect()
}
