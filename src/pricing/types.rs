use std::collections::HashMap;

/// Raw LiteLLM document: pricing key -> arbitrary per-model object
pub type RawPriceTable = HashMap<String, serde_json::Value>;

/// Price info consumed for image input (per token, not per million)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceEntry {
    pub input_cost_per_token: f64,
}
