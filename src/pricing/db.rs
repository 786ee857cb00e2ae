use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;

use crate::catalog::Model;

use super::PriceSource;
use super::mapping::PricingMap;
use super::resolver::parse_litellm_data;
use super::types::PriceEntry;

type PriceTable = HashMap<String, PriceEntry>;

/// Price table for converting image tokens into dollars.
///
/// Starts empty. `initialize` builds a complete table and publishes it in a
/// single swap, so readers see either the old table or the new one. `cost`
/// never waits on a running `initialize`.
#[derive(Debug)]
pub struct PricingDb {
    table: ArcSwap<PriceTable>,
    mapping: PricingMap,
}

impl Default for PricingDb {
    fn default() -> Self {
        Self::new(PricingMap::default())
    }
}

impl PricingDb {
    pub fn new(mapping: PricingMap) -> Self {
        Self {
            table: ArcSwap::from_pointee(HashMap::new()),
            mapping,
        }
    }

    /// Load prices from `source` and replace the current table.
    ///
    /// Failures are logged and leave the published table untouched; costs
    /// keep falling back to zero until a load succeeds.
    pub fn initialize(&self, source: &dyn PriceSource) {
        let start = Instant::now();
        match source.fetch() {
            Ok(raw) => {
                let table = parse_litellm_data(&raw);
                let count = table.len();
                self.table.store(Arc::new(table));
                tracing::info!(
                    source = source.name(),
                    models = count,
                    "loaded pricing ({:.2}ms)",
                    start.elapsed().as_secs_f64() * 1000.0
                );
            }
            Err(e) => {
                tracing::warn!(
                    source = source.name(),
                    error = %e,
                    "failed to load pricing, costs will be reported as 0"
                );
            }
        }
    }

    pub fn mapping(&self) -> &PricingMap {
        &self.mapping
    }

    pub fn len(&self) -> usize {
        self.table.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.load().is_empty()
    }

    /// Price entry `model` is billed at, if the table has one
    pub fn entry(&self, model: Model) -> Option<PriceEntry> {
        let key = self.mapping.key_for(model);
        self.table.load().get(key).copied()
    }

    /// Dollar cost of `tokens` input tokens for `model`; 0 when unpriced.
    pub fn cost(&self, model: Model, tokens: f64) -> f64 {
        match self.entry(model) {
            Some(entry) => tokens * entry.input_cost_per_token,
            None => {
                tracing::debug!(
                    model = %model,
                    key = self.mapping.key_for(model),
                    "no price entry, cost defaults to 0"
                );
                0.0
            }
        }
    }
}
