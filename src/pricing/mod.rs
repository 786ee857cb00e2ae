//! Token-to-dollar conversion backed by LiteLLM's price table

mod cache;
mod db;
mod mapping;
mod provider;
mod resolver;
mod types;

pub use cache::{CachedSource, DiskCache};
pub use db::PricingDb;
pub use mapping::PricingMap;
pub use provider::{LiteLlmSource, StaticSource};
pub use types::{PriceEntry, RawPriceTable};

use crate::error::PricingError;

/// Somewhere a raw price document can be loaded from
pub trait PriceSource: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Retrieve the whole document; may block on I/O
    fn fetch(&self) -> Result<RawPriceTable, PricingError>;
}
