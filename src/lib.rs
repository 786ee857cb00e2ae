//! Image input token and cost estimates for OpenAI vision models.
//!
//! [`calculate_tokens`] reproduces the published sizing rules: 32px patch
//! counting for the multiplier-based models, and 512px tiling after
//! 2048/768 rescaling for the rest. [`PricingDb`] turns a token count into
//! dollars using LiteLLM's price table.
//!
//! ```
//! use image_tokens::{DetailLevel, ImageDimensions, Model, calculate_tokens};
//!
//! let result = calculate_tokens(ImageDimensions::new(1024, 1024), Model::Gpt41, DetailLevel::High);
//! assert_eq!(result.tokens, 765.0);
//! ```

pub mod catalog;
pub mod consts;
pub mod error;
pub mod estimator;
pub mod pricing;

pub use catalog::{Model, ModelFamily};
pub use error::{AppError, PricingError};
pub use estimator::{
    DetailLevel, ImageDimensions, TokenBreakdown, TokenCalculationResult, breakdown,
    calculate_tokens, estimate_batch,
};
pub use pricing::{
    CachedSource, DiskCache, LiteLlmSource, PriceEntry, PriceSource, PricingDb, PricingMap,
    StaticSource,
};
