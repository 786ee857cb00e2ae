use std::time::Duration;

/// LiteLLM price table, pinned to a known revision
pub const LITELLM_PRICING_URL: &str = "https://raw.githubusercontent.com/BerriAI/litellm/afe8abc768958efc329755de322fff450955eb36/model_prices_and_context_window.json";

/// Upstream pricing entry every catalog model maps to unless overridden
pub const DEFAULT_PRICING_KEY: &str = "gpt-4-vision-preview";

pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const FETCH_RETRIES: usize = 3;
pub(crate) const RETRY_BACKOFF_MS: u64 = 250;

pub(crate) const PRICING_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Directory name used under the user's config and cache dirs
pub const APP_DIR: &str = "image-tokens";
