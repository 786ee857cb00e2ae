use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid dimensions \"{input}\" (expected WIDTHxHEIGHT, e.g. 1024x768)")]
    InvalidDimensions { input: String },

    #[error("Dimensions must be positive: {input}")]
    ZeroDimension { input: String },

    #[error("Unknown model: {input}")]
    UnknownModel { input: String },

    #[error("Invalid detail level \"{input}\" (expected low or high)")]
    InvalidDetail { input: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },
}

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Failed to fetch pricing from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Failed to read pricing cache {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pricing document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Pricing cache is older than {max_age_hours}h")]
    Stale { max_age_hours: u64 },

    #[error("No pricing cache available")]
    NoCache,

    #[error("No pricing data available (offline and no cache)")]
    Unavailable,
}
