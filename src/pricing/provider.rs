use std::time::Duration;

use crate::consts::{FETCH_RETRIES, FETCH_TIMEOUT, LITELLM_PRICING_URL, RETRY_BACKOFF_MS};
use crate::error::PricingError;

use super::PriceSource;
use super::types::RawPriceTable;

/// Price document served over HTTP (LiteLLM's JSON by default)
#[derive(Debug, Clone)]
pub struct LiteLlmSource {
    url: String,
    timeout: Duration,
    retries: usize,
}

impl Default for LiteLlmSource {
    fn default() -> Self {
        Self::new(LITELLM_PRICING_URL)
    }
}

impl LiteLlmSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: FETCH_TIMEOUT,
            retries: FETCH_RETRIES,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries.max(1);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_once(&self, agent: &ureq::Agent) -> Result<RawPriceTable, PricingError> {
        let response = agent
            .get(&self.url)
            .call()
            .map_err(|e| PricingError::Http {
                url: self.url.clone(),
                source: Box::new(e),
            })?;
        let mut body = response.into_body();
        Ok(serde_json::from_reader(body.as_reader())?)
    }
}

impl PriceSource for LiteLlmSource {
    fn name(&self) -> &'static str {
        "litellm"
    }

    fn fetch(&self) -> Result<RawPriceTable, PricingError> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();

        let mut attempt = 0;
        loop {
            match self.fetch_once(&agent) {
                Ok(data) => return Ok(data),
                Err(e) if attempt + 1 < self.retries => {
                    tracing::debug!(attempt, error = %e, "pricing fetch failed, retrying");
                    std::thread::sleep(Duration::from_millis(
                        RETRY_BACKOFF_MS * (attempt as u64 + 1),
                    ));
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Price document held in memory, parsed on each fetch
#[derive(Debug, Clone)]
pub struct StaticSource {
    document: String,
}

impl StaticSource {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl PriceSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn fetch(&self) -> Result<RawPriceTable, PricingError> {
        Ok(serde_json::from_str(&self.document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_source_parses_document() {
        let source = StaticSource::new(r#"{"gpt-4o": {"input_cost_per_token": 2.5e-6}}"#);
        let data = source.fetch().unwrap();
        assert!(data.contains_key("gpt-4o"));
    }

    #[test]
    fn static_source_reports_bad_json() {
        let source = StaticSource::new("not json");
        assert!(matches!(source.fetch(), Err(PricingError::Parse(_))));
    }

    #[test]
    fn litellm_source_defaults() {
        let source = LiteLlmSource::default();
        assert_eq!(source.url(), LITELLM_PRICING_URL);
        assert_eq!(source.retries, FETCH_RETRIES);
        assert_eq!(source.with_retries(0).retries, 1);
    }

    #[test]
    fn unreachable_host_is_an_error() {
        let source = LiteLlmSource::new("http://127.0.0.1:9/pricing.json")
            .with_timeout(Duration::from_millis(500))
            .with_retries(1);
        assert!(matches!(source.fetch(), Err(PricingError::Http { .. })));
    }
}
