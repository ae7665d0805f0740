use async_trait::async_trait;
use thiserror::Error;

use crate::models::{MockReason, PriceSeries, SymbolMatch};

#[derive(Debug, Error)]
pub enum PriceProviderError {
    #[error("no provider credential configured")]
    NoCredential,

    #[error("rate limited")]
    RateLimited,

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("network error: {0}")]
    Network(String),
}

impl PriceProviderError {
    pub fn mock_reason(&self) -> MockReason {
        match self {
            PriceProviderError::NoCredential => MockReason::NoCredential,
            PriceProviderError::RateLimited => MockReason::RateLimited,
            PriceProviderError::BadResponse(_) => MockReason::BadResponse,
            PriceProviderError::MalformedResponse(_) => MockReason::MalformedResponse,
            PriceProviderError::Network(_) => MockReason::Network,
        }
    }
}

// Request URLs carry the API key; keep them out of error text.
impl From<reqwest::Error> for PriceProviderError {
    fn from(value: reqwest::Error) -> Self {
        let value = value.without_url();
        if value.is_decode() {
            PriceProviderError::MalformedResponse(value.to_string())
        } else {
            PriceProviderError::Network(value.to_string())
        }
    }
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Whether requests can reach the live provider at all.
    fn has_credential(&self) -> bool {
        true
    }

    /// Daily closes for `ticker`, newest first.
    async fn fetch_daily_history(&self, ticker: &str) -> Result<PriceSeries, PriceProviderError>;

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, PriceProviderError>;
}
