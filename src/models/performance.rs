use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Percentage price change over the four look-back windows.
///
/// Every field is always present; a window without a reference price is `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResult {
    pub weekly_change: f64,
    pub monthly_change: f64,
    pub yearly_change: f64,
    pub five_yearly_change: f64,
}

/// Why live data was replaced with synthetic figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MockReason {
    NoCredential,
    RateLimited,
    BadResponse,
    MalformedResponse,
    Network,
    NoCurrentPrice,
}

impl fmt::Display for MockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MockReason::NoCredential => "no_credential",
            MockReason::RateLimited => "rate_limited",
            MockReason::BadResponse => "bad_response",
            MockReason::MalformedResponse => "malformed_response",
            MockReason::Network => "network",
            MockReason::NoCurrentPrice => "no_current_price",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PerformanceSource {
    Live,
    Mock { reason: MockReason },
}

impl PerformanceSource {
    #[cfg(test)]
    pub fn is_mock(&self) -> bool {
        matches!(self, PerformanceSource::Mock { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPerformance {
    pub ticker: String,
    pub performance: PerformanceResult,
    pub source: PerformanceSource,
}

/// Ticker -> performance. Tickers that failed are absent.
pub type PortfolioPerformance = BTreeMap<String, PerformanceResult>;

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioPerformanceRequest {
    pub tickers: Vec<String>,
}
