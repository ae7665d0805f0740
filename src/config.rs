use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Value shipped in sample `.env` files; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";
const DEFAULT_OUTPUT_SIZE: u32 = 2000;
const DEFAULT_SYMBOL_SEARCH_COUNTRY: &str = "India";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct TwelveDataConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Number of daily bars requested per ticker. 2000 covers more than five years.
    pub output_size: u32,
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
    pub requests_per_minute: Option<u32>,
    pub symbol_search_country: Option<String>,
}

impl Default for TwelveDataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_size: DEFAULT_OUTPUT_SIZE,
            request_timeout: Duration::from_secs(10),
            max_concurrent_requests: 8,
            requests_per_minute: None,
            symbol_search_country: Some(DEFAULT_SYMBOL_SEARCH_COUNTRY.to_string()),
        }
    }
}

impl TwelveDataConfig {
    #[cfg(test)]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The API key, unless it is missing, blank or the placeholder.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            api_key: std::env::var("TWELVEDATA_API_KEY").ok(),
            base_url: std::env::var("TWELVEDATA_BASE_URL").unwrap_or(defaults.base_url),
            output_size: env_parse("TWELVEDATA_OUTPUT_SIZE", defaults.output_size)?,
            request_timeout: Duration::from_secs(env_parse(
                "PRICE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            max_concurrent_requests: env_parse(
                "MAX_CONCURRENT_PRICE_REQUESTS",
                defaults.max_concurrent_requests,
            )?,
            requests_per_minute: env_parse_opt("PRICE_REQUESTS_PER_MINUTE")?,
            symbol_search_country: match std::env::var("SYMBOL_SEARCH_COUNTRY") {
                // An explicitly empty value searches every exchange.
                Ok(country) => Some(country).filter(|c| !c.trim().is_empty()),
                Err(_) => defaults.symbol_search_country,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    /// Substitute synthetic figures when live data cannot be computed.
    pub mock_fallback: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { mock_fallback: true }
    }
}

impl PerformanceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            mock_fallback: env_parse("MOCK_FALLBACK", true)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub twelvedata: TwelveDataConfig,
    pub performance: PerformanceConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: env_parse("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            twelvedata: TwelveDataConfig::from_env()?,
            performance: PerformanceConfig::from_env()?,
        })
    }
}

fn env_parse<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    Ok(env_parse_opt(key)?.unwrap_or(default))
}

fn env_parse_opt<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(None),
    }
}
