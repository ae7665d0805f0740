use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::TwelveDataConfig;
use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::{PricePoint, PriceSeries, SymbolMatch};
use crate::services::rate_limiter::RateLimiter;

const SYMBOL_SEARCH_LIMIT: &str = "10";

pub struct TwelveDataProvider {
    client: reqwest::Client,
    config: TwelveDataConfig,
    limiter: RateLimiter,
}

impl TwelveDataProvider {
    pub fn new(config: TwelveDataConfig) -> Result<Self, PriceProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;
        let limiter = RateLimiter::new(config.max_concurrent_requests, config.requests_per_minute);

        Ok(Self { client, config, limiter })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Deserialize)]
struct TwelveDataTimeSeriesResponse {
    #[serde(default)]
    status: Option<String>,
    values: Option<Vec<TwelveDataValue>>,

    // Error responses: { "code": 429, "message": "...", "status": "error" }
    message: Option<String>,
    code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct TwelveDataValue {
    datetime: String,
    close: String,
}

#[derive(Debug, Deserialize)]
struct TwelveDataSearchResponse {
    #[serde(default)]
    data: Vec<TwelveDataSearchMatch>,
}

#[derive(Debug, Deserialize)]
struct TwelveDataSearchMatch {
    symbol: String,
    instrument_name: String,
    #[serde(default)]
    exchange: String,
    #[serde(default)]
    country: String,
}

fn is_rate_limit_message(msg: &str) -> bool {
    let msg = msg.to_lowercase();
    msg.contains("api rate limit") || msg.contains("api credits")
}

/// Twelve Data returns "YYYY-MM-DD" for daily bars and "YYYY-MM-DD HH:MM:SS" intraday.
fn parse_datetime(raw: &str) -> Result<NaiveDate, PriceProviderError> {
    let date_part = raw.split_whitespace().next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| PriceProviderError::MalformedResponse(format!("bad datetime {:?}: {}", raw, e)))
}

fn parse_time_series(body: &str) -> Result<PriceSeries, PriceProviderError> {
    let body: TwelveDataTimeSeriesResponse = serde_json::from_str(body)
        .map_err(|e| PriceProviderError::MalformedResponse(e.to_string()))?;

    if body.status.as_deref() != Some("ok") {
        if body.code == Some(429) {
            return Err(PriceProviderError::RateLimited);
        }
        return Err(match body.message {
            Some(msg) if is_rate_limit_message(&msg) => PriceProviderError::RateLimited,
            Some(msg) => PriceProviderError::BadResponse(msg),
            None => PriceProviderError::BadResponse(format!(
                "API returned status: {}",
                body.status.as_deref().unwrap_or("missing")
            )),
        });
    }

    let values = body
        .values
        .ok_or_else(|| PriceProviderError::MalformedResponse("missing values in response".into()))?;

    let points = values
        .into_iter()
        .map(|v| -> Result<PricePoint, PriceProviderError> {
            let date = parse_datetime(&v.datetime)?;
            // f64 parsing accepts "NaN" and "inf"; neither is a usable close.
            let close = v
                .close
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|c| c.is_finite())
                .ok_or_else(|| PriceProviderError::MalformedResponse(format!("bad close {:?}", v.close)))?;
            Ok(PricePoint::new(date, close))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PriceSeries::new(points))
}

fn parse_symbol_search(body: &str) -> Result<Vec<SymbolMatch>, PriceProviderError> {
    let body: TwelveDataSearchResponse = serde_json::from_str(body)
        .map_err(|e| PriceProviderError::MalformedResponse(e.to_string()))?;

    Ok(body
        .data
        .into_iter()
        .map(|m| SymbolMatch {
            symbol: m.symbol,
            instrument_name: m.instrument_name,
            exchange: m.exchange,
            country: m.country,
        })
        .collect())
}

#[async_trait]
impl PriceProvider for TwelveDataProvider {
    fn has_credential(&self) -> bool {
        self.config.credential().is_some()
    }

    async fn fetch_daily_history(&self, ticker: &str) -> Result<PriceSeries, PriceProviderError> {
        let api_key = self
            .config
            .credential()
            .ok_or(PriceProviderError::NoCredential)?;

        let output_size = self.config.output_size.to_string();
        let _permit = self.limiter.acquire().await;

        debug!("Requesting {} daily bars for {} from Twelve Data", output_size, ticker);
        let resp = self
            .client
            .get(self.endpoint("time_series"))
            .query(&[
                ("symbol", ticker),
                ("interval", "1day"),
                ("outputsize", output_size.as_str()),
                ("apikey", api_key),
            ])
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceProviderError::RateLimited);
        }

        let text = resp.text().await?;
        if !status.is_success() {
            warn!("Twelve Data returned HTTP {} for {}", status, ticker);
            return Err(PriceProviderError::BadResponse(format!("HTTP {}", status)));
        }

        parse_time_series(&text)
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, PriceProviderError> {
        let api_key = self
            .config
            .credential()
            .ok_or(PriceProviderError::NoCredential)?;

        let mut params = vec![("symbol", query), ("outputsize", SYMBOL_SEARCH_LIMIT)];
        if let Some(country) = self.config.symbol_search_country.as_deref() {
            params.push(("country", country));
        }

        let _permit = self.limiter.acquire().await;
        let resp = self
            .client
            .get(self.endpoint("symbol_search"))
            .header("Authorization", format!("apikey {}", api_key))
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceProviderError::RateLimited);
        }
        if !status.is_success() {
            return Err(PriceProviderError::BadResponse(format!("HTTP {}", status)));
        }

        parse_symbol_search(&resp.text().await?)
    }
}
