use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::config::PerformanceConfig;
use crate::errors::PerformanceError;
use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::{AssetPerformance, MockReason, PerformanceSource, PortfolioPerformance};
use crate::services::mock_performance::mock_performance;
use crate::services::performance_calculator::calculate_performance;

/// Fetch + calculate pipeline for single assets and whole portfolios.
#[derive(Clone)]
pub struct PerformanceService {
    provider: Arc<dyn PriceProvider>,
    config: PerformanceConfig,
}

impl PerformanceService {
    pub fn new(provider: Arc<dyn PriceProvider>, config: PerformanceConfig) -> Self {
        Self { provider, config }
    }

    pub async fn asset_performance(&self, ticker: &str) -> Result<AssetPerformance, PerformanceError> {
        self.asset_performance_as_of(ticker, Utc::now().date_naive()).await
    }

    /// Live figures for `ticker`, or mock figures tagged with the reason live
    /// data was unavailable.
    ///
    /// A missing credential always yields mock data. Other failures yield mock
    /// data only when `mock_fallback` is enabled and are returned otherwise.
    pub async fn asset_performance_as_of(
        &self,
        ticker: &str,
        as_of: NaiveDate,
    ) -> Result<AssetPerformance, PerformanceError> {
        let outcome = match self.provider.fetch_daily_history(ticker).await {
            Ok(series) => calculate_performance(&series, as_of),
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(performance) => {
                debug!("Computed live performance for {} as of {}", ticker, as_of);
                Ok(AssetPerformance {
                    ticker: ticker.to_string(),
                    performance,
                    source: PerformanceSource::Live,
                })
            }
            Err(PerformanceError::Provider(PriceProviderError::NoCredential)) => {
                warn!("Twelve Data API key not configured, using mock data for {}", ticker);
                Ok(Self::mocked(ticker, MockReason::NoCredential))
            }
            Err(e) if self.config.mock_fallback => {
                let reason = e.mock_reason();
                warn!("Falling back to mock performance for {} ({}): {}", ticker, reason, e);
                Ok(Self::mocked(ticker, reason))
            }
            Err(e) => Err(e),
        }
    }

    fn mocked(ticker: &str, reason: MockReason) -> AssetPerformance {
        AssetPerformance {
            ticker: ticker.to_string(),
            performance: mock_performance(),
            source: PerformanceSource::Mock { reason },
        }
    }

    pub async fn portfolio_performance(&self, tickers: &[String]) -> PortfolioPerformance {
        self.portfolio_performance_as_of(tickers, Utc::now().date_naive()).await
    }

    /// Runs every distinct ticker concurrently and waits for all of them.
    /// Tickers whose pipeline fails or panics are left out of the map.
    pub async fn portfolio_performance_as_of(
        &self,
        tickers: &[String],
        as_of: NaiveDate,
    ) -> PortfolioPerformance {
        let unique: BTreeSet<String> = tickers
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        info!("📈 Computing performance for {} tickers", unique.len());
        let started = std::time::Instant::now();

        let mut tasks = JoinSet::new();
        for ticker in unique {
            let service = self.clone();
            tasks.spawn(async move {
                let outcome = service.asset_performance_as_of(&ticker, as_of).await;
                (ticker, outcome)
            });
        }

        let mut results = PortfolioPerformance::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((ticker, Ok(asset))) => {
                    results.insert(ticker, asset.performance);
                }
                Ok((ticker, Err(e))) => {
                    warn!("Could not fetch performance for {}: {}", ticker, e);
                }
                Err(e) => {
                    error!("Performance task aborted unexpectedly: {}", e);
                }
            }
        }

        info!("📈 Portfolio performance ready: {} tickers in {:?}", results.len(), started.elapsed());
        results
    }
}
