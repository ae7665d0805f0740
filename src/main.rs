mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::external::price_provider::PriceProvider;
use crate::external::twelvedata::TwelveDataProvider;
use crate::logging::LoggingConfig;
use crate::services::performance_service::PerformanceService;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(&LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let provider: Arc<dyn PriceProvider> = Arc::new(
        TwelveDataProvider::new(config.twelvedata.clone())
            .context("failed to create Twelve Data client")?,
    );
    if provider.has_credential() {
        tracing::info!("📊 Using price provider: Twelve Data ({})", config.twelvedata.base_url);
    } else {
        tracing::warn!("📊 TWELVEDATA_API_KEY missing or placeholder; serving mock performance data");
    }

    let state = AppState {
        price_provider: provider.clone(),
        performance: PerformanceService::new(provider, config.performance.clone()),
    };
    let app = app::create_app(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("🚀 Finsight backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
