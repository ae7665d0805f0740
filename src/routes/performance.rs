use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{AssetPerformance, PortfolioPerformance, PortfolioPerformanceRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio", post(get_portfolio_performance))
        .route("/:ticker", get(get_asset_performance))
}

pub async fn get_asset_performance(
    Path(ticker): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AssetPerformance>, AppError> {
    info!("GET /performance/{} - Computing asset performance", ticker);
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(AppError::Validation("ticker must not be empty".into()));
    }

    let asset = state.performance.asset_performance(ticker).await
        .map_err(|e| {
            error!("Failed to compute performance for {}: {}", ticker, e);
            AppError::from(e)
        })?;
    Ok(Json(asset))
}

pub async fn get_portfolio_performance(
    State(state): State<AppState>,
    Json(request): Json<PortfolioPerformanceRequest>,
) -> Json<PortfolioPerformance> {
    info!("POST /performance/portfolio - {} tickers requested", request.tickers.len());
    Json(state.performance.portfolio_performance(&request.tickers).await)
}
