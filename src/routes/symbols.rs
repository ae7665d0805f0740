use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::{SymbolMatch, SymbolSearchParams};
use crate::services::symbol_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
}

pub async fn search(
    Query(params): Query<SymbolSearchParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<SymbolMatch>>, AppError> {
    info!("GET /symbols/search?query={}", params.query);
    if params.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be empty".into()));
    }

    let matches = symbol_service::search_symbols(state.price_provider.as_ref(), &params.query).await;
    Ok(Json(matches))
}
