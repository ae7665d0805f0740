use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::debug;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    /// False when every performance figure will be synthetic.
    live_prices: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!("GET /health - Health check");
    Json(HealthResponse {
        status: "ok",
        live_prices: state.price_provider.has_credential(),
    })
}
