use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{health, performance, symbols};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/performance", performance::router())
        .nest("/api/symbols", symbols::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::{PerformanceConfig, TwelveDataConfig};
    use crate::external::price_provider::PriceProvider;
    use crate::external::twelvedata::TwelveDataProvider;
    use crate::services::mock_performance::within_mock_ranges;
    use crate::services::performance_service::PerformanceService;

    // No API key: every figure comes from the mock path and nothing hits the network.
    fn offline_app() -> Router {
        let provider: Arc<dyn PriceProvider> = Arc::new(
            TwelveDataProvider::new(TwelveDataConfig::default().with_base_url("http://127.0.0.1:9")).unwrap(),
        );
        let state = AppState {
            price_provider: provider.clone(),
            performance: PerformanceService::new(provider, PerformanceConfig::default()),
        };
        create_app(state)
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_mock_mode() {
        let resp = offline_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["live_prices"], false);
    }

    #[tokio::test]
    async fn test_asset_performance_without_key_is_mocked() {
        let resp = offline_app()
            .oneshot(Request::builder().uri("/api/performance/AAPL").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let asset: crate::models::AssetPerformance = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(asset.ticker, "AAPL");
        assert!(asset.source.is_mock());
        assert!(within_mock_ranges(&asset.performance));
    }

    #[tokio::test]
    async fn test_portfolio_performance_endpoint() {
        let resp = offline_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/performance/portfolio")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"tickers": ["AAPL", "MSFT", "AAPL"]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert!(map["MSFT"]["fiveYearlyChange"].is_number());
    }

    #[tokio::test]
    async fn test_symbol_search_requires_query() {
        let resp = offline_app()
            .oneshot(Request::builder().uri("/api/symbols/search?query=").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_symbol_search_without_key_is_empty() {
        let resp = offline_app()
            .oneshot(Request::builder().uri("/api/symbols/search?query=INFY").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!([]));
    }
}
