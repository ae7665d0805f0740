use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use thiserror::Error;

use crate::external::price_provider::PriceProviderError;
use crate::models::MockReason;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Rate limited by external provider")]
    RateLimited,
    #[error("External error: {0}")]
    External(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::RateLimited => {
                let mut headers = HeaderMap::new();
                headers.insert("Retry-After", HeaderValue::from_static("60"));
                (StatusCode::TOO_MANY_REQUESTS, headers, "Rate limited").into_response()
            },
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
        }
    }
}

impl From<PerformanceError> for AppError {
    fn from(value: PerformanceError) -> Self {
        match value {
            PerformanceError::Provider(PriceProviderError::RateLimited) => AppError::RateLimited,
            other => AppError::External(other.to_string()),
        }
    }
}

/// Failure of the fetch + calculate pipeline for a single ticker.
#[derive(Debug, Error)]
pub enum PerformanceError {
    #[error("price provider: {0}")]
    Provider(#[from] PriceProviderError),
    #[error("could not determine current price")]
    NoCurrentPrice,
}

impl PerformanceError {
    pub fn mock_reason(&self) -> MockReason {
        match self {
            PerformanceError::Provider(e) => e.mock_reason(),
            PerformanceError::NoCurrentPrice => MockReason::NoCurrentPrice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_maps_to_429_with_retry_after() {
        let err: AppError = PerformanceError::Provider(PriceProviderError::RateLimited).into();
        let resp = err.into_response();

        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers().get("Retry-After").unwrap(), "60");
    }

    #[test]
    fn test_other_pipeline_failures_map_to_bad_gateway() {
        let err: AppError = PerformanceError::NoCurrentPrice.into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);

        let err: AppError = PerformanceError::Provider(PriceProviderError::Network("timed out".into())).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_mock_reason_follows_cause() {
        assert_eq!(PerformanceError::NoCurrentPrice.mock_reason(), MockReason::NoCurrentPrice);
        assert_eq!(
            PerformanceError::Provider(PriceProviderError::MalformedResponse("x".into())).mock_reason(),
            MockReason::MalformedResponse
        );
    }
}
