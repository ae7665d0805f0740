use std::sync::Arc;

use crate::external::price_provider::PriceProvider;
use crate::services::performance_service::PerformanceService;

#[derive(Clone)]
pub struct AppState {
    pub price_provider: Arc<dyn PriceProvider>,
    pub performance: PerformanceService,
}
