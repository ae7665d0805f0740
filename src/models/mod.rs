mod price_point;
mod performance;
mod symbol;

pub use price_point::{PricePoint, PriceSeries};
pub use performance::{
    AssetPerformance, MockReason, PerformanceResult, PerformanceSource, PortfolioPerformance,
    PortfolioPerformanceRequest,
};
pub use symbol::{SymbolMatch, SymbolSearchParams};
