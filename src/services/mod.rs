pub mod mock_performance;
pub mod performance_calculator;
pub mod performance_service;
pub mod rate_limiter;
pub mod symbol_service;
