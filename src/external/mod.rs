pub mod price_provider;
pub mod twelvedata;
