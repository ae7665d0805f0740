use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub instrument_name: String,
    pub exchange: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolSearchParams {
    pub query: String,
}
