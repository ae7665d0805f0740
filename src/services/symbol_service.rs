use tracing::{error, warn};

use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::SymbolMatch;

/// Symbol lookup for the "add investment" form. Never fails; problems are
/// logged and produce an empty list.
pub async fn search_symbols(provider: &dyn PriceProvider, query: &str) -> Vec<SymbolMatch> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    match provider.search_symbols(query).await {
        Ok(matches) => matches,
        Err(PriceProviderError::NoCredential) => {
            warn!("Twelve Data API key not configured, skipping symbol search");
            Vec::new()
        }
        Err(e) => {
            error!("Symbol search failed for '{}': {}", query, e);
            Vec::new()
        }
    }
}
