//! Parsed bar cache.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use trading_core::types::Bar;

/// In-memory cache of parsed bars, keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct DataCache {
    cache: Arc<RwLock<HashMap<String, Arc<Vec<Bar>>>>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get cached bars.
    pub async fn get(&self, symbol: &str) -> Option<Arc<Vec<Bar>>> {
        self.cache.read().await.get(symbol).cloned()
    }

    /// Store bars in cache.
    pub async fn put(&self, symbol: &str, bars: Vec<Bar>) -> Arc<Vec<Bar>> {
        let bars = Arc::new(bars);
        self.cache
            .write()
            .await
            .insert(symbol.to_string(), Arc::clone(&bars));
        bars
    }

    /// Clear cache for a symbol.
    pub async fn clear(&self, symbol: &str) {
        self.cache.write().await.remove(symbol);
    }

    /// Clear all cached data.
    pub async fn clear_all(&self) {
        self.cache.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }
}
