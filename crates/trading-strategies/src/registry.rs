//! Name to strategy catalog.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use trading_core::{
    error::StrategyError,
    traits::Strategy,
    types::{StrategyParameter, Timeframe},
};

use crate::StrategyFactory;

/// Information about a registered strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Strategy name
    pub name: String,
    /// Strategy description
    pub description: String,
    pub timeframe: Timeframe,
    pub min_bars: usize,
    pub parameters: Vec<StrategyParameter>,
}

impl StrategyInfo {
    fn of(strategy: &dyn Strategy) -> Self {
        Self {
            name: strategy.name().to_string(),
            description: strategy.description().to_string(),
            timeframe: strategy.timeframe(),
            min_bars: strategy.min_bars(),
            parameters: strategy.parameters(),
        }
    }
}

/// Registry of configured strategy instances, keyed by name.
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding one default-configured instance of every known strategy.
    pub fn builtin() -> Result<Self, StrategyError> {
        let mut registry = Self::new();
        for name in StrategyFactory::KNOWN {
            let strategy = StrategyFactory::create(name)?;
            registry.register(Arc::from(strategy))?;
        }
        Ok(registry)
    }

    /// Add a strategy under its own name.
    pub fn register(&mut self, strategy: Arc<dyn Strategy>) -> Result<(), StrategyError> {
        let name = strategy.name().to_string();
        if self.strategies.contains_key(&name) {
            return Err(StrategyError::AlreadyRegistered(name));
        }
        self.strategies.insert(name, strategy);
        Ok(())
    }

    /// Get strategy by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Strategy>> {
        self.strategies.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.strategies.keys().cloned().collect();
        names.sort();
        names
    }

    /// All registered strategies, sorted by name.
    pub fn all(&self) -> Vec<Arc<dyn Strategy>> {
        let mut all: Vec<Arc<dyn Strategy>> = self.strategies.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Serializable summaries, sorted by name.
    pub fn info(&self) -> Vec<StrategyInfo> {
        self.all().iter().map(|s| StrategyInfo::of(s.as_ref())).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
