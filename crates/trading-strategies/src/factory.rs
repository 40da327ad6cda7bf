//! Construction of strategies from string identifiers.

use trading_core::{
    error::StrategyError,
    traits::{Strategy, StrategyParams},
};

use crate::{
    MACrossoverStrategy, MacdTrendStrategy, MeanReversionStrategy, RsiMomentumStrategy,
    TimeOfDayStrategy,
};

/// Maps the fixed set of known identifiers to strategy constructors.
pub struct StrategyFactory;

impl StrategyFactory {
    /// Identifiers accepted by [`create`](Self::create).
    pub const KNOWN: [&'static str; 5] = [
        "ma_crossover",
        "rsi_momentum",
        "bollinger_mean_reversion",
        "macd_trend",
        "time_of_day",
    ];

    /// Known identifiers, sorted.
    pub fn known_strategies() -> Vec<String> {
        let mut names: Vec<String> = Self::KNOWN.iter().map(|s| s.to_string()).collect();
        names.sort();
        names
    }

    /// Create a default-configured strategy.
    pub fn create(name: &str) -> Result<Box<dyn Strategy>, StrategyError> {
        match name {
            "ma_crossover" => Ok(Box::new(MACrossoverStrategy::new())),
            "rsi_momentum" => Ok(Box::new(RsiMomentumStrategy::new())),
            "bollinger_mean_reversion" => Ok(Box::new(MeanReversionStrategy::new())),
            "macd_trend" => Ok(Box::new(MacdTrendStrategy::new())),
            "time_of_day" => Ok(Box::new(TimeOfDayStrategy::new())),
            _ => Err(StrategyError::UnknownStrategy {
                name: name.to_string(),
                known: Self::known_strategies(),
            }),
        }
    }

    /// Create a strategy, apply `params` and validate the result.
    pub fn create_with_params(
        name: &str,
        params: &StrategyParams,
    ) -> Result<Box<dyn Strategy>, StrategyError> {
        let mut strategy = Self::create(name)?;
        strategy.init(params)?;
        strategy.validate()?;
        Ok(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_every_known_strategy() {
        for name in StrategyFactory::KNOWN {
            let strategy = StrategyFactory::create(name).unwrap();
            assert_eq!(strategy.name(), name);
            assert!(strategy.validate().is_ok());
        }
    }

    #[test]
    fn test_unknown_strategy_lists_known_names() {
        let err = StrategyFactory::create("buy_and_hold").err().unwrap();
        match &err {
            StrategyError::UnknownStrategy { name, known } => {
                assert_eq!(name, "buy_and_hold");
                assert_eq!(known.len(), 5);
                assert!(known.contains(&"macd_trend".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("time_of_day"));
    }

    #[test]
    fn test_create_with_params_validates() {
        let params = json!({"short_period": 50, "long_period": 20});
        let err = StrategyFactory::create_with_params("ma_crossover", params.as_object().unwrap())
            .err()
            .unwrap();
        assert!(matches!(err, StrategyError::InvalidConfig(_)));

        let params = json!({"period": 7});
        let strategy =
            StrategyFactory::create_with_params("rsi_momentum", params.as_object().unwrap()).unwrap();
        assert_eq!(strategy.min_bars(), 8);
    }
}
