//! Strategy trait definitions.

use crate::error::StrategyError;
use crate::types::{BarSeries, Signal, StrategyParameter, Timeframe};

/// Named configuration dictionary handed to [`Strategy::init`].
pub type StrategyParams = serde_json::Map<String, serde_json::Value>;

/// Configuration trait for strategies.
pub trait StrategyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), StrategyError>;
}

/// Core strategy trait.
///
/// A strategy is configured once through [`init`](Strategy::init) and then
/// evaluated with [`on_data`](Strategy::on_data), which is pure: the same
/// series always yields the same signal. Indicators are recomputed from the
/// full series on every call.
pub trait Strategy: Send + Sync {
    /// Get the unique name of this strategy.
    fn name(&self) -> &str;

    /// Get a description of the strategy.
    fn description(&self) -> &str;

    /// Apply a configuration dictionary.
    ///
    /// Unknown keys are ignored and missing keys keep their documented
    /// defaults. The previous configuration is replaced only on success.
    fn init(&mut self, params: &StrategyParams) -> Result<(), StrategyError>;

    /// Check the domain constraints of the current configuration.
    fn validate(&self) -> Result<(), StrategyError>;

    /// Evaluate the series and recommend an action for its latest bar.
    ///
    /// Returns a Hold signal with a diagnostic reason when the series is
    /// shorter than [`min_bars`](Strategy::min_bars) or no condition is met.
    fn on_data(&self, series: &BarSeries) -> Signal;

    /// Get the bar interval this strategy is designed for.
    fn timeframe(&self) -> Timeframe;

    /// Describe the configurable parameters.
    fn parameters(&self) -> Vec<StrategyParameter>;

    /// Get the number of bars needed before a Buy or Sell can be emitted.
    fn min_bars(&self) -> usize;

    /// Check if `bars_available` bars are enough to evaluate.
    fn is_warmed_up(&self, bars_available: usize) -> bool {
        bars_available >= self.min_bars()
    }
}
