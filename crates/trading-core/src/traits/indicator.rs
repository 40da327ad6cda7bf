//! Indicator trait definitions.
//!
//! Indicators are batch transforms: the output always has one entry per
//! input value, and `None` marks indices where the value is not yet defined.
//! Invalid periods or short input produce an all-`None` result rather than
//! an error, so callers check readiness at the index they read.

/// Trait for single-valued technical indicators.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically close prices), oldest first
    ///
    /// # Returns
    /// A vector the same length as `data`
    fn calculate(&self, data: &[f64]) -> Vec<Option<Self::Output>>;

    /// Get the minimum data points required for the first defined value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Multi-output indicator (e.g., Bollinger Bands, MACD).
///
/// Each output point carries its own readiness, since components of the
/// same indicator may become defined at different indices.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values; the result has the same length as `data`.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Get the minimum data points required for a fully defined point.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
