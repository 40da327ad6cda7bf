//! Volatility indicators.

use serde::{Deserialize, Serialize};
use trading_core::traits::{Indicator, MultiOutputIndicator};

use crate::moving_average::Sma;

/// Population standard deviation of the trailing window.
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
}

impl StdDev {
    /// Create a new standard deviation indicator.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for StdDev {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let means = Sma::new(self.period).calculate(data);
        let period_f64 = self.period as f64;

        means
            .iter()
            .enumerate()
            .map(|(i, mean)| {
                let mean = (*mean)?;
                let window = &data[i + 1 - self.period..=i];
                let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f64;
                Some(variance.sqrt())
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
    /// Bandwidth ((upper - lower) / middle)
    pub bandwidth: f64,
    /// %B ((price - lower) / (upper - lower)), 0.5 when the bands collapse
    pub percent_b: f64,
}

impl BollingerOutput {
    /// Check if price is at or above the upper band.
    pub fn touches_upper(&self, price: f64) -> bool {
        price >= self.upper
    }

    /// Check if price is at or below the lower band.
    pub fn touches_lower(&self, price: f64) -> bool {
        price <= self.lower
    }

    /// Distance between the outer bands.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Bollinger Bands.
///
/// A middle band (SMA) with upper and lower bands `k` standard deviations
/// away. Undefined wherever the middle band is undefined.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = Option<BollingerOutput>;

    fn calculate(&self, data: &[f64]) -> Vec<Option<BollingerOutput>> {
        let middles = Sma::new(self.period).calculate(data);
        let std_devs = StdDev::new(self.period).calculate(data);

        middles
            .iter()
            .zip(std_devs.iter())
            .zip(data.iter())
            .map(|((middle, std_dev), &price)| {
                let middle = (*middle)?;
                let std_dev = (*std_dev)?;

                let upper = middle + self.std_dev_multiplier * std_dev;
                let lower = middle - self.std_dev_multiplier * std_dev;

                let bandwidth = if middle != 0.0 {
                    (upper - lower) / middle
                } else {
                    0.0
                };
                let percent_b = if upper != lower {
                    (price - lower) / (upper - lower)
                } else {
                    0.5
                };

                Some(BollingerOutput {
                    upper,
                    middle,
                    lower,
                    bandwidth,
                    percent_b,
                })
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}
