//! Momentum indicators.

use serde::{Deserialize, Serialize};
use trading_core::traits::{Indicator, MultiOutputIndicator};

use crate::moving_average::ema_from;

/// Relative Strength Index (RSI) with Wilder smoothing.
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn rsi(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if self.period == 0 || data.len() <= self.period {
            return result;
        }

        let period_f64 = self.period as f64;
        let deltas: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();
        let gain = |d: f64| if d > 0.0 { d } else { 0.0 };
        let loss = |d: f64| if d < 0.0 { -d } else { 0.0 };

        // Initial averages over the first `period` deltas
        let seed = &deltas[..self.period];
        let mut avg_gain = seed.iter().map(|&d| gain(d)).sum::<f64>() / period_f64;
        let mut avg_loss = seed.iter().map(|&d| loss(d)).sum::<f64>() / period_f64;
        result[self.period] = Some(Self::rsi(avg_gain, avg_loss));

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for (i, &delta) in deltas.iter().enumerate().skip(self.period) {
            avg_gain = (avg_gain * (period_f64 - 1.0) + gain(delta)) / period_f64;
            avg_loss = (avg_loss * (period_f64 - 1.0) + loss(delta)) / period_f64;
            result[i + 1] = Some(Self::rsi(avg_gain, avg_loss));
        }

        result
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// One MACD point; each component carries its own readiness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: Option<f64>,
    /// Signal line (EMA of the MACD line)
    pub signal: Option<f64>,
    /// Histogram (MACD - Signal)
    pub histogram: Option<f64>,
}

impl MacdOutput {
    /// MACD and signal values, when both are defined.
    pub fn lines(&self) -> Option<(f64, f64)> {
        Some((self.macd?, self.signal?))
    }
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum. The signal line
/// warms up from the first defined MACD value, not from the first input.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let mut result = vec![MacdOutput::default(); data.len()];
        if self.fast_period == 0 || self.slow_period == 0 || self.signal_period == 0 {
            return result;
        }

        let fast_ema = ema_from(data, 0, self.fast_period);
        let slow_ema = ema_from(data, 0, self.slow_period);

        let macd_line: Vec<Option<f64>> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(fast, slow)| Some((*fast)? - (*slow)?))
            .collect();

        let Some(first) = macd_line.iter().position(Option::is_some) else {
            return result;
        };

        let dense: Vec<f64> = macd_line.iter().map(|v| v.unwrap_or(0.0)).collect();
        let signal_line = ema_from(&dense, first, self.signal_period);

        for (i, point) in result.iter_mut().enumerate() {
            point.macd = macd_line[i];
            point.signal = signal_line[i];
            point.histogram = match (macd_line[i], signal_line[i]) {
                (Some(macd), Some(signal)) => Some(macd - signal),
                _ => None,
            };
        }

        result
    }

    fn period(&self) -> usize {
        (self.fast_period.max(self.slow_period) + self.signal_period).saturating_sub(1)
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounds() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), 30);
        assert!(result[..14].iter().all(Option::is_none));

        for value in result[14..].iter().map(|v| v.unwrap()) {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let result = Rsi::new(5).calculate(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

        assert!(result[4].is_none());
        assert_eq!(result[5], Some(100.0));
        assert_eq!(result[6], Some(100.0));
    }

    #[test]
    fn test_rsi_all_losses() {
        let result = Rsi::new(5).calculate(&[7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);

        assert_eq!(result[5], Some(0.0));
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        // Deltas: +2, -1, +1, then -2
        let result = Rsi::new(3).calculate(&[10.0, 12.0, 11.0, 12.0, 10.0]);

        // avg gain 1.0, avg loss 1/3 => RS 3 => RSI 75
        assert!((result[3].unwrap() - 75.0).abs() < 1e-10);
        // gain (1*2 + 0)/3 = 2/3, loss (1/3*2 + 2)/3 = 8/9 => RS 0.75
        let expected = 100.0 - 100.0 / 1.75;
        assert!((result[4].unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_requires_period_plus_one() {
        let result = Rsi::new(5).calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn test_macd_uptrend_is_positive() {
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = Macd::new().calculate(&data);

        assert_eq!(result.len(), 50);
        assert!(result.last().unwrap().macd.unwrap() > 0.0);
    }

    #[test]
    fn test_macd_signal_warmup_starts_at_macd_line() {
        let data: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64 * 0.3).sin() * 4.0).collect();
        let result = Macd::with_periods(3, 6, 4).calculate(&data);

        let first_macd = result.iter().position(|p| p.macd.is_some()).unwrap();
        let first_signal = result.iter().position(|p| p.signal.is_some()).unwrap();
        let first_hist = result.iter().position(|p| p.histogram.is_some()).unwrap();

        assert_eq!(first_macd, 5);
        assert_eq!(first_signal, first_macd + 4 - 1);
        assert_eq!(first_hist, first_signal);
    }

    #[test]
    fn test_macd_histogram() {
        let data: Vec<f64> = (0..40).map(|i| (i as f64).powi(2) / 10.0).collect();
        let result = Macd::with_periods(5, 10, 3).calculate(&data);

        for point in result.iter().filter(|p| p.histogram.is_some()) {
            let (macd, signal) = point.lines().unwrap();
            assert!((point.histogram.unwrap() - (macd - signal)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_invalid_periods() {
        let data: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let result = Macd::with_periods(0, 26, 9).calculate(&data);

        assert_eq!(result.len(), 40);
        assert!(result.iter().all(|p| p.macd.is_none() && p.signal.is_none()));
    }
}
