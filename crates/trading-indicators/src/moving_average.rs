//! Moving average indicators.

use trading_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the trailing `period` values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if self.period == 0 || data.len() < self.period {
            return result;
        }

        for (i, window) in data.windows(self.period).enumerate() {
            result[i + self.period - 1] = Some(window_mean(window));
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Seeded with the SMA of the first `period` values, then
/// `ema[i] = (price[i] - ema[i-1]) * k + ema[i-1]` with `k = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Smoothing factor.
    pub fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        ema_from(data, 0, self.period)
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// EMA over `data[start..]`, aligned to the full input.
///
/// Entries before `start + period - 1` are undefined, so a series with its
/// own warm-up (such as the MACD line) can be smoothed from where it begins.
pub(crate) fn ema_from(data: &[f64], start: usize, period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if period == 0 || start >= data.len() || data.len() - start < period {
        return result;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed_end = start + period;

    // Initialize with SMA
    let mut ema = window_mean(&data[start..seed_end]);
    result[seed_end - 1] = Some(ema);

    for (i, &price) in data.iter().enumerate().skip(seed_end) {
        ema = (price - ema) * k + ema;
        result[i] = Some(ema);
    }

    result
}

/// Arithmetic mean of a window.
///
/// A window of identical values returns that value exactly, and the naive
/// `sum / n` is corrected by the mean residual so that deviations taken
/// around the result sum to (nearly) zero.
pub(crate) fn window_mean(window: &[f64]) -> f64 {
    let Some(&first) = window.first() else {
        return 0.0;
    };
    if window.iter().all(|&x| x == first) {
        return first;
    }

    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    mean + window.iter().map(|x| x - mean).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let result = sma.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(result.len(), 5);
        assert_eq!(result[..2], [None, None]);
        assert!((result[2].unwrap() - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[3].unwrap() - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[4].unwrap() - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let result = Sma::new(5).calculate(&[1.0, 2.0, 3.0]);

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(Option::is_none));
    }

    #[test]
    fn test_sma_of_constant_window_is_exact() {
        for (value, period) in [(100.1, 20), (0.7, 3), (0.1, 20)] {
            let data = vec![value; period];
            assert_eq!(Sma::new(period).calculate(&data)[period - 1], Some(value));
            assert_eq!(Ema::new(period).calculate(&data)[period - 1], Some(value));
        }
    }

    #[test]
    fn test_zero_period_is_undefined() {
        assert!(Sma::new(0).calculate(&[1.0, 2.0]).iter().all(Option::is_none));
        assert!(Ema::new(0).calculate(&[1.0, 2.0]).iter().all(Option::is_none));
    }

    #[test]
    fn test_ema() {
        let ema = Ema::new(3);
        let result = ema.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(result.len(), 5);
        assert!(result[1].is_none());
        assert!((result[2].unwrap() - 2.0).abs() < 1e-10); // Initial SMA
        // k = 2/(3+1) = 0.5, (4 - 2) * 0.5 + 2 = 3
        assert!((result[3].unwrap() - 3.0).abs() < 1e-10);
        assert!((result[4].unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_ema_from_offset() {
        let data = [0.0, 0.0, 2.0, 4.0, 6.0];
        let result = ema_from(&data, 2, 2);

        assert_eq!(result[..3], [None, None, None]);
        assert!((result[3].unwrap() - 3.0).abs() < 1e-10);
        // k = 2/3: (6 - 3) * 2/3 + 3 = 5
        assert!((result[4].unwrap() - 5.0).abs() < 1e-10);
    }
}
