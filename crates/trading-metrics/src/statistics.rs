//! Performance statistics.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trading_core::types::Position;

/// Profit factor reported when there are winning trades but no gross loss.
///
/// The ratio is unbounded in that case; a finite sentinel keeps the value
/// serializable and comparable.
pub const PROFIT_FACTOR_WITHOUT_LOSSES: f64 = 0.0;

/// Aggregate statistics over a replayed order history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Orders handed to the engine
    pub total_orders: usize,
    /// Filled orders that were replayed
    pub filled_orders: usize,
    /// Closed (realized) trades
    pub total_trades: usize,
    pub winning_trades: usize,
    /// Trades with zero or negative P&L
    pub losing_trades: usize,
    /// Fraction of winning trades, 0..=1
    pub win_rate: f64,
    pub total_pnl: Decimal,
    pub average_pnl: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    pub profit_factor: f64,
    /// Largest peak-to-trough decline of the equity curve, as a fraction
    pub max_drawdown: f64,
    /// Mean over sample standard deviation of realized P&L
    pub sharpe_ratio: f64,
    pub avg_hold_time_secs: f64,
    /// Average hold time, e.g. `1h30m0s`
    pub avg_hold_time: String,
    pub initial_balance: Decimal,
    pub final_equity: Decimal,
    pub total_return_pct: f64,
    /// Equity after each realized trade, starting with the initial balance
    pub equity_curve: Vec<Decimal>,
    /// Realized P&L of each closed trade, in order
    pub realized_pnl: Vec<Decimal>,
    /// Inventory still open after the replay, sorted by symbol
    pub open_positions: Vec<Position>,
}

impl PerformanceMetrics {
    /// Empty result for the given starting balance.
    pub fn empty(initial_balance: Decimal) -> Self {
        Self {
            avg_hold_time: "0s".to_string(),
            initial_balance,
            final_equity: initial_balance,
            equity_curve: vec![initial_balance],
            ..Default::default()
        }
    }

    pub fn has_trades(&self) -> bool {
        self.total_trades > 0
    }
}

pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// `gross_profit / gross_loss`, with the sentinel when nothing was lost.
pub(crate) fn profit_factor(gross_profit: Decimal, gross_loss: Decimal) -> f64 {
    if gross_loss > Decimal::ZERO {
        match gross_profit.checked_div(gross_loss) {
            Some(ratio) => to_f64(ratio),
            None => to_f64(gross_profit) / to_f64(gross_loss),
        }
    } else if gross_profit > Decimal::ZERO {
        PROFIT_FACTOR_WITHOUT_LOSSES
    } else {
        0.0
    }
}

/// Maximum `(peak - equity) / peak` along the curve.
pub(crate) fn max_drawdown(equity_curve: &[Decimal]) -> f64 {
    let mut peak = match equity_curve.first() {
        Some(first) => *first,
        None => return 0.0,
    };
    let mut max_dd = 0.0;

    for &equity in equity_curve {
        if equity > peak {
            peak = equity;
        }
        if peak > Decimal::ZERO {
            let drawdown = match peak.checked_sub(equity).and_then(|drop| drop.checked_div(peak)) {
                Some(dd) => to_f64(dd),
                None => (to_f64(peak) - to_f64(equity)) / to_f64(peak),
            };
            if drawdown > max_dd {
                max_dd = drawdown;
            }
        }
    }

    max_dd
}

/// Sample mean over sample standard deviation (n - 1) of realized P&L.
///
/// No risk-free rate and no annualization. Zero with fewer than two trades
/// or when every trade made the same amount.
pub(crate) fn sharpe_ratio(realized_pnl: &[Decimal]) -> f64 {
    if realized_pnl.len() < 2 {
        return 0.0;
    }

    let values: Vec<f64> = realized_pnl.iter().map(|&p| to_f64(p)).collect();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        0.0
    } else {
        mean / std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profit_factor() {
        assert_eq!(profit_factor(dec!(100), dec!(50)), 2.0);
        assert_eq!(profit_factor(dec!(100), Decimal::ZERO), PROFIT_FACTOR_WITHOUT_LOSSES);
        assert_eq!(profit_factor(Decimal::ZERO, Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_max_drawdown() {
        assert_eq!(max_drawdown(&[]), 0.0);
        assert_eq!(max_drawdown(&[dec!(1000), dec!(1100)]), 0.0);

        // Peak 1200, trough 900
        let dd = max_drawdown(&[dec!(1000), dec!(1200), dec!(1000), dec!(900), dec!(1300)]);
        assert!((dd - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        assert!(profit_factor(Decimal::MAX, dec!(0.0000001)) > 1e30);
        assert!((max_drawdown(&[Decimal::MAX, Decimal::MIN]) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_drawdown_ignores_non_positive_peak() {
        assert_eq!(max_drawdown(&[dec!(0), dec!(-10)]), 0.0);
    }

    #[test]
    fn test_sharpe_ratio() {
        assert_eq!(sharpe_ratio(&[dec!(100)]), 0.0);
        assert_eq!(sharpe_ratio(&[dec!(10), dec!(10), dec!(10)]), 0.0);

        // mean 25, sample std 75 * sqrt(2)
        let sharpe = sharpe_ratio(&[dec!(100), dec!(-50)]);
        assert!((sharpe - 25.0 / (75.0 * 2.0_f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = PerformanceMetrics::empty(dec!(1000));
        assert!(!metrics.has_trades());
        assert_eq!(metrics.final_equity, dec!(1000));
        assert_eq!(metrics.equity_curve, vec![dec!(1000)]);
        assert_eq!(metrics.avg_hold_time, "0s");
    }
}
