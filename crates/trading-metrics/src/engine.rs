//! Order replay.

use std::collections::BTreeMap;

use chrono::Duration;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use trading_core::error::FillOverflow;
use trading_core::types::{ClosedLot, Order, Position, Side};

use crate::duration::format_duration;
use crate::statistics::{max_drawdown, profit_factor, sharpe_ratio, to_f64, PerformanceMetrics};

/// Running totals while replaying fills.
struct Replay {
    positions: BTreeMap<String, Position>,
    equity: Decimal,
    equity_curve: Vec<Decimal>,
    realized_pnl: Vec<Decimal>,
    total_pnl: Decimal,
    winning_trades: usize,
    losing_trades: usize,
    gross_profit: Decimal,
    gross_loss: Decimal,
    best_trade: Decimal,
    worst_trade: Decimal,
    total_hold: Duration,
}

impl Replay {
    fn new(initial_balance: Decimal) -> Self {
        Self {
            positions: BTreeMap::new(),
            equity: initial_balance,
            equity_curve: vec![initial_balance],
            realized_pnl: Vec::new(),
            total_pnl: Decimal::ZERO,
            winning_trades: 0,
            losing_trades: 0,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            best_trade: Decimal::ZERO,
            worst_trade: Decimal::ZERO,
            total_hold: Duration::zero(),
        }
    }

    fn apply(&mut self, order: &Order) {
        let position = self
            .positions
            .entry(order.symbol.clone())
            .or_insert_with(|| Position::new(order.symbol.clone()));

        let applied = match order.side {
            Side::Buy => position
                .apply_buy(order.quantity, order.avg_fill_price, order.fill_time())
                .map(|()| None),
            Side::Sell => position.apply_sell(
                order.quantity,
                order.avg_fill_price,
                order.fill_time(),
            ),
        };

        match applied {
            Ok(Some(lot)) => {
                if let Err(e) = self.record(lot) {
                    warn!(order_id = %order.id, error = %e, "skipping trade that overflows totals");
                }
            }
            Ok(None) if order.side == Side::Sell => debug!(
                order_id = %order.id,
                symbol = %order.symbol,
                "sell without open inventory ignored"
            ),
            Ok(None) => {}
            Err(e) => warn!(
                order_id = %order.id,
                symbol = %order.symbol,
                error = %e,
                "skipping fill that overflows"
            ),
        }
    }

    /// Fold a closed lot into the totals. Nothing is updated on overflow.
    fn record(&mut self, lot: ClosedLot) -> Result<(), FillOverflow> {
        let pnl = lot.pnl;
        let overflow = || FillOverflow {
            quantity: lot.quantity,
            price: lot.exit_price,
        };

        let equity = self.equity.checked_add(pnl).ok_or_else(overflow)?;
        let total_pnl = self.total_pnl.checked_add(pnl).ok_or_else(overflow)?;
        let (gross_profit, gross_loss) = if pnl > Decimal::ZERO {
            (self.gross_profit.checked_add(pnl).ok_or_else(overflow)?, self.gross_loss)
        } else {
            (self.gross_profit, self.gross_loss.checked_add(pnl.abs()).ok_or_else(overflow)?)
        };
        let total_hold = self
            .total_hold
            .checked_add(&lot.holding_period)
            .ok_or_else(overflow)?;

        if pnl > Decimal::ZERO {
            self.winning_trades += 1;
        } else {
            self.losing_trades += 1;
        }
        self.equity = equity;
        self.total_pnl = total_pnl;
        self.gross_profit = gross_profit;
        self.gross_loss = gross_loss;
        self.total_hold = total_hold;
        self.realized_pnl.push(pnl);
        self.equity_curve.push(equity);

        if pnl > self.best_trade {
            self.best_trade = pnl;
        }
        if pnl < self.worst_trade {
            self.worst_trade = pnl;
        }
        Ok(())
    }
}

/// Compute performance metrics from an order history.
///
/// Only `Filled` orders are replayed, in ascending fill time; orders with
/// the same fill time keep their input order. Sells are matched against
/// the open long inventory of their symbol and anything beyond it is
/// ignored. The input is never modified.
pub fn compute_metrics(orders: &[Order], initial_balance: Decimal) -> PerformanceMetrics {
    let mut filled: Vec<&Order> = orders
        .iter()
        .filter(|o| o.is_filled())
        .filter(|o| {
            if o.quantity <= Decimal::ZERO {
                warn!(
                    order_id = %o.id,
                    symbol = %o.symbol,
                    quantity = %o.quantity,
                    "skipping filled order with non-positive quantity"
                );
                false
            } else {
                true
            }
        })
        .collect();
    filled.sort_by_key(|o| o.fill_time());

    let mut replay = Replay::new(initial_balance);
    for order in &filled {
        replay.apply(order);
    }

    let mut metrics = PerformanceMetrics {
        total_orders: orders.len(),
        filled_orders: filled.len(),
        ..PerformanceMetrics::empty(initial_balance)
    };

    let closed = replay.realized_pnl.len();
    let total_pnl = replay.total_pnl;

    metrics.total_trades = closed;
    metrics.winning_trades = replay.winning_trades;
    metrics.losing_trades = replay.losing_trades;
    metrics.total_pnl = total_pnl;
    metrics.best_trade = replay.best_trade;
    metrics.worst_trade = replay.worst_trade;
    metrics.gross_profit = replay.gross_profit;
    metrics.gross_loss = replay.gross_loss;
    metrics.profit_factor = profit_factor(replay.gross_profit, replay.gross_loss);
    metrics.max_drawdown = max_drawdown(&replay.equity_curve);
    metrics.sharpe_ratio = sharpe_ratio(&replay.realized_pnl);
    metrics.final_equity = replay.equity;

    if closed > 0 {
        metrics.win_rate = replay.winning_trades as f64 / closed as f64;
        metrics.average_pnl = total_pnl / Decimal::from(closed);

        let avg_hold = average_duration(replay.total_hold, closed);
        metrics.avg_hold_time_secs = replay.total_hold.num_milliseconds() as f64 / 1000.0 / closed as f64;
        metrics.avg_hold_time = format_duration(avg_hold);
    }

    if initial_balance > Decimal::ZERO {
        metrics.total_return_pct = replay
            .equity
            .checked_sub(initial_balance)
            .and_then(|gain| gain.checked_div(initial_balance))
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map(to_f64)
            .unwrap_or_else(|| {
                (to_f64(replay.equity) - to_f64(initial_balance)) / to_f64(initial_balance) * 100.0
            });
    }

    metrics.equity_curve = replay.equity_curve;
    metrics.realized_pnl = replay.realized_pnl;
    metrics.open_positions = replay
        .positions
        .into_values()
        .filter(|p| !p.is_flat())
        .collect();

    debug!(
        orders = metrics.total_orders,
        filled = metrics.filled_orders,
        trades = metrics.total_trades,
        total_pnl = %metrics.total_pnl,
        "metrics computed"
    );

    metrics
}

fn average_duration(total: Duration, count: usize) -> Duration {
    match i32::try_from(count) {
        Ok(n) if n > 0 => total / n,
        _ => Duration::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use trading_core::types::OrderStatus;

    use crate::PROFIT_FACTOR_WITHOUT_LOSSES;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0).unwrap()
    }

    fn buy(qty: Decimal, price: Decimal, time: DateTime<Utc>) -> Order {
        Order::filled("AAPL", Side::Buy, qty, price, time)
    }

    fn sell(qty: Decimal, price: Decimal, time: DateTime<Utc>) -> Order {
        Order::filled("AAPL", Side::Sell, qty, price, time)
    }

    #[test]
    fn test_single_winning_round_trip() {
        let orders = vec![
            buy(dec!(10), dec!(100), at(10, 0)),
            sell(dec!(10), dec!(110), at(11, 30)),
        ];
        let m = compute_metrics(&orders, dec!(1000));

        assert_eq!(m.total_trades, 1);
        assert_eq!(m.winning_trades, 1);
        assert_eq!(m.losing_trades, 0);
        assert_eq!(m.total_pnl, dec!(100));
        assert_eq!(m.average_pnl, dec!(100));
        assert_eq!(m.best_trade, dec!(100));
        assert_eq!(m.worst_trade, Decimal::ZERO);
        assert_eq!(m.max_drawdown, 0.0);
        assert_eq!(m.win_rate, 1.0);
        assert_eq!(m.profit_factor, PROFIT_FACTOR_WITHOUT_LOSSES);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert_eq!(m.avg_hold_time, "1h30m0s");
        assert_eq!(m.avg_hold_time_secs, 5400.0);
        assert_eq!(m.final_equity, dec!(1100));
        assert_eq!(m.total_return_pct, 10.0);
        assert_eq!(m.equity_curve, vec![dec!(1000), dec!(1100)]);
        assert!(m.open_positions.is_empty());
    }

    #[test]
    fn test_win_and_loss() {
        let orders = vec![
            buy(dec!(10), dec!(100), at(10, 0)),
            sell(dec!(10), dec!(110), at(11, 0)),
            buy(dec!(5), dec!(200), at(12, 0)),
            sell(dec!(5), dec!(190), at(13, 0)),
        ];
        let m = compute_metrics(&orders, dec!(1000));

        assert_eq!(m.total_trades, 2);
        assert_eq!(m.winning_trades, 1);
        assert_eq!(m.losing_trades, 1);
        assert_eq!(m.win_rate, 0.5);
        assert_eq!(m.total_pnl, dec!(50));
        assert_eq!(m.profit_factor, 2.0);
        assert_eq!(m.gross_profit, dec!(100));
        assert_eq!(m.gross_loss, dec!(50));
        assert_eq!(m.worst_trade, dec!(-50));
        assert_eq!(m.realized_pnl, vec![dec!(100), dec!(-50)]);
        assert!((m.max_drawdown - 50.0 / 1100.0).abs() < 1e-12);
        assert!(m.sharpe_ratio > 0.0);
    }

    #[test]
    fn test_orders_replayed_in_fill_order() {
        // Sell listed first but filled after the buy
        let orders = vec![
            sell(dec!(10), dec!(110), at(11, 0)),
            buy(dec!(10), dec!(100), at(10, 0)),
        ];
        let m = compute_metrics(&orders, dec!(1000));
        assert_eq!(m.total_trades, 1);
        assert_eq!(m.total_pnl, dec!(100));
    }

    #[test]
    fn test_unfilled_orders_ignored() {
        let mut pending = buy(dec!(10), dec!(100), at(10, 0));
        pending.status = OrderStatus::Pending;
        let mut cancelled = sell(dec!(10), dec!(110), at(11, 0));
        cancelled.status = OrderStatus::Cancelled;

        let m = compute_metrics(&[pending, cancelled], dec!(1000));
        assert_eq!(m.total_orders, 2);
        assert_eq!(m.filled_orders, 0);
        assert_eq!(m.total_trades, 0);
        assert_eq!(m.win_rate, 0.0);
        assert_eq!(m.avg_hold_time, "0s");
        assert_eq!(m.final_equity, dec!(1000));
    }

    #[test]
    fn test_empty_input() {
        let m = compute_metrics(&[], dec!(1000));
        assert_eq!(m, PerformanceMetrics::empty(dec!(1000)));
    }

    #[test]
    fn test_sell_without_inventory_ignored() {
        let m = compute_metrics(&[sell(dec!(5), dec!(100), at(10, 0))], dec!(1000));
        assert_eq!(m.filled_orders, 1);
        assert_eq!(m.total_trades, 0);
    }

    #[test]
    fn test_non_positive_quantity_skipped() {
        let orders = vec![
            buy(dec!(10), dec!(100), at(10, 0)),
            sell(dec!(0), dec!(110), at(11, 0)),
        ];
        let m = compute_metrics(&orders, dec!(1000));
        assert_eq!(m.filled_orders, 1);
        assert_eq!(m.total_trades, 0);
        assert_eq!(m.open_positions.len(), 1);
        assert_eq!(m.open_positions[0].quantity, dec!(10));
    }

    #[test]
    fn test_weighted_average_cost_and_partial_close() {
        let orders = vec![
            buy(dec!(10), dec!(100), at(10, 0)),
            buy(dec!(10), dec!(120), at(10, 30)),
            sell(dec!(5), dec!(130), at(11, 0)),
        ];
        let m = compute_metrics(&orders, dec!(1000));

        // Average cost 110, 5 units realized at +20
        assert_eq!(m.total_pnl, dec!(100));
        assert_eq!(m.open_positions.len(), 1);
        assert_eq!(m.open_positions[0].quantity, dec!(15));
        assert_eq!(m.open_positions[0].avg_cost, dec!(110));
        // Held since the first buy
        assert_eq!(m.avg_hold_time, "1h0m0s");
    }

    #[test]
    fn test_open_positions_sorted_by_symbol() {
        let orders = vec![
            Order::filled("MSFT", Side::Buy, dec!(1), dec!(300), at(10, 0)),
            Order::filled("AAPL", Side::Buy, dec!(1), dec!(150), at(10, 5)),
        ];
        let m = compute_metrics(&orders, dec!(1000));
        let symbols: Vec<&str> = m.open_positions.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_idempotent_and_input_untouched() {
        let orders = vec![
            sell(dec!(10), dec!(110), at(11, 0)),
            buy(dec!(10), dec!(100), at(10, 0)),
            buy(dec!(5), dec!(200), at(12, 0)),
            sell(dec!(5), dec!(190), at(13, 0)),
        ];
        let snapshot = orders.clone();

        let first = compute_metrics(&orders, dec!(1000));
        let second = compute_metrics(&orders, dec!(1000));

        assert_eq!(first, second);
        assert_eq!(orders, snapshot);
    }

    #[test]
    fn test_overflowing_fill_is_skipped() {
        let orders = vec![
            Order::filled("X", Side::Buy, dec!(100000000000000), dec!(1000000000000000), at(9, 0)),
            buy(dec!(10), dec!(100), at(10, 0)),
            sell(dec!(10), dec!(110), at(11, 0)),
        ];
        let m = compute_metrics(&orders, dec!(1000));

        assert_eq!(m.filled_orders, 3);
        assert_eq!(m.total_trades, 1);
        assert_eq!(m.total_pnl, dec!(100));
        assert_eq!(m.final_equity, dec!(1100));
        assert!(m.open_positions.is_empty());
    }

    #[test]
    fn test_trade_overflowing_equity_is_skipped() {
        let orders = vec![
            buy(dec!(1), Decimal::ZERO, at(10, 0)),
            sell(dec!(1), Decimal::MAX, at(11, 0)),
        ];
        let m = compute_metrics(&orders, dec!(1000));

        assert_eq!(m.total_trades, 0);
        assert_eq!(m.final_equity, dec!(1000));
        assert_eq!(m.equity_curve, vec![dec!(1000)]);
    }
}
