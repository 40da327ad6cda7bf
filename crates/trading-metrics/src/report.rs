//! Performance report generation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trading_core::types::Order;

use crate::{compute_metrics, PerformanceMetrics};

/// Metrics together with when they were produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub generated_at: DateTime<Utc>,
    pub metrics: PerformanceMetrics,
}

impl PerformanceReport {
    pub fn new(metrics: PerformanceMetrics) -> Self {
        Self {
            generated_at: Utc::now(),
            metrics,
        }
    }

    /// Compute metrics for `orders` and wrap them in a report.
    pub fn from_orders(orders: &[Order], initial_balance: Decimal) -> Self {
        Self::new(compute_metrics(orders, initial_balance))
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let m = &self.metrics;
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                   PERFORMANCE REPORT                       \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("ACCOUNT\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Initial Balance:     ${:.2}\n", m.initial_balance));
        s.push_str(&format!("  Final Equity:        ${:.2}\n", m.final_equity));
        s.push_str(&format!("  Total Return:        {:.2}%\n", m.total_return_pct));
        s.push_str(&format!("  Max Drawdown:        {:.2}%\n", m.max_drawdown * 100.0));
        s.push('\n');

        s.push_str("RISK METRICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Sharpe Ratio:        {:.2}\n", m.sharpe_ratio));
        s.push_str(&format!("  Profit Factor:       {:.2}\n", m.profit_factor));
        s.push('\n');

        s.push_str("TRADE STATISTICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Orders (filled):     {} ({})\n", m.total_orders, m.filled_orders));
        s.push_str(&format!("  Total Trades:        {}\n", m.total_trades));
        s.push_str(&format!("  Winning Trades:      {}\n", m.winning_trades));
        s.push_str(&format!("  Losing Trades:       {}\n", m.losing_trades));
        s.push_str(&format!("  Win Rate:            {:.2}%\n", m.win_rate * 100.0));
        s.push_str(&format!("  Total P&L:           ${:.2}\n", m.total_pnl));
        s.push_str(&format!("  Average P&L:         ${:.2}\n", m.average_pnl));
        s.push_str(&format!("  Best Trade:          ${:.2}\n", m.best_trade));
        s.push_str(&format!("  Worst Trade:         ${:.2}\n", m.worst_trade));
        s.push_str(&format!("  Avg Hold Time:       {}\n", m.avg_hold_time));
        s.push('\n');

        if !m.open_positions.is_empty() {
            s.push_str("OPEN POSITIONS\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for position in &m.open_positions {
                s.push_str(&format!(
                    "  {:<10} {:>12} @ ${:.2}\n",
                    position.symbol, position.quantity, position.avg_cost
                ));
            }
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
