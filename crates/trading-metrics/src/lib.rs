//! Performance metrics engine.
//!
//! Replays filled orders in fill order, keeps one weighted-average-cost
//! position per symbol and derives trade statistics from the realized
//! profit and loss. Each call starts from scratch; nothing is cached.

mod duration;
mod engine;
mod report;
mod statistics;

pub use duration::format_duration;
pub use engine::compute_metrics;
pub use report::PerformanceReport;
pub use statistics::{PerformanceMetrics, PROFIT_FACTOR_WITHOUT_LOSSES};
