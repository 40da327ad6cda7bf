//! Order types consumed by the performance metrics engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created but not yet submitted
    Pending,
    /// Order submitted for execution
    Submitted,
    /// Order completely filled
    Filled,
    /// Order partially filled
    PartiallyFilled,
    /// Order cancelled
    Cancelled,
    /// Order rejected
    Rejected,
}

/// An order as recorded by the execution layer.
///
/// The metrics engine only reads orders; it never changes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID
    pub id: Uuid,
    /// Symbol traded
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Current status
    pub status: OrderStatus,
    /// Filled (or requested, while unfilled) quantity
    pub quantity: Decimal,
    /// Average fill price
    #[serde(default)]
    pub avg_fill_price: Decimal,
    /// When the order was created
    pub created_at: DateTime<Utc>,
    /// When the order was last updated
    pub updated_at: DateTime<Utc>,
    /// When the order was filled
    #[serde(default)]
    pub filled_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Create a new pending order.
    pub fn new(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            side,
            status: OrderStatus::Pending,
            quantity,
            avg_fill_price: Decimal::ZERO,
            created_at: now,
            updated_at: now,
            filled_at: None,
        }
    }

    /// Create an order that was completely filled at `price` at time `at`.
    pub fn filled(
        symbol: impl Into<String>,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            side,
            status: OrderStatus::Filled,
            quantity,
            avg_fill_price: price,
            created_at: at,
            updated_at: at,
            filled_at: Some(at),
        }
    }

    /// Check if the order is completely filled.
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }

    /// Time the fill happened, falling back to the last update.
    pub fn fill_time(&self) -> DateTime<Utc> {
        self.filled_at.unwrap_or(self.updated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::new("AAPL", Side::Buy, dec!(100));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.is_filled());
        assert!(order.filled_at.is_none());
    }

    #[test]
    fn test_filled_order() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let order = Order::filled("AAPL", Side::Sell, dec!(10), dec!(110), at);

        assert!(order.is_filled());
        assert_eq!(order.fill_time(), at);
        assert_eq!(order.avg_fill_price, dec!(110));
    }

    #[test]
    fn test_fill_time_falls_back_to_updated_at() {
        let mut order = Order::new("AAPL", Side::Buy, dec!(1));
        order.status = OrderStatus::Filled;
        assert_eq!(order.fill_time(), order.updated_at);
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&OrderStatus::PartiallyFilled).unwrap();
        assert_eq!(json, "\"partially_filled\"");
        let side: Side = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(side, Side::Sell);
    }
}
