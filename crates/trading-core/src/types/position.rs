//! Long-only position with weighted-average cost.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FillOverflow;

/// Remaining quantity at or below this is treated as flat.
pub const POSITION_EPSILON: Decimal = dec!(0.00000001);

/// Open inventory in a single symbol.
///
/// Quantity never goes negative: sells only reduce existing inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Symbol
    pub symbol: String,
    /// Weighted-average cost per unit
    pub avg_cost: Decimal,
    /// Open quantity
    pub quantity: Decimal,
    /// When the current position was opened
    pub opened_at: Option<DateTime<Utc>>,
}

/// The part of a sell fill that was matched against open inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedLot {
    pub symbol: String,
    /// Quantity realized (never more than what was open)
    pub quantity: Decimal,
    /// Average cost of the inventory sold
    pub entry_price: Decimal,
    /// Sell fill price
    pub exit_price: Decimal,
    /// Realized profit or loss
    pub pnl: Decimal,
    /// Time from position open to this sell
    pub holding_period: Duration,
}

impl Position {
    /// Create a flat position.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            avg_cost: Decimal::ZERO,
            quantity: Decimal::ZERO,
            opened_at: None,
        }
    }

    /// Check if the position holds no inventory.
    pub fn is_flat(&self) -> bool {
        self.quantity <= Decimal::ZERO
    }

    /// Apply a buy fill, blending its price into the average cost.
    ///
    /// The position is left unchanged when the fill overflows.
    pub fn apply_buy(
        &mut self,
        quantity: Decimal,
        price: Decimal,
        at: DateTime<Utc>,
    ) -> Result<(), FillOverflow> {
        let overflow = || FillOverflow { quantity, price };

        let new_quantity = self.quantity.checked_add(quantity).ok_or_else(overflow)?;
        let avg_cost = if new_quantity > Decimal::ZERO {
            let held = self.quantity.checked_mul(self.avg_cost).ok_or_else(overflow)?;
            let added = quantity.checked_mul(price).ok_or_else(overflow)?;
            held.checked_add(added)
                .and_then(|cost| cost.checked_div(new_quantity))
                .ok_or_else(overflow)?
        } else {
            Decimal::ZERO
        };

        self.avg_cost = avg_cost;
        self.quantity = new_quantity;
        if self.opened_at.is_none() && new_quantity > Decimal::ZERO {
            self.opened_at = Some(at);
        }
        Ok(())
    }

    /// Apply a sell fill against open inventory.
    ///
    /// Returns `None` when there is nothing to sell; the fill is then ignored.
    /// The position is left unchanged when the fill overflows.
    pub fn apply_sell(
        &mut self,
        quantity: Decimal,
        price: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Option<ClosedLot>, FillOverflow> {
        if self.is_flat() {
            return Ok(None);
        }

        let realized = quantity.min(self.quantity);
        let entry_price = self.avg_cost;
        let pnl = price
            .checked_sub(entry_price)
            .and_then(|diff| diff.checked_mul(realized))
            .ok_or(FillOverflow { quantity, price })?;
        let holding_period = self
            .opened_at
            .map(|opened| at - opened)
            .unwrap_or_else(Duration::zero);

        self.quantity -= realized;
        if self.quantity <= POSITION_EPSILON {
            self.quantity = Decimal::ZERO;
            self.avg_cost = Decimal::ZERO;
            self.opened_at = None;
        }

        Ok(Some(ClosedLot {
            symbol: self.symbol.clone(),
            quantity: realized,
            entry_price,
            exit_price: price,
            pnl,
            holding_period,
        }))
    }
}
