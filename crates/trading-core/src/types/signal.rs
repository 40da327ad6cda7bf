//! Trading signals emitted by strategies.

use serde::{Deserialize, Serialize};

/// Recommended action for the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalType::Buy => write!(f, "BUY"),
            SignalType::Sell => write!(f, "SELL"),
            SignalType::Hold => write!(f, "HOLD"),
        }
    }
}

/// How convincing the triggering condition was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignalStrength {
    #[default]
    Weak,
    Moderate,
    Strong,
}

/// A strategy's recommendation for one symbol.
///
/// One signal is produced per evaluation; Buy and Sell describe only the
/// latest bar and carry no memory of earlier emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub signal_type: SignalType,
    pub strength: SignalStrength,
    /// Reference price (close of the latest bar, 0 when there is none)
    pub price: f64,
    /// Suggested quantity, 0 leaves sizing to the executor
    pub quantity: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    /// Unix timestamp in milliseconds of the bar that produced the signal
    pub timestamp: i64,
    pub reason: String,
    /// Name of the originating strategy
    pub strategy: String,
}

impl Signal {
    /// Hold signal with a diagnostic reason.
    pub fn hold(symbol: impl Into<String>, strategy: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            signal_type: SignalType::Hold,
            strength: SignalStrength::Weak,
            price: 0.0,
            quantity: 0.0,
            stop_loss: None,
            take_profit: None,
            timestamp: 0,
            reason: reason.into(),
            strategy: strategy.into(),
        }
    }

    /// Set the reference bar.
    pub fn at(mut self, price: f64, timestamp: i64) -> Self {
        self.price = price;
        self.timestamp = timestamp;
        self
    }

    /// Turn the signal into an actionable one.
    pub fn with_action(mut self, signal_type: SignalType, strength: SignalStrength) -> Self {
        self.signal_type = signal_type;
        self.strength = strength;
        self
    }

    /// Set the suggested quantity.
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Attach protective exit levels.
    pub fn with_exits(mut self, stop_loss: f64, take_profit: f64) -> Self {
        self.stop_loss = Some(stop_loss);
        self.take_profit = Some(take_profit);
        self
    }

    pub fn is_actionable(&self) -> bool {
        self.signal_type != SignalType::Hold
    }
}
