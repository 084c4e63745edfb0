//! Market data types shared across the indc workspace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single OHLCV bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    #[serde(default)]
    pub volume: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    /// Builds a candle stamped with the provided time and zero volume.
    pub fn new(
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume: Decimal::ZERO,
            timestamp,
        }
    }

    /// Attaches a traded volume to the candle.
    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume = volume;
        self
    }

    /// Distance between the high and the low of the bar.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}
