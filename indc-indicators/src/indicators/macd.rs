//! Moving Average Convergence Divergence indicator implementation.

use rust_decimal::Decimal;

use crate::core::{checked_sub, Indicator, IndicatorResult, Input};
use crate::indicators::AnyIndicator;
use crate::util::resize;

/// Difference between a fast and a slow source (`source1 - source2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macd {
    source1: Box<AnyIndicator>,
    source2: Box<AnyIndicator>,
}

impl Macd {
    /// Create a MACD from a fast and a slow moving average.
    pub fn new(
        source1: impl Into<AnyIndicator>,
        source2: impl Into<AnyIndicator>,
    ) -> IndicatorResult<Self> {
        let macd = Self {
            source1: Box::new(source1.into()),
            source2: Box::new(source2.into()),
        };
        macd.validate()?;
        Ok(macd)
    }

    /// Returns the fast source.
    pub fn source1(&self) -> &AnyIndicator {
        &self.source1
    }

    /// Returns the slow source.
    pub fn source2(&self) -> &AnyIndicator {
        &self.source2
    }
}

impl Indicator for Macd {
    fn validate(&self) -> IndicatorResult<()> {
        self.source1.validate()?;
        self.source2.validate()
    }

    fn count(&self) -> usize {
        self.source1.count().max(self.source2.count())
    }

    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal> {
        let window = resize(data, self.count())?;
        let fast = self.source1.calc(window)?;
        let slow = self.source2.calc(window)?;
        checked_sub(fast, slow, "macd")
    }
}
