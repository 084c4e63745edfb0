//! Weighted Moving Average (WMA).

use rust_decimal::Decimal;

use crate::core::{
    checked_add, checked_mul, decimal_from_usize, Indicator, IndicatorError, IndicatorResult,
    Input,
};
use crate::util::resize;

/// Linearly weighted mean; the newest value carries weight `length`, the oldest 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wma {
    length: usize,
}

impl Wma {
    /// Creates a new WMA with the provided length.
    pub fn new(length: usize) -> IndicatorResult<Self> {
        let wma = Self { length };
        wma.validate()?;
        Ok(wma)
    }

    /// Returns the configured lookback length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Indicator for Wma {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 {
            return Err(IndicatorError::InvalidLength);
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.length
    }

    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal> {
        let window = resize(data, self.count())?;
        let weighted = window
            .iter()
            .zip(1..)
            .try_fold(Decimal::ZERO, |acc, (item, weight)| {
                let term = checked_mul(item.value(), decimal_from_usize(weight), "wma")?;
                checked_add(acc, term, "wma")
            })?;
        let length = decimal_from_usize(self.length);
        let weights = checked_mul(length, length + Decimal::ONE, "wma")? / Decimal::from(2);
        Ok(weighted / weights)
    }
}
