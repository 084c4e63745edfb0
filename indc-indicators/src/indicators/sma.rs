//! Simple Moving Average (SMA).

use rust_decimal::Decimal;

use crate::core::{
    checked_sum, decimal_from_usize, Indicator, IndicatorError, IndicatorResult, Input,
};
use crate::util::resize;

/// Arithmetic mean of the trailing `length` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sma {
    length: usize,
}

impl Sma {
    /// Creates a new SMA with the provided length.
    pub fn new(length: usize) -> IndicatorResult<Self> {
        let sma = Self { length };
        sma.validate()?;
        Ok(sma)
    }

    /// Returns the configured lookback length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Indicator for Sma {
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
        let sum = checked_sum(window.iter().map(Input::value), "sma")?;
        Ok(sum / decimal_from_usize(self.length))
    }
}
