//! Rate of Change (ROC).

use rust_decimal::Decimal;

use crate::core::{
    checked_div, checked_mul, checked_sub, Indicator, IndicatorError, IndicatorResult, Input,
};
use crate::util::resize;

/// Percentage change between the latest value and the one `length` periods earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roc {
    length: usize,
}

impl Roc {
    /// Creates a new ROC with the provided length.
    pub fn new(length: usize) -> IndicatorResult<Self> {
        let roc = Self { length };
        roc.validate()?;
        Ok(roc)
    }

    /// Returns the configured lookback length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Indicator for Roc {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 || self.length == usize::MAX {
            return Err(IndicatorError::InvalidLength);
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.length.saturating_add(1)
    }

    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal> {
        let window = resize(data, self.count())?;
        let past = window[0].value();
        let current = window[window.len() - 1].value();
        let change = checked_sub(current, past, "roc")?;
        checked_mul(checked_div(change, past, "roc")?, Decimal::ONE_HUNDRED, "roc")
    }
}
