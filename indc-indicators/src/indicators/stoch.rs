//! Stochastic oscillator (%K).

use rust_decimal::Decimal;

use crate::core::{
    checked_div, checked_mul, checked_sub, Indicator, IndicatorError, IndicatorResult, Input,
};
use crate::util::resize;

/// Position of the latest close within the trailing high/low range, in percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stoch {
    length: usize,
}

impl Stoch {
    /// Creates a new stochastic oscillator with the provided length.
    pub fn new(length: usize) -> IndicatorResult<Self> {
        let stoch = Self { length };
        stoch.validate()?;
        Ok(stoch)
    }

    /// Returns the configured lookback length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Indicator for Stoch {
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
        let close = window[window.len() - 1].value();
        let highest = window.iter().map(Input::high).fold(Decimal::MIN, Decimal::max);
        let lowest = window.iter().map(Input::low).fold(Decimal::MAX, Decimal::min);
        let position = checked_sub(close, lowest, "stoch")?;
        let range = checked_sub(highest, lowest, "stoch")?;
        checked_mul(checked_div(position, range, "stoch")?, Decimal::ONE_HUNDRED, "stoch")
    }
}
