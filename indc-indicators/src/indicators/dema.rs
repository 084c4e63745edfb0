//! Double Exponential Moving Average (DEMA).

use rust_decimal::Decimal;

use crate::core::{checked_mul, checked_sub, Indicator, IndicatorError, IndicatorResult, Input};
use crate::indicators::ema::Ema;
use crate::util::{resize, trailing_series};

/// `2 * EMA - EMA(EMA)`, trading some smoothness for less lag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dema {
    length: usize,
}

impl Dema {
    /// Creates a new DEMA with the provided length.
    pub fn new(length: usize) -> IndicatorResult<Self> {
        let dema = Self { length };
        dema.validate()?;
        Ok(dema)
    }

    /// Returns the configured lookback length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Dema {
    fn window(&self) -> Option<usize> {
        self.length.checked_mul(4)?.checked_sub(3)
    }
}

impl Indicator for Dema {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 || self.window().is_none() {
            return Err(IndicatorError::InvalidLength);
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.window().unwrap_or(usize::MAX)
    }

    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal> {
        let window = resize(data, self.count())?;
        let ema = Ema::new(self.length)?;
        let first_pass = trailing_series(window, ema.count(), |slice| ema.calc(slice))?;
        let second_pass = ema.calc(&first_pass)?;
        let latest = first_pass
            .last()
            .copied()
            .ok_or_else(|| IndicatorError::insufficient(1, 0))?;
        let doubled = checked_mul(Decimal::from(2), latest, "dema")?;
        checked_sub(doubled, second_pass, "dema")
    }
}
