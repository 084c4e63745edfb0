//! Hull Moving Average (HMA).

use rust_decimal::Decimal;

use crate::core::{checked_mul, checked_sub, Indicator, IndicatorError, IndicatorResult, Input};
use crate::indicators::wma::Wma;
use crate::util::{integer_sqrt, resize, trailing_series};

/// `WMA(2 * WMA(n / 2) - WMA(n))` taken over a `sqrt(n)` window.
///
/// The wrapped WMA supplies `n`. For `n = 1` the half-length average falls
/// back to a length of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hma {
    wma: Wma,
}

impl Hma {
    /// Creates a Hull moving average around the provided full-length WMA.
    pub fn new(wma: Wma) -> IndicatorResult<Self> {
        let hma = Self { wma };
        hma.validate()?;
        Ok(hma)
    }

    /// Shorthand for wrapping a WMA of the given length.
    pub fn with_length(length: usize) -> IndicatorResult<Self> {
        Self::new(Wma::new(length)?)
    }

    /// Returns the wrapped full-length WMA.
    pub fn wma(&self) -> &Wma {
        &self.wma
    }

    fn smoothing_length(&self) -> usize {
        integer_sqrt(self.wma.length())
    }

    fn window(&self) -> Option<usize> {
        self.wma.count().checked_add(self.smoothing_length())?.checked_sub(1)
    }
}

impl Indicator for Hma {
    fn validate(&self) -> IndicatorResult<()> {
        self.wma.validate()?;
        if self.window().is_none() {
            return Err(IndicatorError::InvalidLength);
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.window().unwrap_or(usize::MAX)
    }

    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal> {
        let window = resize(data, self.count())?;
        let half = Wma::new((self.wma.length() / 2).max(1))?;
        let smoothing = Wma::new(self.smoothing_length())?;
        let raw = trailing_series(window, smoothing.length(), |slice| {
            let doubled = checked_mul(Decimal::from(2), half.calc(slice)?, "hma")?;
            checked_sub(doubled, self.wma.calc(slice)?, "hma")
        })?;
        smoothing.calc(&raw)
    }
}
