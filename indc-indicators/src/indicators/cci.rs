//! Commodity Channel Index (CCI).

use rust_decimal::Decimal;

use crate::core::{checked_div, checked_mul, checked_sub, Indicator, IndicatorResult, Input};
use crate::indicators::AnyIndicator;
use crate::util::{mean_deviation, resize, typical_price};

/// `(tp - MA(tp)) / (0.015 * meanDeviation(tp))` over typical prices.
///
/// The moving-average term comes from the nested source, which also decides
/// the window length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cci {
    source: Box<AnyIndicator>,
}

impl Cci {
    /// Creates a CCI that averages typical prices with `source`.
    pub fn new(source: impl Into<AnyIndicator>) -> IndicatorResult<Self> {
        let cci = Self {
            source: Box::new(source.into()),
        };
        cci.validate()?;
        Ok(cci)
    }

    /// Returns the moving-average source.
    pub fn source(&self) -> &AnyIndicator {
        &self.source
    }

    fn constant() -> Decimal {
        Decimal::new(15, 3)
    }
}

impl Indicator for Cci {
    fn validate(&self) -> IndicatorResult<()> {
        self.source.validate()
    }

    fn count(&self) -> usize {
        self.source.count()
    }

    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal> {
        let window = resize(data, self.count())?;
        let prices = typical_price(window)?;
        let average = self.source.calc(&prices)?;
        let deviation = mean_deviation(&prices)?;
        let latest = prices[prices.len() - 1];
        let distance = checked_sub(latest, average, "cci")?;
        let scale = checked_mul(Self::constant(), deviation, "cci")?;
        checked_div(distance, scale, "cci")
    }
}
