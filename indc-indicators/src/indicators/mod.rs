//! Built-in indicator implementations provided by the crate.

pub mod aroon;
pub mod cci;
pub mod dema;
pub mod ema;
pub mod hma;
pub mod macd;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stoch;
pub mod wma;

use rust_decimal::Decimal;

pub use aroon::{Aroon, AroonOutput, Trend};
pub use cci::Cci;
pub use dema::Dema;
pub use ema::Ema;
pub use hma::Hma;
pub use macd::Macd;
pub use roc::Roc;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stoch::Stoch;
pub use wma::Wma;

use crate::core::{Indicator, IndicatorResult, Input};
use crate::registry::IndicatorKind;

/// Any of the built-in indicators.
///
/// Composite variants own their sources as boxed `AnyIndicator` values, so
/// nesting depth is unbounded at the type level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyIndicator {
    /// Aroon up/down.
    Aroon(Aroon),
    /// Commodity Channel Index.
    Cci(Cci),
    /// Double exponential moving average.
    Dema(Dema),
    /// Exponential moving average.
    Ema(Ema),
    /// Hull moving average.
    Hma(Hma),
    /// Moving average convergence divergence.
    Macd(Macd),
    /// Rate of change.
    Roc(Roc),
    /// Relative strength index.
    Rsi(Rsi),
    /// Simple moving average.
    Sma(Sma),
    /// Stochastic oscillator.
    Stoch(Stoch),
    /// Weighted moving average.
    Wma(Wma),
}

impl AnyIndicator {
    /// Returns the registry entry describing this variant.
    pub fn kind(&self) -> IndicatorKind {
        match self {
            Self::Aroon(_) => IndicatorKind::Aroon,
            Self::Cci(_) => IndicatorKind::Cci,
            Self::Dema(_) => IndicatorKind::Dema,
            Self::Ema(_) => IndicatorKind::Ema,
            Self::Hma(_) => IndicatorKind::Hma,
            Self::Macd(_) => IndicatorKind::Macd,
            Self::Roc(_) => IndicatorKind::Roc,
            Self::Rsi(_) => IndicatorKind::Rsi,
            Self::Sma(_) => IndicatorKind::Sma,
            Self::Stoch(_) => IndicatorKind::Stoch,
            Self::Wma(_) => IndicatorKind::Wma,
        }
    }
}

impl Indicator for AnyIndicator {
    fn validate(&self) -> IndicatorResult<()> {
        match self {
            Self::Aroon(inner) => inner.validate(),
            Self::Cci(inner) => inner.validate(),
            Self::Dema(inner) => inner.validate(),
            Self::Ema(inner) => inner.validate(),
            Self::Hma(inner) => inner.validate(),
            Self::Macd(inner) => inner.validate(),
            Self::Roc(inner) => inner.validate(),
            Self::Rsi(inner) => inner.validate(),
            Self::Sma(inner) => inner.validate(),
            Self::Stoch(inner) => inner.validate(),
            Self::Wma(inner) => inner.validate(),
        }
    }

    fn count(&self) -> usize {
        match self {
            Self::Aroon(inner) => inner.count(),
            Self::Cci(inner) => inner.count(),
            Self::Dema(inner) => inner.count(),
            Self::Ema(inner) => inner.count(),
            Self::Hma(inner) => inner.count(),
            Self::Macd(inner) => inner.count(),
            Self::Roc(inner) => inner.count(),
            Self::Rsi(inner) => inner.count(),
            Self::Sma(inner) => inner.count(),
            Self::Stoch(inner) => inner.count(),
            Self::Wma(inner) => inner.count(),
        }
    }

    fn calc<I: Input>(&self, data: &[I]) -> IndicatorResult<Decimal> {
        match self {
            Self::Aroon(inner) => inner.calc(data),
            Self::Cci(inner) => inner.calc(data),
            Self::Dema(inner) => inner.calc(data),
            Self::Ema(inner) => inner.calc(data),
            Self::Hma(inner) => inner.calc(data),
            Self::Macd(inner) => inner.calc(data),
            Self::Roc(inner) => inner.calc(data),
            Self::Rsi(inner) => inner.calc(data),
            Self::Sma(inner) => inner.calc(data),
            Self::Stoch(inner) => inner.calc(data),
            Self::Wma(inner) => inner.calc(data),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for AnyIndicator {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_variant!(Aroon, Cci, Dema, Ema, Hma, Macd, Roc, Rsi, Sma, Stoch, Wma);
