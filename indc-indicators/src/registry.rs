//! Closed table of recognized indicator type tags.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::core::IndicatorError;
use crate::tag::CiString;

/// Identifies one of the built-in indicator variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorKind {
    /// `aroon`
    Aroon,
    /// `cci`
    Cci,
    /// `dema`
    Dema,
    /// `ema`
    Ema,
    /// `hma`
    Hma,
    /// `macd`
    Macd,
    /// `roc`
    Roc,
    /// `rsi`
    Rsi,
    /// `sma`
    Sma,
    /// `stoch`
    Stoch,
    /// `wma`
    Wma,
}

impl IndicatorKind {
    /// Every recognized kind, in tag order.
    pub const ALL: [IndicatorKind; 11] = [
        Self::Aroon,
        Self::Cci,
        Self::Dema,
        Self::Ema,
        Self::Hma,
        Self::Macd,
        Self::Roc,
        Self::Rsi,
        Self::Sma,
        Self::Stoch,
        Self::Wma,
    ];

    /// Canonical lowercase tag written to the `name` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aroon => "aroon",
            Self::Cci => "cci",
            Self::Dema => "dema",
            Self::Ema => "ema",
            Self::Hma => "hma",
            Self::Macd => "macd",
            Self::Roc => "roc",
            Self::Rsi => "rsi",
            Self::Sma => "sma",
            Self::Stoch => "stoch",
            Self::Wma => "wma",
        }
    }

    /// Record fields required beyond `name`.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Aroon => &["trend", "length"],
            Self::Cci => &["source"],
            Self::Hma => &["wma"],
            Self::Macd => &["source1", "source2"],
            Self::Dema | Self::Ema | Self::Roc | Self::Rsi | Self::Sma | Self::Stoch | Self::Wma => {
                &["length"]
            }
        }
    }

    /// Whether records of this kind embed nested indicator records.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Cci | Self::Hma | Self::Macd)
    }

    /// Resolves a normalized tag, failing with `InvalidSourceName` when unknown.
    pub fn from_tag(tag: &CiString) -> Result<Self, IndicatorError> {
        Self::ALL
            .into_iter()
            .find(|kind| tag == kind.as_str())
            .ok_or_else(|| IndicatorError::InvalidSourceName(tag.to_string()))
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(&CiString::new(s))
    }
}

impl Serialize for IndicatorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
