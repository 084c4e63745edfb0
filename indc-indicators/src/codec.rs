//! Tagged record encoding for indicators.
//!
//! Every indicator maps to a JSON-shaped record carrying a `name` tag plus the
//! variant's own fields. Composite variants embed their sources as complete
//! nested records. Decoding reads the tag first and then re-reads the whole
//! record as the matching variant.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::core::{IndicatorError, IndicatorResult};
use crate::indicators::{
    AnyIndicator, Aroon, Cci, Dema, Ema, Hma, Macd, Roc, Rsi, Sma, Stoch, Trend, Wma,
};
use crate::registry::IndicatorKind;
use crate::tag::CiString;

#[derive(Deserialize)]
struct TagProbe {
    name: CiString,
}

#[derive(Serialize, Deserialize)]
struct LengthRecord {
    name: CiString,
    length: i64,
}

#[derive(Serialize, Deserialize)]
struct AroonRecord {
    name: CiString,
    trend: CiString,
    length: i64,
}

#[derive(Serialize, Deserialize)]
struct CciRecord {
    name: CiString,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct HmaRecord {
    name: CiString,
    #[serde(skip_serializing_if = "Option::is_none")]
    wma: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct MacdRecord {
    name: CiString,
    #[serde(skip_serializing_if = "Option::is_none")]
    source1: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source2: Option<Value>,
}

/// Encodes `indicator` into its tagged record, recursing into sources.
pub fn encode(indicator: &AnyIndicator) -> IndicatorResult<Value> {
    let name = CiString::new(indicator.kind().as_str());
    let value = match indicator {
        AnyIndicator::Aroon(aroon) => serde_json::to_value(AroonRecord {
            name,
            trend: aroon.trend().into(),
            length: wire_length(aroon.length())?,
        })?,
        AnyIndicator::Cci(cci) => serde_json::to_value(CciRecord {
            name,
            source: Some(encode(cci.source())?),
        })?,
        AnyIndicator::Dema(dema) => length_record(name, dema.length())?,
        AnyIndicator::Ema(ema) => length_record(name, ema.length())?,
        AnyIndicator::Hma(hma) => serde_json::to_value(HmaRecord {
            name,
            wma: Some(encode(&AnyIndicator::Wma(hma.wma().clone()))?),
        })?,
        AnyIndicator::Macd(macd) => serde_json::to_value(MacdRecord {
            name,
            source1: Some(encode(macd.source1())?),
            source2: Some(encode(macd.source2())?),
        })?,
        AnyIndicator::Roc(roc) => length_record(name, roc.length())?,
        AnyIndicator::Rsi(rsi) => length_record(name, rsi.length())?,
        AnyIndicator::Sma(sma) => length_record(name, sma.length())?,
        AnyIndicator::Stoch(stoch) => length_record(name, stoch.length())?,
        AnyIndicator::Wma(wma) => length_record(name, wma.length())?,
    };
    Ok(value)
}

/// Decodes a tagged record, dispatching on its normalized `name` field.
pub fn decode(value: Value) -> IndicatorResult<AnyIndicator> {
    let probe = TagProbe::deserialize(&value)?;
    let kind = IndicatorKind::from_tag(&probe.name)?;
    trace!(%kind, "decoding indicator record");

    let indicator: AnyIndicator = match kind {
        IndicatorKind::Aroon => {
            let record: AroonRecord = serde_json::from_value(value)?;
            let trend = Trend::try_from(&record.trend)?;
            Aroon::new(trend, native_length(record.length)?)?.into()
        }
        IndicatorKind::Cci => {
            let record: CciRecord = serde_json::from_value(value)?;
            Cci::new(decode_source(record.source)?)?.into()
        }
        IndicatorKind::Dema => Dema::new(decode_length(value)?)?.into(),
        IndicatorKind::Ema => Ema::new(decode_length(value)?)?.into(),
        IndicatorKind::Hma => {
            let record: HmaRecord = serde_json::from_value(value)?;
            match decode_source(record.wma)? {
                AnyIndicator::Wma(wma) => Hma::new(wma)?.into(),
                other => {
                    return Err(IndicatorError::InvalidType(format!(
                        "hma expects a wma source, got {}",
                        other.kind()
                    )))
                }
            }
        }
        IndicatorKind::Macd => {
            let record: MacdRecord = serde_json::from_value(value)?;
            Macd::new(decode_source(record.source1)?, decode_source(record.source2)?)?.into()
        }
        IndicatorKind::Roc => Roc::new(decode_length(value)?)?.into(),
        IndicatorKind::Rsi => Rsi::new(decode_length(value)?)?.into(),
        IndicatorKind::Sma => Sma::new(decode_length(value)?)?.into(),
        IndicatorKind::Stoch => Stoch::new(decode_length(value)?)?.into(),
        IndicatorKind::Wma => Wma::new(decode_length(value)?)?.into(),
    };
    Ok(indicator)
}

fn decode_source(raw: Option<Value>) -> IndicatorResult<AnyIndicator> {
    decode(raw.ok_or(IndicatorError::SourceNotSet)?)
}

fn decode_length(value: Value) -> IndicatorResult<usize> {
    let record: LengthRecord = serde_json::from_value(value)?;
    native_length(record.length)
}

fn length_record(name: CiString, length: usize) -> IndicatorResult<Value> {
    Ok(serde_json::to_value(LengthRecord {
        name,
        length: wire_length(length)?,
    })?)
}

fn native_length(length: i64) -> IndicatorResult<usize> {
    usize::try_from(length)
        .ok()
        .filter(|length| *length >= 1)
        .ok_or(IndicatorError::InvalidLength)
}

fn wire_length(length: usize) -> IndicatorResult<i64> {
    i64::try_from(length).map_err(|_| IndicatorError::InvalidLength)
}

impl AnyIndicator {
    /// Serializes the indicator into its JSON record.
    pub fn to_json(&self) -> IndicatorResult<String> {
        Ok(serde_json::to_string(&encode(self)?)?)
    }

    /// Parses an indicator from its JSON record.
    pub fn from_json(raw: &str) -> IndicatorResult<Self> {
        decode(serde_json::from_str(raw)?)
    }
}

impl Serialize for AnyIndicator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode(self).map_err(S::Error::custom)?.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnyIndicator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decode(value).map_err(D::Error::custom)
    }
}
