use std::thread;

use chrono::{Duration, TimeZone, Utc};
use indc_core::Candle;
use indc_indicators::indicators::{
    Aroon, Cci, Dema, Ema, Hma, Macd, Roc, Rsi, Sma, Stoch, Trend, Wma,
};
use indc_indicators::{decode, AnyIndicator, Indicator, IndicatorError, IndicatorKind};
use rust_decimal::Decimal;
use serde_json::{json, Value};

fn sample(kind: IndicatorKind) -> AnyIndicator {
    match kind {
        IndicatorKind::Aroon => Aroon::new(Trend::Up, 5).unwrap().into(),
        IndicatorKind::Cci => Cci::new(Wma::new(6).unwrap()).unwrap().into(),
        IndicatorKind::Dema => Dema::new(3).unwrap().into(),
        IndicatorKind::Ema => Ema::new(4).unwrap().into(),
        IndicatorKind::Hma => Hma::with_length(9).unwrap().into(),
        IndicatorKind::Macd => Macd::new(Sma::new(3).unwrap(), Dema::new(2).unwrap())
            .unwrap()
            .into(),
        IndicatorKind::Roc => Roc::new(4).unwrap().into(),
        IndicatorKind::Rsi => Rsi::new(5).unwrap().into(),
        IndicatorKind::Sma => Sma::new(7).unwrap().into(),
        IndicatorKind::Stoch => Stoch::new(5).unwrap().into(),
        IndicatorKind::Wma => Wma::new(4).unwrap().into(),
    }
}

fn zero_length(kind: IndicatorKind) -> Result<AnyIndicator, IndicatorError> {
    Ok(match kind {
        IndicatorKind::Aroon => Aroon::new(Trend::Down, 0)?.into(),
        IndicatorKind::Cci => Cci::new(Sma::new(0)?)?.into(),
        IndicatorKind::Dema => Dema::new(0)?.into(),
        IndicatorKind::Ema => Ema::new(0)?.into(),
        IndicatorKind::Hma => Hma::with_length(0)?.into(),
        IndicatorKind::Macd => Macd::new(Sma::new(2)?, Ema::new(0)?)?.into(),
        IndicatorKind::Roc => Roc::new(0)?.into(),
        IndicatorKind::Rsi => Rsi::new(0)?.into(),
        IndicatorKind::Sma => Sma::new(0)?.into(),
        IndicatorKind::Stoch => Stoch::new(0)?.into(),
        IndicatorKind::Wma => Wma::new(0)?.into(),
    })
}

// Wavy but strictly positive candles so no formula divides by zero.
fn candles(count: usize) -> Vec<Candle> {
    let base = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid base timestamp");
    (0..count)
        .map(|idx| {
            let close = Decimal::from(100 + (idx % 7) as i64 * 3 + idx as i64);
            Candle::new(
                close - Decimal::ONE,
                close + Decimal::from(2),
                close - Decimal::from(2),
                close,
                base + Duration::minutes(idx as i64),
            )
        })
        .collect()
}

fn repeating_candles(values: &[Decimal], count: usize) -> Vec<Candle> {
    candles(count)
        .into_iter()
        .zip(values.iter().cycle())
        .map(|(candle, value)| Candle::new(*value, *value, *value, *value, candle.timestamp))
        .collect()
}

fn huge_length_record(kind: IndicatorKind) -> Value {
    let huge = i64::MAX;
    match kind {
        IndicatorKind::Aroon => json!({"name": "aroon", "trend": "down", "length": huge}),
        IndicatorKind::Cci => json!({"name": "cci", "source": {"name": "sma", "length": huge}}),
        IndicatorKind::Hma => json!({"name": "hma", "wma": {"name": "wma", "length": huge}}),
        IndicatorKind::Macd => json!({
            "name": "macd",
            "source1": {"name": "ema", "length": huge},
            "source2": {"name": "sma", "length": 3}
        }),
        other => json!({"name": other.as_str(), "length": huge}),
    }
}

fn closes(count: usize) -> Vec<Decimal> {
    candles(count).iter().map(|candle| candle.close).collect()
}

#[test]
fn zero_lengths_are_rejected_by_every_variant() {
    for kind in IndicatorKind::ALL {
        assert_eq!(
            zero_length(kind),
            Err(IndicatorError::InvalidLength),
            "{kind} accepted a zero length"
        );
    }
}

#[test]
fn short_input_is_rejected_by_every_variant() {
    for kind in IndicatorKind::ALL {
        let indicator = sample(kind);
        assert_eq!(indicator.validate(), Ok(()));
        let required = indicator.count();

        let short = candles(required - 1);
        assert_eq!(
            indicator.calc(&short),
            Err(IndicatorError::insufficient(required, required - 1)),
            "{kind} computed on too few candles"
        );
        assert!(indicator.calc::<Decimal>(&[]).is_err());
    }
}

#[test]
fn exact_window_is_enough_for_every_variant() {
    for kind in IndicatorKind::ALL {
        let indicator = sample(kind);
        let required = indicator.count();
        let exact = candles(required);
        let longer = candles(required + 10);
        assert!(indicator.calc(&exact).is_ok(), "{kind} failed on its own count");
        assert!(indicator.calc(&longer).is_ok(), "{kind} failed on extra history");
        assert!(indicator.calc(&closes(required)).is_ok(), "{kind} failed on closes");
    }
}

#[test]
fn macd_matches_independent_averages() {
    let macd = Macd::new(Sma::new(12).unwrap(), Sma::new(26).unwrap()).unwrap();
    let series: Vec<Decimal> = (1..=40).map(|idx| Decimal::from(idx * 2 + 5)).collect();

    let fast = Sma::new(12).unwrap().calc(&series[series.len() - 12..]).unwrap();
    let slow = Sma::new(26).unwrap().calc(&series[series.len() - 26..]).unwrap();
    assert_eq!(macd.count(), 26);
    assert_eq!(macd.calc(&series).unwrap(), fast - slow);
    // A linear series with slope 2 puts the midpoints 7 steps apart.
    assert_eq!(fast - slow, Decimal::from(14));
}

#[test]
fn aroon_trend_follows_the_latest_extreme() {
    let aroon = Aroon::new(Trend::Up, 10).unwrap();

    let mut rising: Vec<Decimal> = vec![Decimal::ONE];
    rising.extend((0..9).map(|idx| Decimal::from(50 + idx % 3)));
    rising.push(Decimal::from(100));
    assert_eq!(aroon.lines(&rising).unwrap().trend, Trend::Up);

    let falling: Vec<Decimal> = rising.iter().map(|value| Decimal::from(200) - *value).collect();
    let output = aroon.lines(&falling).unwrap();
    assert_eq!(output.trend, Trend::Down);
    assert_eq!(output.down, Decimal::ONE_HUNDRED);
}

#[test]
fn nested_errors_keep_their_kind() {
    let bad_length = json!({
        "name": "cci",
        "source": {
            "name": "macd",
            "source1": {"name": "ema", "length": 0},
            "source2": {"name": "sma", "length": 3}
        }
    });
    assert_eq!(decode(bad_length), Err(IndicatorError::InvalidLength));

    let bad_name = json!({"name": "hma", "wma": {"name": "wmaa", "length": 3}});
    assert_eq!(
        decode(bad_name),
        Err(IndicatorError::InvalidSourceName("wmaa".to_string()))
    );

    let macd = Macd::new(Sma::new(3).unwrap(), Sma::new(5).unwrap()).unwrap();
    assert_eq!(
        macd.calc(&closes(4)),
        Err(IndicatorError::insufficient(5, 4))
    );
}

#[test]
fn huge_lengths_are_rejected_or_reported_as_short_input() {
    let data = candles(8);
    for kind in IndicatorKind::ALL {
        match decode(huge_length_record(kind)) {
            Err(err) => assert_eq!(err, IndicatorError::InvalidLength, "{kind}"),
            Ok(indicator) => {
                let required = indicator.count();
                assert!(required > data.len(), "{kind} reported a tiny window");
                assert_eq!(
                    indicator.calc(&data),
                    Err(IndicatorError::insufficient(required, data.len())),
                    "{kind}"
                );
            }
        }
    }
    assert_eq!(
        decode(json!({"name": "dema", "length": i64::MAX})),
        Err(IndicatorError::InvalidLength)
    );
}

#[test]
fn extreme_prices_fail_without_panicking() {
    let big = Decimal::MAX / Decimal::from(2);
    let series: [&[Decimal]; 3] = [&[big], &[big, -big], &[Decimal::MAX, Decimal::MIN]];
    for values in series {
        for kind in IndicatorKind::ALL {
            let indicator = sample(kind);
            let data = repeating_candles(values, indicator.count());
            match indicator.calc(&data) {
                Ok(_)
                | Err(IndicatorError::Overflow(_))
                | Err(IndicatorError::DivisionByZero(_)) => {}
                Err(other) => panic!("{kind} failed with unexpected error {other}"),
            }
        }
    }
}

#[test]
fn shared_indicators_compute_from_many_threads() {
    let indicator = sample(IndicatorKind::Macd);
    let data = closes(64);
    let expected = indicator.calc(&data).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| indicator.calc(&data)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(expected));
        }
    });
}
