use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn evaluates_ad_hoc_indicator_over_csv() -> Result<()> {
    let temp = tempdir()?;
    let input = write_candles(temp.path(), 10)?;

    let output = indc(temp.path())
        .arg("eval")
        .arg("--input")
        .arg(&input)
        .arg("--indicator")
        .arg(r#"{"name":"SMA","length":3}"#)
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout)?;
    let line = stdout.lines().next().expect("one result line");
    let (label, value) = line.split_once('\t').expect("tab separated");
    assert!(label.contains(r#""name":"sma""#));
    assert_eq!(value.parse::<Decimal>()?, Decimal::from(9));
    Ok(())
}

#[test]
fn evaluates_configured_indicators_as_json() -> Result<()> {
    let temp = tempdir()?;
    let input = write_candles(temp.path(), 40)?;
    fs::write(
        temp.path().join("default.toml"),
        format!(
            r#"
                log_level = "warn"

                [data]
                path = "{}"

                [[indicators]]
                label = "fast"
                indicator = {{ name = "sma", length = 5 }}

                [[indicators]]
                label = "trend"
                indicator = {{ name = "macd", source1 = {{ name = "sma", length = 12 }}, source2 = {{ name = "sma", length = 26 }} }}
            "#,
            input.display().to_string().replace('\\', "/")
        ),
    )?;

    let output = indc(temp.path()).args(["eval", "--json"]).output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let results: Value = serde_json::from_slice(&output.stdout)?;
    let results = results.as_array().expect("array of results");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["label"], "fast");
    assert_eq!(results[0]["count"], 5);
    assert_eq!(decimal(&results[0]["value"]), Decimal::from(38));
    assert_eq!(results[1]["label"], "trend");
    assert_eq!(results[1]["count"], 26);
    assert_eq!(results[1]["indicator"]["name"], "macd");
    // Closes rise by one per candle, so the window midpoints sit 7 apart.
    assert_eq!(decimal(&results[1]["value"]), Decimal::from(7));
    Ok(())
}

#[test]
fn reports_short_history() -> Result<()> {
    let temp = tempdir()?;
    let input = write_candles(temp.path(), 4)?;

    indc(temp.path())
        .arg("eval")
        .arg("--input")
        .arg(&input)
        .arg("--indicator")
        .arg(r#"{"name":"ema","length":3}"#)
        .assert()
        .failure();
    Ok(())
}

#[test]
fn normalizes_records() -> Result<()> {
    let temp = tempdir()?;
    let output = indc(temp.path())
        .arg("normalize")
        .arg(r#"{"name":" HMA ","wma":{"name":"WMA","length":9}}"#)
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let record: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(record["name"], "hma");
    assert_eq!(record["wma"]["name"], "wma");
    assert_eq!(record["wma"]["length"], 9);
    Ok(())
}

#[test]
fn rejects_unknown_tags() -> Result<()> {
    let temp = tempdir()?;
    indc(temp.path())
        .arg("normalize")
        .arg(r#"{"name":"vwap","length":3}"#)
        .assert()
        .failure();
    Ok(())
}

#[test]
fn lists_every_kind() -> Result<()> {
    let temp = tempdir()?;
    let output = indc(temp.path()).arg("kinds").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let tags: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split('\t').next())
        .collect();
    assert_eq!(tags.len(), 11);
    for tag in ["aroon", "cci", "dema", "ema", "hma", "macd", "roc", "rsi", "sma", "stoch", "wma"] {
        assert!(tags.contains(&tag), "missing {tag}");
    }
    Ok(())
}

#[test]
fn logs_configuration_loading() -> Result<()> {
    let temp = tempdir()?;
    fs::write(
        temp.path().join("default.toml"),
        r#"
            [[indicators]]
            label = "fast"
            indicator = { name = "sma", length = 5 }
        "#,
    )?;

    let output = indc(temp.path()).env("RUST_LOG", "info").arg("kinds").output()?;
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("configuration loaded"), "{stderr}");
    Ok(())
}

fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("decimal serialized as string")
        .parse()
        .expect("valid decimal")
}

fn indc(config_dir: &Path) -> Command {
    let binary = assert_cmd::cargo::cargo_bin!("indc");
    let mut cmd = Command::new(binary);
    cmd.env_remove("RUST_LOG").arg("--config-dir").arg(config_dir);
    cmd
}

// Closes run 1, 2, 3, ... so moving averages have exact integer results.
fn write_candles(dir: &Path, count: usize) -> Result<PathBuf> {
    let path = dir.join("candles.csv");
    let base = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid base timestamp");
    let mut body = String::from("timestamp,open,high,low,close,volume\n");
    for idx in 0..count {
        let close = idx as i64 + 1;
        let ts = (base + Duration::minutes(idx as i64)).to_rfc3339();
        body.push_str(&format!(
            "{ts},{close},{},{},{close},100\n",
            close + 1,
            close - 1
        ));
    }
    fs::write(&path, body)?;
    Ok(path)
}
