use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indc_config::{load_config, AppConfig, IndicatorEntry};
use indc_indicators::{AnyIndicator, Indicator, IndicatorKind};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::data::read_candles;
use crate::telemetry::{init_tracing, with_bootstrap_logging};

#[derive(Parser, Debug)]
#[command(name = "indc", version, about = "Evaluate and normalize technical indicators")]
struct Cli {
    /// Directory holding default.toml and per-environment overrides
    #[arg(long, global = true, default_value = "config")]
    config_dir: PathBuf,
    /// Configuration environment to layer over default.toml
    #[arg(long, global = true, default_value = "default")]
    env: String,
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute indicators over a candle file
    Eval(EvalArgs),
    /// Decode an indicator record and print its canonical form
    Normalize(NormalizeArgs),
    /// List recognized indicator tags and their fields
    Kinds,
}

#[derive(Args, Debug)]
struct EvalArgs {
    /// Candle file (CSV or JSON); defaults to data.path from the configuration
    #[arg(long)]
    input: Option<PathBuf>,
    /// Indicator record as JSON; repeatable. Uses the configured indicators when omitted
    #[arg(long = "indicator", value_name = "JSON")]
    indicators: Vec<String>,
    /// Print results as a JSON array
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    /// Indicator record as JSON
    record: String,
    /// Pretty-print the canonical record
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Evaluation<'a> {
    label: &'a str,
    indicator: &'a AnyIndicator,
    count: usize,
    value: Decimal,
}

/// Parses the command line and runs the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = with_bootstrap_logging(cli.log_json, || load_config(&cli.config_dir, &cli.env))?;
    init_tracing(&config.log_level, cli.log_json)?;
    debug!(
        env = %cli.env,
        config_dir = %cli.config_dir.display(),
        indicators = config.indicators.len(),
        "starting"
    );

    match cli.command {
        Command::Eval(args) => eval(&config, args),
        Command::Normalize(args) => normalize(args),
        Command::Kinds => {
            kinds();
            Ok(())
        }
    }
}

fn eval(config: &AppConfig, args: EvalArgs) -> Result<()> {
    let entries = if args.indicators.is_empty() {
        config.indicators.clone()
    } else {
        parse_entries(&args.indicators)?
    };
    if entries.is_empty() {
        bail!("no indicators given; pass --indicator or configure [[indicators]]");
    }

    let path = args
        .input
        .or_else(|| config.data.path.clone())
        .ok_or_else(|| anyhow!("no input file; pass --input or set data.path"))?;
    let candles = read_candles(&path, config.data.resolved_format(&path))?;

    let mut results = Vec::with_capacity(entries.len());
    for entry in &entries {
        let count = entry.indicator.count();
        let value = entry
            .indicator
            .calc(&candles)
            .with_context(|| format!("failed to compute '{}'", entry.label))?;
        debug!(label = %entry.label, %value, "computed indicator");
        results.push(Evaluation {
            label: &entry.label,
            indicator: &entry.indicator,
            count,
            value,
        });
    }
    info!(indicators = results.len(), candles = candles.len(), "evaluation finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}\t{}", result.label, result.value);
        }
    }
    Ok(())
}

fn parse_entries(raw: &[String]) -> Result<Vec<IndicatorEntry>> {
    raw.iter()
        .map(|record| {
            let indicator = AnyIndicator::from_json(record)
                .with_context(|| format!("invalid indicator record {record}"))?;
            let label = indicator.to_json()?;
            Ok(IndicatorEntry { label, indicator })
        })
        .collect()
}

fn normalize(args: NormalizeArgs) -> Result<()> {
    let indicator = AnyIndicator::from_json(&args.record)
        .with_context(|| format!("invalid indicator record {}", args.record))?;
    let canonical = indc_indicators::encode(&indicator)?;
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&canonical)?);
    } else {
        println!("{canonical}");
    }
    Ok(())
}

fn kinds() {
    for kind in IndicatorKind::ALL {
        println!("{kind}\t{}", kind.fields().join(","));
    }
}
