use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indc_config::DataFormat;
use indc_core::Candle;
use tracing::{debug, info};

/// Reads a chronological candle series from `path`.
///
/// CSV files need a `timestamp,open,high,low,close[,volume]` header with
/// RFC3339 timestamps; JSON files hold an array of candle objects.
pub fn read_candles(path: &Path, format: DataFormat) -> Result<Vec<Candle>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let candles = match format {
        DataFormat::Csv => read_csv(BufReader::new(file), path)?,
        DataFormat::Json => serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid candle JSON in {}", path.display()))?,
    };
    ensure_chronological(&candles, path)?;
    info!(path = %path.display(), rows = candles.len(), "loaded candles");
    Ok(candles)
}

fn read_csv<R: std::io::Read>(reader: R, path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut candles = Vec::new();
    for (idx, row) in reader.deserialize::<Candle>().enumerate() {
        let candle =
            row.with_context(|| format!("invalid row {} in {}", idx + 1, path.display()))?;
        candles.push(candle);
    }
    debug!(rows = candles.len(), "parsed csv rows");
    Ok(candles)
}

fn ensure_chronological(candles: &[Candle], path: &Path) -> Result<()> {
    if let Some(pair) = candles
        .windows(2)
        .find(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        bail!(
            "candles in {} are not chronological: {} follows {}",
            path.display(),
            pair[1].timestamp,
            pair[0].timestamp
        );
    }
    Ok(())
}
