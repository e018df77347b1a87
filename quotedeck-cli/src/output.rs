//! Serialisation of generated series for the charting consumer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;

use quotedeck_core::{EnrichedBar, MOVING_AVERAGE_PERIODS};
use quotedeck_indicators::Snapshot;

/// Output encodings supported by `quotedeck generate`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// One symbol's enriched series, in the order the caller asked for it.
#[derive(Clone, Debug, Serialize)]
pub struct SymbolSeries {
    pub symbol: String,
    pub bars: Vec<EnrichedBar>,
}

#[derive(Serialize)]
struct SymbolSnapshot<'a> {
    symbol: &'a str,
    #[serde(flatten)]
    snapshot: Snapshot,
}

/// Opens `path` for writing, or stdout when no path is given.
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

pub fn write_series<W: Write>(sink: W, format: OutputFormat, series: &[SymbolSeries]) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(sink, series),
        OutputFormat::Csv => write_csv(sink, series),
    }
}

fn write_json<W: Write>(mut sink: W, series: &[SymbolSeries]) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, series).context("failed to encode series as JSON")?;
    writeln!(sink)?;
    sink.flush()?;
    Ok(())
}

fn write_csv<W: Write>(sink: W, series: &[SymbolSeries]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(csv_header())?;
    for entry in series {
        for bar in &entry.bars {
            writer
                .write_record(csv_row(&entry.symbol, bar))
                .with_context(|| format!("failed to write CSV row for {}", entry.symbol))?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn csv_header() -> Vec<String> {
    let mut header: Vec<String> = ["symbol", "time", "open", "high", "low", "close", "volume"]
        .into_iter()
        .map(String::from)
        .collect();
    header.extend(MOVING_AVERAGE_PERIODS.iter().map(|period| format!("ma{period}")));
    header.extend(["macd", "macdSignal", "macdHist", "rsi"].map(String::from));
    header
}

fn csv_row(symbol: &str, bar: &EnrichedBar) -> Vec<String> {
    let mut row = vec![
        symbol.to_string(),
        bar.bar.time.to_string(),
        decimal_cell(bar.bar.open),
        decimal_cell(bar.bar.high),
        decimal_cell(bar.bar.low),
        decimal_cell(bar.bar.close),
        bar.bar.volume.to_string(),
    ];
    row.extend(
        MOVING_AVERAGE_PERIODS
            .iter()
            .map(|period| bar.moving_average(*period).map(decimal_cell).unwrap_or_default()),
    );
    row.extend([bar.macd, bar.macd_signal, bar.macd_hist, bar.rsi].map(decimal_cell));
    row
}

fn decimal_cell(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Writes one line per symbol, or a JSON array when `json` is set.
pub fn write_summary<W: Write>(mut sink: W, series: &[SymbolSeries], json: bool) -> Result<()> {
    if json {
        let snapshots: Vec<SymbolSnapshot<'_>> = series
            .iter()
            .filter_map(|entry| {
                Snapshot::from_series(&entry.bars).map(|snapshot| SymbolSnapshot {
                    symbol: &entry.symbol,
                    snapshot,
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut sink, &snapshots)
            .context("failed to encode summary as JSON")?;
        writeln!(sink)?;
    } else {
        for entry in series {
            match Snapshot::from_series(&entry.bars) {
                Some(snapshot) => writeln!(sink, "{:<6} {snapshot}", entry.symbol)?,
                None => writeln!(sink, "{:<6} no bars", entry.symbol)?,
            }
        }
    }
    sink.flush()?;
    Ok(())
}
