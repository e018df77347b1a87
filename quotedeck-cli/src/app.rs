use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use futures::future::try_join_all;
use tracing::{debug, info};

use quotedeck_config::{load_config, AppConfig};
use quotedeck_data::{today, BarGenerator, EntropyRandom, SeedTable, SeededRandom};
use quotedeck_indicators::{EngineParams, EnrichmentState};

use crate::output::{open_sink, write_series, write_summary, OutputFormat, SymbolSeries};
use crate::telemetry::init_tracing;

#[derive(Parser)]
#[command(
    name = "quotedeck",
    author,
    version,
    about = "Synthetic quotes and technical indicators for the Quotedeck dashboard"
)]
pub struct Cli {
    /// Configuration environment layered over config/default.toml
    #[arg(long, global = true)]
    env: Option<String>,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate enriched daily bars for one or more symbols
    Generate(GenerateArgs),
    /// Print the latest close, RSI zone and MACD bias per symbol
    Summary(SummaryArgs),
}

#[derive(Args, Clone, Debug)]
pub struct SeriesArgs {
    /// Symbol to generate (repeatable)
    #[arg(short, long = "symbol", required = true)]
    symbols: Vec<String>,
    /// Number of daily bars (defaults to [generator].days)
    #[arg(long)]
    days: Option<usize>,
    /// Seed for a reproducible series (defaults to [generator].seed)
    #[arg(long)]
    seed: Option<u64>,
    /// Day after the last generated bar, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    series: SeriesArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    series: SeriesArgs,
    /// Emit the summaries as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.env.as_deref())?;
    let _guard = init_tracing(&config.log, cli.verbose)?;

    match cli.command {
        Commands::Generate(args) => {
            let series = load_series(&config, &args.series).await?;
            let sink = open_sink(args.output.as_deref())?;
            write_series(sink, args.format, &series)?;
            if let Some(path) = &args.output {
                info!(path = %path.display(), symbols = series.len(), "series written");
            }
        }
        Commands::Summary(args) => {
            let series = load_series(&config, &args.series).await?;
            write_summary(open_sink(None)?, &series, args.json)?;
        }
    }
    Ok(())
}

fn build_generator(config: &AppConfig) -> Result<BarGenerator> {
    let params = EngineParams {
        macd_fast: config.indicators.macd_fast,
        macd_slow: config.indicators.macd_slow,
        macd_signal: config.indicators.macd_signal,
        rsi_period: config.indicators.rsi_period,
    };
    EnrichmentState::new(&params).context("invalid [indicators] configuration")?;
    let seeds = SeedTable::builtin().with_overrides(&config.seeds);
    debug!(overrides = config.seeds.len(), ?params, "generator configured");
    Ok(BarGenerator::new(seeds).with_params(params))
}

/// Generates every requested symbol on the blocking pool and returns the
/// series in request order.
async fn load_series(config: &AppConfig, args: &SeriesArgs) -> Result<Vec<SymbolSeries>> {
    let generator = Arc::new(build_generator(config)?);
    let days = args.days.unwrap_or(config.generator.days);
    let seed = args.seed.or(config.generator.seed);
    let end = args.end.unwrap_or_else(today);
    info!(symbols = args.symbols.len(), days, %end, seeded = seed.is_some(), "generating series");

    let tasks = args.symbols.iter().cloned().map(|symbol| {
        let generator = Arc::clone(&generator);
        tokio::task::spawn_blocking(move || -> Result<SymbolSeries> {
            let bars = match seed {
                Some(seed) => {
                    let mut rng = SeededRandom::new(symbol_seed(seed, &symbol));
                    generator.generate_enriched(&symbol, days, end, &mut rng)
                }
                None => generator.generate_enriched(&symbol, days, end, &mut EntropyRandom::default()),
            }
            .with_context(|| format!("failed to generate bars for {symbol}"))?;
            debug!(symbol = %symbol, bars = bars.len(), "series ready");
            Ok(SymbolSeries { symbol, bars })
        })
    });

    try_join_all(tasks)
        .await
        .context("generation task aborted")?
        .into_iter()
        .collect()
}

/// Derives a per-symbol seed so each symbol walks independently yet
/// reproducibly, regardless of its position on the command line.
fn symbol_seed(seed: u64, symbol: &str) -> u64 {
    symbol
        .trim()
        .to_ascii_uppercase()
        .bytes()
        .fold(seed ^ 0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
}
