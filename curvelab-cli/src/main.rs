//! CurveLab CLI — bronze ingest and backtest run commands.
//!
//! Commands:
//! - `ingest` — convert bronze OHLCV CSV files into the silver Parquet tree
//! - `run` — run a constant-weight backtest from flags or a TOML run spec

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use curvelab_core::data::{
    ingest_ohlcv_csv, load_bars, synthetic_price_matrix, to_price_matrix, IngestSpec,
};
use curvelab_core::engine::{run_backtest, BacktestConfig, FillMethod, NanPolicy};
use curvelab_core::strategies::{ConstantWeight, Strategy};

#[derive(Parser)]
#[command(
    name = "curvelab",
    about = "CurveLab CLI — vectorized portfolio backtesting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest bronze OHLCV CSV files into the silver Parquet tree.
    Ingest {
        /// Directory holding bronze CSVs named
        /// {spot|perp}_ohlcv_1d__<source>__<SYMBOL>.csv.
        #[arg(long, default_value = "data/bronze")]
        bronze_dir: PathBuf,

        /// Root of the silver partition tree.
        #[arg(long, default_value = "data/silver/bars")]
        silver_root: PathBuf,

        /// Quote currency recorded in the partition spec.
        #[arg(long, default_value = "USD")]
        quote_ccy: String,
    },
    /// Run a constant-weight backtest over silver bars.
    Run {
        /// Path to a TOML run spec (mutually exclusive with --silver/--symbol).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Silver Parquet file(s) to load bars from.
        #[arg(long)]
        silver: Vec<PathBuf>,

        /// Symbol to hold at the constant weight.
        #[arg(long)]
        symbol: Option<String>,

        /// Constant target weight (signed fraction of equity).
        #[arg(long, default_value_t = 1.0)]
        weight: f64,

        /// Bar field used as the price.
        #[arg(long, default_value = "close")]
        field: String,

        /// Starting equity.
        #[arg(long, default_value_t = 100.0)]
        initial_equity: f64,

        /// Periods to lag weights (0 accepts look-ahead).
        #[arg(long, default_value_t = 1)]
        weight_lag: usize,

        /// Missing-data policy: drop, fill, or raise.
        #[arg(long, default_value = "drop")]
        nan_policy: String,

        /// Price fill direction under the fill policy: ffill or bfill.
        #[arg(long, default_value = "ffill")]
        price_fill_method: String,

        /// Gross leverage ceiling (violations abort the run).
        #[arg(long)]
        max_gross_leverage: Option<f64>,

        /// Use seeded synthetic bars instead of silver files.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Write the result frame to this CSV path.
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

/// Serializable run spec for `run --config`. Its blake3 hash is the
/// run id: identical specs always name the identical run.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RunSpec {
    silver: Vec<PathBuf>,
    symbol: String,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default = "default_field")]
    field: String,
    #[serde(default)]
    engine: BacktestConfig,
}

fn default_weight() -> f64 {
    1.0
}

fn default_field() -> String {
    "close".into()
}

impl RunSpec {
    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading run spec {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing run spec {}", path.display()))
    }

    fn run_id(&self) -> Result<String> {
        let json = serde_json::to_string(self).context("serializing run spec")?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            bronze_dir,
            silver_root,
            quote_ccy,
        } => run_ingest(&bronze_dir, &silver_root, &quote_ccy),
        Commands::Run {
            config,
            silver,
            symbol,
            weight,
            field,
            initial_equity,
            weight_lag,
            nan_policy,
            price_fill_method,
            max_gross_leverage,
            synthetic,
            export,
        } => {
            let spec = if let Some(path) = config {
                if !silver.is_empty() || symbol.is_some() {
                    bail!("--config is mutually exclusive with --silver/--symbol");
                }
                RunSpec::from_file(&path)?
            } else {
                let Some(symbol) = symbol else {
                    bail!("--symbol is required without --config");
                };
                RunSpec {
                    silver,
                    symbol,
                    weight,
                    field,
                    engine: BacktestConfig {
                        initial_equity,
                        weight_lag,
                        nan_policy: parse_nan_policy(&nan_policy)?,
                        price_fill_method: parse_fill_method(&price_fill_method)?,
                        gross_leverage_max: max_gross_leverage,
                    },
                }
            };
            run_backtest_cmd(&spec, synthetic, export.as_deref())
        }
    }
}

/// Parse a bronze filename of the form
/// `{spot|perp}_ohlcv_1d__<source>__<SYMBOL>.csv`.
fn parse_bronze_name(name: &str) -> Option<(String, String, String, String)> {
    let stem = name.strip_suffix(".csv")?;
    let mut parts = stem.split("__");
    let head = parts.next()?;
    let exchange = parts.next()?;
    let symbol = parts.next()?;
    if parts.next().is_some() || symbol.is_empty() {
        return None;
    }

    let (market_type, rest) = head.split_once('_')?;
    if market_type != "spot" && market_type != "perp" {
        return None;
    }
    let (kind, timeframe) = rest.rsplit_once('_')?;
    if kind != "ohlcv" {
        return None;
    }
    Some((
        market_type.to_string(),
        timeframe.to_string(),
        exchange.to_string(),
        symbol.to_string(),
    ))
}

fn run_ingest(bronze_dir: &Path, silver_root: &Path, quote_ccy: &str) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(bronze_dir)
        .with_context(|| format!("reading bronze dir {}", bronze_dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();

    let mut ok = 0_usize;
    let mut failed = 0_usize;

    for path in entries {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some((market_type, timeframe, exchange, symbol)) = parse_bronze_name(name) else {
            continue;
        };

        let spec = IngestSpec {
            exchange,
            market_type,
            timeframe,
            quote_ccy: quote_ccy.to_string(),
        };
        match ingest_ohlcv_csv(&path, &symbol, &spec, silver_root) {
            Ok(out) => {
                println!("ingested {name} -> {}", out.display());
                ok += 1;
            }
            Err(err) => {
                eprintln!("failed {name}: {err}");
                failed += 1;
            }
        }
    }

    if ok == 0 && failed == 0 {
        bail!(
            "no matching CSV files in {} (expected names like spot_ohlcv_1d__cryptoquant_agg__BTCUSD.csv)",
            bronze_dir.display()
        );
    }
    println!("ingest complete: {ok} ok, {failed} failed");
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_backtest_cmd(spec: &RunSpec, synthetic: bool, export: Option<&Path>) -> Result<()> {
    let prices = if synthetic {
        let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
        synthetic_price_matrix(&[spec.symbol.as_str()], 500, start, 42)
    } else {
        if spec.silver.is_empty() {
            bail!("no silver paths given (or pass --synthetic)");
        }
        let bars = load_bars(&spec.silver)?;
        to_price_matrix(&bars, &spec.field)?
    };

    let strategy = ConstantWeight::new(spec.symbol.clone(), spec.weight);
    let weights = strategy.generate_weights(&prices)?;
    let result = run_backtest(&prices, &weights, &spec.engine)?;

    println!("run id:      {}", spec.run_id()?);
    println!("strategy:    {} ({} @ {})", strategy.name(), spec.symbol, spec.weight);
    let meta = &result.metadata;
    println!(
        "range:       {} -> {} ({} assets)",
        meta.start, meta.end, meta.n_assets
    );
    println!(
        "policy:      {} / {} (lag {})",
        meta.nan_policy.as_str(),
        meta.price_fill_method.as_str(),
        meta.weight_lag
    );
    if let Some((_, final_equity)) = result.equity.last() {
        println!(
            "equity:      {:.4} -> {:.4}",
            meta.initial_equity, final_equity
        );
    }

    let mut frame = result.to_frame()?;
    println!("{}", frame.tail(Some(8)));

    if let Some(path) = export {
        use polars::prelude::{CsvWriter, SerWriter};
        let file = fs::File::create(path)
            .with_context(|| format!("creating export file {}", path.display()))?;
        CsvWriter::new(file).finish(&mut frame)?;
        println!("exported frame to {}", path.display());
    }
    Ok(())
}

fn parse_nan_policy(s: &str) -> Result<NanPolicy> {
    match s {
        "drop" => Ok(NanPolicy::Drop),
        "fill" => Ok(NanPolicy::Fill),
        "raise" => Ok(NanPolicy::Raise),
        other => bail!("unknown nan policy '{other}' (expected drop|fill|raise)"),
    }
}

fn parse_fill_method(s: &str) -> Result<FillMethod> {
    match s {
        "ffill" => Ok(FillMethod::Forward),
        "bfill" => Ok(FillMethod::Backward),
        other => bail!("unknown fill method '{other}' (expected ffill|bfill)"),
    }
}
