// In app/src/main.rs

use anyhow::Result;
use api_client::{CsvPriceSource, PriceSource, YahooClient};
use backtester::{write_trace_csv, Evaluation};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use core_types::{StrategyKind, StrategyParams};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use web_server::AppState;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Evaluates rule-based trading strategies on daily prices.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Starts the HTTP API.
    Serve,

    /// Evaluates one strategy on one symbol and prints the summary.
    Evaluate {
        /// The ticker symbol to evaluate (e.g., "AAPL").
        #[arg(short, long)]
        symbol: String,

        /// One of SMA, EMA, RSI, MACD.
        #[arg(long)]
        strategy: StrategyKind,

        /// Short moving-average window, or the RSI period.
        #[arg(long)]
        short_window: i64,

        #[arg(long)]
        long_window: i64,

        /// Accepted for compatibility; has no effect on the result.
        #[arg(long)]
        stop_loss_pct: Option<f64>,

        /// Inclusive start date in YYYY-MM-DD format. Defaults to the configured window.
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Exclusive end date in YYYY-MM-DD format.
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Read prices from a `date,close` CSV file instead of Yahoo Finance.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the (date, close, buy, sell) trace to this CSV file.
        #[arg(long)]
        signals_out: Option<PathBuf>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level)?;
    tracing::info!(environment = %settings.app.environment, "Application settings loaded successfully.");

    match cli.command {
        Commands::Serve => {
            run_server(settings).await?;
        }
        Commands::Evaluate {
            symbol,
            strategy,
            short_window,
            long_window,
            stop_loss_pct,
            start_date,
            end_date,
            csv,
            signals_out,
        } => {
            let mut params = StrategyParams::new(strategy, short_window, long_window);
            if let Some(pct) = stop_loss_pct {
                params = params.with_stop_loss(pct);
            }
            let start = start_date.unwrap_or(settings.market_data.start_date);
            let end = end_date.unwrap_or(settings.market_data.end_date);

            let source: Box<dyn PriceSource> = match csv {
                Some(path) => Box::new(CsvPriceSource::new(path)),
                None => Box::new(YahooClient::new(&settings.market_data)?),
            };
            handle_evaluate(source.as_ref(), &symbol, &params, start, end, signals_out).await?;
        }
    }

    Ok(())
}

/// Installs the fmt layer, filtered to the configured level.
fn init_tracing(log_level: &str) -> Result<()> {
    let level: tracing::Level = log_level
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid app.log_level '{}'", log_level))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("hyper_util", tracing::Level::WARN)
                .with_target("reqwest", tracing::Level::WARN)
                .with_default(level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
    Ok(())
}

// --- "Serve" Subcommand Logic ---

/// Builds the Yahoo-backed state and serves the API until Ctrl-C.
async fn run_server(settings: app_config::Settings) -> Result<()> {
    let client = YahooClient::new(&settings.market_data)?;
    let state = AppState::new(Arc::new(client), &settings.market_data);

    web_server::run(settings.server, state).await?;
    Ok(())
}

// --- "Evaluate" Subcommand Logic ---

async fn handle_evaluate(
    source: &dyn PriceSource,
    symbol: &str,
    params: &StrategyParams,
    start: NaiveDate,
    end: NaiveDate,
    signals_out: Option<PathBuf>,
) -> Result<()> {
    if start >= end {
        anyhow::bail!("start date ({start}) must be before end date ({end})");
    }
    let symbol = symbol.trim().to_uppercase();

    tracing::info!(source = source.name(), symbol = %symbol, %start, %end, "Loading price history...");
    let series = source.daily_closes(&symbol, start, end).await?;
    tracing::info!("Loaded {} daily closes.", series.len());

    let evaluation = backtester::evaluate(&series, params)?;
    print_report(&symbol, params, &evaluation);
    println!("{}", serde_json::to_string_pretty(&evaluation.summary())?);

    if let Some(path) = signals_out {
        let file = std::fs::File::create(&path)?;
        write_trace_csv(&evaluation.trace, file)?;
        tracing::info!(path = %path.display(), rows = evaluation.trace.len(), "Signal trace written.");
    }
    Ok(())
}

/// Prints a human-readable summary to stderr, leaving stdout for the JSON.
fn print_report(symbol: &str, params: &StrategyParams, evaluation: &Evaluation) {
    let report = &evaluation.report;
    eprintln!("\n--- Strategy Evaluation ---");
    eprintln!("  - {} {} ({}, {})", symbol, params.kind, params.short_window, params.long_window);
    eprintln!(
        "  - Days: {} | Warm-up: {} | Buys: {} | Sells: {}",
        report.trading_days,
        evaluation.indicators.warm_up(),
        evaluation.signals.buy_count(),
        evaluation.signals.sell_count()
    );
    eprintln!(
        "  - GMRR: {:.2}% | Volatility: {:.2}% | Sharpe: {:.2} | Total: {:.2}% | Max Drawdown: {:.2}%",
        report.annualized_return * 100.0,
        report.annualized_volatility * 100.0,
        report.sharpe_ratio,
        report.total_return * 100.0,
        report.max_drawdown * 100.0
    );
    if report.is_degenerate() {
        eprintln!("  - Note: no volatility in strategy returns; Sharpe reported as 0.");
    }
    eprintln!("---------------------------\n");
}
