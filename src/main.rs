use analytics::{AnalyticsEngine, DashboardSnapshot};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use configuration::{Config, LoggingSettings};
use std::path::PathBuf;
use trade_store::{AnalyticsPeriod, JsonTradeStore, PeriodPreset, TradeStore};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;

/// The main entry point for the trading journal CLI.
fn main() -> Result<()> {
    // A missing .env file is fine; it only carries optional overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Analytics(args) => handle_analytics(args, &config),
        Commands::Dashboard(args) => handle_dashboard(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance analytics for a personal trading journal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "tradelog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report on the closed trades of a period.
    Analytics(AnalyticsArgs),
    /// Journal-wide snapshot: totals, open positions and recent trades.
    Dashboard(DashboardArgs),
}

#[derive(Args)]
struct StoreArgs {
    /// Override the journal file from the configuration.
    #[arg(long)]
    trades: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AnalyticsArgs {
    /// A named period (7d, 30d, 90d, this-month, last-month, ytd, all).
    #[arg(long, conflicts_with_all = ["from", "to"])]
    preset: Option<PeriodPreset>,

    /// The first entry date to include (format: YYYY-MM-DD).
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// The last entry date to include (format: YYYY-MM-DD).
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Args)]
struct DashboardArgs {
    #[command(flatten)]
    store: StoreArgs,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_analytics(args: AnalyticsArgs, config: &Config) -> Result<()> {
    let period = match (args.from, args.to, args.preset) {
        (Some(from), Some(to), _) => AnalyticsPeriod::new(from, to)?,
        (_, _, Some(preset)) => preset.resolve(today()),
        _ => config.report.default_preset.resolve(today()),
    };

    let store = open_store(&args.store, config)?;
    let trades = store
        .trades_in_period(&period)
        .with_context(|| format!("Failed to fetch trades for {period}"))?;
    tracing::info!(%period, trades = trades.len(), "Building period report.");

    let bundle = AnalyticsEngine::new().calculate(&trades);

    if args.store.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        render::print_analytics(&period, &bundle, config.report.recent_months);
    }
    Ok(())
}

fn handle_dashboard(args: DashboardArgs, config: &Config) -> Result<()> {
    let store = open_store(&args.store, config)?;
    let trades = store.all_trades().context("Failed to fetch trades")?;

    let snapshot = DashboardSnapshot::build(&trades, config.report.recent_trades);

    if args.store.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        render::print_dashboard(&snapshot);
    }
    Ok(())
}

fn open_store(args: &StoreArgs, config: &Config) -> Result<JsonTradeStore> {
    let path = args.trades.as_ref().unwrap_or(&config.store.trades_path);
    JsonTradeStore::open(path)
        .with_context(|| format!("Failed to open trade journal {}", path.display()))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Installs the global subscriber. Logs go to stderr so `--json` output on
/// stdout stays clean; with a log directory configured they are also written
/// to a daily rolling file. The returned guard must live until exit.
fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid log level '{}'", settings.level))?;

    match &settings.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "tradelog.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::io::stderr.and(file_writer))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(Some(guard))
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(None)
        }
    }
}
