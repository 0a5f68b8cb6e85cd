//! CLI definition and dispatch.

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::alert::{latest_alert, parse_alert_specs, Alert};
use crate::domain::config_validation::{
    data_request, strategy_config, validate_known_keys, validate_run_config, DATA_SECTION,
    REPORT_SECTION,
};
use crate::domain::data_request::{parse_timestamp, DataRequest};
use crate::domain::error::MacrossError;
use crate::domain::interval::Interval;
use crate::domain::metrics::TradeSummary;
use crate::domain::pipeline::{fetch_and_run, Analysis};
use crate::domain::strategy::StrategyConfig;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "macross", about = "Moving-average crossover signal and trade simulator")]
pub struct Cli {
    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the crossover pipeline and print the trade table
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        interval: Option<String>,
        /// Range start: Unix seconds, RFC 3339 or YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
        /// Range end: Unix seconds, RFC 3339 or YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        trades_out: Option<PathBuf>,
        #[arg(long)]
        series_out: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Evaluate every [alert:<id>] section against the latest bar
    Alerts {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// List recognized intervals
    Intervals,
}

/// Command-line values that override the config file for `run`.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub symbol: Option<String>,
    pub interval: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub trades_out: Option<PathBuf>,
    pub series_out: Option<PathBuf>,
}

pub fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            symbol,
            interval,
            from,
            to,
            data_dir,
            trades_out,
            series_out,
        } => {
            let overrides = RunOverrides {
                symbol,
                interval,
                from,
                to,
                trades_out,
                series_out,
            };
            run_analysis(&config, data_dir.as_ref(), &overrides)
        }
        Command::Validate { config } => run_validate(&config),
        Command::Alerts { config, data_dir } => run_alerts(&config, data_dir.as_ref()),
        Command::Intervals => run_intervals(),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, MacrossError> {
    FileConfigAdapter::from_file(path).map_err(|e| MacrossError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn fail(err: MacrossError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

/// `--data-dir` wins over `[data] data_dir`, which defaults to the working directory.
pub fn resolve_data_dir(config: &dyn ConfigPort, data_dir: Option<&PathBuf>) -> PathBuf {
    data_dir
        .cloned()
        .or_else(|| config.get_string(DATA_SECTION, "data_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn now() -> i64 {
    Utc::now().timestamp()
}

fn run_analysis(config_path: &Path, data_dir: Option<&PathBuf>, overrides: &RunOverrides) -> ExitCode {
    tracing::info!(path = %config_path.display(), "loading config");
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    let data_port = CsvAdapter::new(resolve_data_dir(&adapter, data_dir));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match execute_run(&adapter, &data_port, overrides, now(), &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

/// Builds the strategy and request from config plus overrides.
pub fn build_run_inputs(
    config: &dyn ConfigPort,
    overrides: &RunOverrides,
) -> Result<(StrategyConfig, DataRequest), MacrossError> {
    validate_known_keys(config)?;
    let strategy = strategy_config(config)?;
    let mut request = data_request(
        config,
        overrides.symbol.as_deref(),
        overrides.interval.as_deref(),
    )?;

    if let Some(from) = overrides.from.as_deref() {
        request.from = Some(parse_cli_timestamp("from", from)?);
    }
    if let Some(to) = overrides.to.as_deref() {
        request.to = Some(parse_cli_timestamp("to", to)?);
    }
    Ok((strategy, request))
}

fn parse_cli_timestamp(key: &str, value: &str) -> Result<i64, MacrossError> {
    parse_timestamp(value).ok_or_else(|| MacrossError::ConfigInvalid {
        section: "cli".into(),
        key: key.into(),
        reason: format!("cannot parse {value:?} as a timestamp"),
    })
}

/// Runs the pipeline and writes the trade table and summary to `out`.
/// Report files come from the overrides first, then `[report]`.
pub fn execute_run(
    config: &dyn ConfigPort,
    data_port: &dyn DataPort,
    overrides: &RunOverrides,
    now: i64,
    out: &mut dyn Write,
) -> Result<Analysis, MacrossError> {
    let (strategy, request) = build_run_inputs(config, overrides)?;
    tracing::info!(strategy = %strategy.label(), symbol = %request.symbol, interval = %request.interval, "running");

    let analysis = fetch_and_run(data_port, &request, &strategy, now)?;
    let summary = TradeSummary::compute(&analysis.trades);

    write!(out, "{}", format_trade_table(&analysis))?;
    writeln!(out)?;
    write!(out, "{}", format_summary(&summary))?;

    let trades_out = overrides
        .trades_out
        .clone()
        .or_else(|| config.get_string(REPORT_SECTION, "trades_path").map(PathBuf::from));
    let series_out = overrides
        .series_out
        .clone()
        .or_else(|| config.get_string(REPORT_SECTION, "series_path").map(PathBuf::from));

    let reporter = CsvReportAdapter::new();
    if let Some(path) = trades_out {
        reporter.write_trades(&analysis, &path)?;
    }
    if let Some(path) = series_out {
        reporter.write_series(&analysis, &path)?;
    }

    Ok(analysis)
}

pub fn format_trade_table(analysis: &Analysis) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "{:>4} {:>5} {:>6} {:>12} {:>6} {:>12} {:>12} {:>12} {:>11} {:>9}",
        "id", "dir", "entry", "entry_price", "exit", "exit_price", "sl_price", "tp_price", "reason", "return%"
    );
    for t in &analysis.trades {
        let _ = writeln!(
            s,
            "{:>4} {:>5} {:>6} {:>12.5} {:>6} {:>12.5} {:>12.5} {:>12.5} {:>11} {:>9.4}",
            t.trade_id,
            t.direction,
            t.entry_index,
            t.entry_price,
            t.exit_index,
            t.exit_price,
            t.sl_price,
            t.tp_price,
            t.exit_reason,
            t.return_fraction() * 100.0
        );
    }
    s
}

pub fn format_summary(summary: &TradeSummary) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "trades: {} (long {}, short {})",
        summary.total_trades, summary.long_trades, summary.short_trades
    );
    let _ = writeln!(
        s,
        "won/lost/flat: {}/{}/{}  win rate: {:.2}%",
        summary.trades_won,
        summary.trades_lost,
        summary.trades_breakeven,
        summary.win_rate * 100.0
    );
    let _ = writeln!(
        s,
        "exits: stop_loss {}, take_profit {}, end_of_data {}",
        summary.stop_loss_exits, summary.take_profit_exits, summary.end_of_data_exits
    );
    let _ = writeln!(
        s,
        "return: total {:.4}%  avg {:.4}%  avg bars held {:.1}",
        summary.total_return * 100.0,
        summary.avg_return * 100.0,
        summary.avg_bars_held
    );
    s
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };
    if let Err(e) = validate_run_config(&adapter) {
        return fail(e);
    }
    match build_run_inputs(&adapter, &RunOverrides::default()) {
        Ok((strategy, request)) => {
            println!(
                "Configuration is valid: {} on {} {}",
                strategy.label(),
                request.symbol,
                request.interval
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

/// Evaluates every alert section; alerts whose data cannot be loaded are
/// skipped with a warning.
pub fn evaluate_alerts(
    config: &dyn ConfigPort,
    data_port: &dyn DataPort,
    now: i64,
) -> Result<Vec<Alert>, MacrossError> {
    validate_known_keys(config)?;
    let base = strategy_config(config)?;
    let specs = parse_alert_specs(config)?;
    let mut alerts = Vec::new();

    for spec in &specs {
        let request = DataRequest::new(spec.symbol.clone(), spec.interval);
        let analysis = match fetch_and_run(data_port, &request, &spec.strategy_config(&base), now) {
            Ok(a) => a,
            Err(e @ (MacrossError::NoData { .. } | MacrossError::DataSource { .. })) => {
                tracing::warn!(alert = spec.id, error = %e, "skipping alert");
                continue;
            }
            Err(e) => return Err(e),
        };
        if let Some(alert) = latest_alert(&analysis, &spec.symbol, spec.interval) {
            alerts.push(alert);
        }
    }

    tracing::info!(checked = specs.len(), triggered = alerts.len(), "alerts evaluated");
    Ok(alerts)
}

fn run_alerts(config_path: &Path, data_dir: Option<&PathBuf>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };
    let data_port = CsvAdapter::new(resolve_data_dir(&adapter, data_dir));

    match evaluate_alerts(&adapter, &data_port, now()) {
        Ok(alerts) => {
            for alert in alerts {
                println!("{alert}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_intervals() -> ExitCode {
    for interval in Interval::ALL {
        println!(
            "{:>4}  {:>5} min  default lookback {} min",
            interval,
            interval.minutes(),
            interval.default_lookback_minutes()
        );
    }
    ExitCode::SUCCESS
}
