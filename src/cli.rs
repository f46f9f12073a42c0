//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::csv_report_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig};
use crate::domain::config_validation::{validate_backtest_config, validate_strategy_config};
use crate::domain::error::CandlerunError;
use crate::domain::indicator::{IndicatorSpec, DEFAULT_LOOKBACK};
use crate::domain::strategies;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "candlerun", about = "Candle-replay trading strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        /// Strategy name (see list-strategies)
        strategy: String,
        /// Path to a CSV candle file
        data_file: PathBuf,
        /// Initial capital (overrides the config file)
        #[arg(short, long)]
        capital: Option<f64>,
        /// INI file with [backtest], [strategy] and [indicators] sections
        #[arg(short = 'C', long)]
        config: Option<PathBuf>,
        /// Hide the per-trade listing
        #[arg(long)]
        no_trades: bool,
        /// Maximum number of trades to display
        #[arg(short = 'n', long, default_value_t = 10)]
        max_trades: usize,
        /// Export equity curve and trade log as CSV into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List available strategies
    ListStrategies,
    /// List available CSV data files
    ListData {
        /// Directories to scan (defaults to the data directories)
        #[arg(long = "dir")]
        dirs: Vec<PathBuf>,
    },
    /// Show strategies and data files at a glance
    Info,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            strategy,
            data_file,
            capital,
            config,
            no_trades,
            max_trades,
            export,
        } => run_backtest_cmd(
            &strategy,
            &data_file,
            capital,
            config.as_ref(),
            no_trades,
            max_trades,
            export.as_ref(),
        ),
        Command::ListStrategies => run_list_strategies(),
        Command::ListData { dirs } => run_list_data(dirs),
        Command::Info => run_info(),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CandlerunError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Assemble the run configuration from the config file, with an explicit
/// CLI capital taking precedence over `[backtest] initial_capital`.
pub fn build_backtest_config(
    adapter: &dyn ConfigPort,
    capital_override: Option<f64>,
) -> Result<BacktestConfig, CandlerunError> {
    let initial_capital = capital_override
        .unwrap_or_else(|| adapter.get_double("backtest", "initial_capital", 10_000.0));
    let lookback = adapter.get_int("backtest", "lookback", DEFAULT_LOOKBACK as i64) as usize;
    let indicators = build_indicator_specs(adapter)?;

    Ok(BacktestConfig {
        initial_capital,
        lookback,
        indicators,
    })
}

/// Parse the `[indicators]` section (`name = kind(period[, default])`);
/// an absent section means the default indicator set.
pub fn build_indicator_specs(
    adapter: &dyn ConfigPort,
) -> Result<Vec<IndicatorSpec>, CandlerunError> {
    let names = adapter.keys("indicators");
    if names.is_empty() {
        return Ok(IndicatorSpec::default_set());
    }

    names
        .iter()
        .map(|name| {
            let raw = adapter.get_string("indicators", name).unwrap_or_default();
            IndicatorSpec::parse(name, &raw)
        })
        .collect()
}

fn run_backtest_cmd(
    strategy_name: &str,
    data_file: &PathBuf,
    capital: Option<f64>,
    config_path: Option<&PathBuf>,
    no_trades: bool,
    max_trades: usize,
    export: Option<&PathBuf>,
) -> ExitCode {
    if let Some(c) = capital {
        if c <= 0.0 {
            eprintln!("error: --capital must be positive");
            return ExitCode::from(2);
        }
    }

    // Stage 1: Load config
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => a,
                Err(code) => return code,
            }
        }
        None => FileConfigAdapter::empty(),
    };

    // Stage 2: Validate config
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Build strategy
    let mut strategy = match strategies::build(strategy_name, &adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("available strategies: {}", strategies::available().join(", "));
            return (&e).into();
        }
    };

    // Stage 4: Build run configuration
    let bt_config = match build_backtest_config(&adapter, capital) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Load candle table
    eprintln!("Loading candles from {}", data_file.display());
    let data_port = CsvDataAdapter::with_default_dirs();
    let table = match data_port.load(&data_file.to_string_lossy()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Running backtest: {} candles, {} to {}",
        table.len(),
        table.first().timestamp.format("%Y-%m-%d %H:%M"),
        table.last().timestamp.format("%Y-%m-%d %H:%M"),
    );

    // Stage 6: Run
    let report = run_backtest(&table, strategy.as_mut(), &bt_config);

    // Stage 7: Print results
    let text = TextReportAdapter::new(!no_trades, max_trades);
    let stdout = std::io::stdout();
    if let Err(e) = text.write(&report, strategy.name(), &mut stdout.lock()) {
        eprintln!("error: failed to write report: {e}");
        return (&e).into();
    }

    // Stage 8: Optional CSV export
    if let Some(dir) = export {
        match CsvExportAdapter::new(dir).export(&report) {
            Ok((equity_path, trades_path)) => {
                eprintln!("Exported {}", equity_path.display());
                eprintln!("Exported {}", trades_path.display());
            }
            Err(e) => {
                eprintln!("error: export failed: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_list_strategies() -> ExitCode {
    let names = strategies::available();
    for (i, name) in names.iter().enumerate() {
        println!("{:2}. {}", i + 1, name);
    }
    eprintln!("{} strategies available", names.len());
    ExitCode::SUCCESS
}

fn run_list_data(dirs: Vec<PathBuf>) -> ExitCode {
    let adapter = if dirs.is_empty() {
        CsvDataAdapter::with_default_dirs()
    } else {
        CsvDataAdapter::new(dirs)
    };

    let sources = match adapter.list_sources() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if sources.is_empty() {
        eprintln!("No CSV data files found");
        return ExitCode::SUCCESS;
    }

    for (i, source) in sources.iter().enumerate() {
        println!(
            "{:2}. {} ({})",
            i + 1,
            source.path.display(),
            human_size(source.size_bytes)
        );
    }
    eprintln!("{} data files found", sources.len());
    ExitCode::SUCCESS
}

fn run_info() -> ExitCode {
    let names = strategies::available();
    println!("Strategies available: {}", names.len());
    for name in names {
        println!("  - {name}");
    }
    println!();

    let sources = CsvDataAdapter::with_default_dirs()
        .list_sources()
        .unwrap_or_default();
    println!("Data files available: {}", sources.len());
    for source in sources.iter().take(5) {
        println!("  - {}", source.path.display());
    }
    if sources.len() > 5 {
        println!("  ... and {} more", sources.len() - 5);
    }

    eprintln!("Use list-strategies and list-data for complete lists");
    ExitCode::SUCCESS
}

fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes}B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
