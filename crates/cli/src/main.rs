//! Command Line Interface for the dividend screener.
mod analysis;
mod fixtures;
mod report;
mod settings;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use divscan_domain::enums::SortOrder;
use divscan_scanner::config::{ScanConfiguration, SortField};
use divscan_scanner::engine::ScanEngine;
use divscan_scanner::presets::{PRESET_NAMES, preset_by_name, sector_focused};
use divscan_simulation::backtest::{Backtester, DividendAttribution, StrategyConfig};
use divscan_simulation::market_data::{SyntheticMarketConfig, SyntheticMarketGenerator};
use divscan_simulation::monte_carlo::MonteCarloConfig;
use divscan_simulation::risk::RiskAssessor;
use dotenv::dotenv;
use rust_decimal::Decimal;
use serde::Serialize;
use settings::Settings;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "divscan")]
#[command(about = "Dividend stock screener, risk assessor and strategy backtester", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a stock universe
    Scan {
        /// Universe file (JSON list of stocks)
        #[arg(short, long, default_value = "data/sample_universe.json")]
        universe: PathBuf,

        /// Built-in scan (high_yield, dividend_aristocrats, safe_dividend, growth_dividend)
        #[arg(short, long, conflicts_with_all = ["config", "sectors"])]
        preset: Option<String>,

        /// Scan configuration file (JSON)
        #[arg(short, long, conflicts_with = "sectors")]
        config: Option<PathBuf>,

        /// Sector-focused scan over a comma separated list of sectors
        #[arg(long, value_delimiter = ',')]
        sectors: Vec<String>,

        /// Result field to sort by
        #[arg(long)]
        sort_by: Option<SortField>,

        /// Sort direction (asc or desc)
        #[arg(long)]
        order: Option<SortOrder>,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Assess the risk of a portfolio
    Risk {
        /// Portfolio file (JSON list of holdings)
        #[arg(short, long, default_value = "data/sample_portfolio.json")]
        portfolio: PathBuf,

        /// Monte Carlo trials for Value at Risk
        #[arg(short, long)]
        trials: Option<usize>,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Backtest the dividend yield strategy
    Backtest {
        /// Strategy configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Symbols to trade, comma separated
        #[arg(long, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Minimum dividend yield as a fraction (0.03 = 3%)
        #[arg(long)]
        min_yield: Option<Decimal>,

        /// Months between rebalances
        #[arg(long)]
        interval: Option<u32>,

        /// Years of synthetic history
        #[arg(long)]
        years: Option<u32>,

        /// Initial capital
        #[arg(long, default_value = "100000")]
        capital: Decimal,

        /// RNG seed for the synthetic market
        #[arg(long)]
        seed: Option<u64>,

        /// How dividends are credited to purchases
        #[arg(long, value_enum)]
        attribution: Option<Attribution>,

        /// Historical market file (JSON list of series) instead of synthetic data
        #[arg(short, long)]
        market: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Analyze a single stock from a universe
    Analyze {
        /// Symbol to analyze
        symbol: String,

        /// Universe file (JSON list of stocks)
        #[arg(short, long, default_value = "data/sample_universe.json")]
        universe: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Attribution {
    /// Every payment after the purchase date
    AllSubsequent,
    /// Only payments while the position was held
    OwnershipWindow,
}

impl From<Attribution> for DividendAttribution {
    fn from(value: Attribution) -> Self {
        match value {
            Attribution::AllSubsequent => Self::AllSubsequent,
            Attribution::OwnershipWindow => Self::OwnershipWindow,
        }
    }
}

fn main() -> Result<()> {
    dotenv().ok();
    let settings = Settings::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            universe,
            preset,
            config,
            sectors,
            sort_by,
            order,
            limit,
            json,
        } => {
            let mut scan = select_scan(preset.as_deref(), config.as_deref(), &sectors)?;
            if sort_by.is_some() || order.is_some() {
                let field = sort_by.unwrap_or(scan.sort_by);
                let direction = order.unwrap_or(scan.sort_order);
                scan = scan.with_sort(field, direction);
            }
            if let Some(limit) = limit {
                scan = scan.with_limit(limit);
            }

            let provider = fixtures::load_universe(&universe)?;
            let symbols = provider.symbols();
            info!(scan = %scan.name, universe = symbols.len(), "Running scan");

            let engine = ScanEngine::new(provider);
            let results = engine.scan(&symbols, &scan)?;
            if json {
                print_json(&results)?;
            } else {
                println!("{}", report::scan_table(&scan.name, &results));
            }
        }
        Commands::Risk {
            portfolio,
            trials,
            seed,
            json,
        } => {
            let holdings = fixtures::load_portfolio(&portfolio)?;
            let mut mc = MonteCarloConfig::default()
                .with_trials(trials.unwrap_or(settings.var_trials))
                .with_base_volatility(settings.base_volatility);
            if let Some(seed) = seed.or(settings.seed) {
                mc = mc.with_seed(seed);
            }

            let assessment = RiskAssessor::new(mc).assess(&holdings)?;
            if json {
                print_json(&assessment)?;
            } else {
                println!("{}", report::risk_report(&assessment));
            }
        }
        Commands::Backtest {
            config,
            symbols,
            min_yield,
            interval,
            years,
            capital,
            seed,
            attribution,
            market,
            json,
        } => {
            let mut strategy = match config {
                Some(path) => fixtures::load_strategy(&path)?,
                None => StrategyConfig::default()
                    .with_horizon_years(settings.horizon_years)
                    .with_annualization_factor(settings.sharpe_factor),
            };
            if !symbols.is_empty() {
                strategy = strategy.with_symbols(symbols);
            }
            if let Some(min_yield) = min_yield {
                strategy = strategy.with_min_yield(min_yield);
            }
            if let Some(interval) = interval {
                strategy = strategy.with_rebalance_interval(interval);
            }
            if let Some(years) = years {
                strategy = strategy.with_horizon_years(years);
            }
            if let Some(attribution) = attribution {
                strategy = strategy.with_attribution(attribution.into());
            }

            let result = match market {
                Some(path) => {
                    let data = fixtures::load_market(&path)?;
                    Backtester::new(data).run(&strategy, capital)?
                }
                None => {
                    let mut synthetic = SyntheticMarketConfig::default();
                    if let Some(seed) = seed.or(settings.seed) {
                        synthetic = synthetic.with_seed(seed);
                    }
                    Backtester::new(SyntheticMarketGenerator::new(synthetic))
                        .run(&strategy, capital)?
                }
            };
            if json {
                print_json(&result)?;
            } else {
                println!("{}", report::backtest_report(&result));
            }
        }
        Commands::Analyze {
            symbol,
            universe,
            json,
        } => {
            let provider = fixtures::load_universe(&universe)?;
            let analysis =
                analysis::analyze_stock(&provider, &symbol, Utc::now().date_naive())?;
            if json {
                print_json(&analysis)?;
            } else {
                println!("{}", report::analysis_report(&analysis));
            }
        }
    }

    Ok(())
}

/// Resolves the scan to run: a config file, a preset, a sector list, or the
/// unfiltered default.
fn select_scan(
    preset: Option<&str>,
    config: Option<&Path>,
    sectors: &[String],
) -> Result<ScanConfiguration> {
    if let Some(path) = config {
        return fixtures::load_scan_config(path);
    }
    if let Some(name) = preset {
        return preset_by_name(name).with_context(|| {
            format!(
                "unknown preset '{name}', expected one of {}",
                PRESET_NAMES.join(", ")
            )
        });
    }
    if !sectors.is_empty() {
        return Ok(sector_focused(sectors));
    }
    Ok(ScanConfiguration::default())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_arguments() {
        let cli = Cli::try_parse_from([
            "divscan", "scan", "--preset", "high_yield", "--sort-by", "health_score", "--order",
            "asc", "--limit", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Scan {
                preset,
                sort_by,
                order,
                limit,
                ..
            } => {
                assert_eq!(preset.as_deref(), Some("high_yield"));
                assert_eq!(sort_by, Some(SortField::DividendHealthScore));
                assert_eq!(order, Some(SortOrder::Asc));
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_preset_conflicts_with_sectors() {
        let parsed =
            Cli::try_parse_from(["divscan", "scan", "--preset", "high_yield", "--sectors", "Energy"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_backtest_arguments() {
        let cli = Cli::try_parse_from([
            "divscan",
            "backtest",
            "--symbols",
            "ITC,TCS",
            "--min-yield",
            "0.04",
            "--attribution",
            "ownership-window",
        ])
        .unwrap();
        match cli.command {
            Commands::Backtest {
                symbols,
                min_yield,
                attribution,
                capital,
                ..
            } => {
                assert_eq!(symbols, vec!["ITC".to_string(), "TCS".to_string()]);
                assert_eq!(min_yield, Some(Decimal::new(4, 2)));
                assert!(matches!(attribution, Some(Attribution::OwnershipWindow)));
                assert_eq!(capital, Decimal::from(100_000));
            }
            _ => panic!("expected backtest"),
        }
    }

    #[test]
    fn test_select_scan_fallbacks() {
        let sectors = vec!["Utilities".to_string()];
        let scan = select_scan(None, None, &sectors).unwrap();
        assert_eq!(scan.name, "Sector Focused: Utilities");

        let scan = select_scan(Some("safe_dividend"), None, &[]).unwrap();
        assert_eq!(scan.name, "Safe Dividend Stocks");

        assert!(select_scan(Some("moonshots"), None, &[]).is_err());
        assert!(select_scan(None, None, &[]).unwrap().filters.is_empty());
    }
}
