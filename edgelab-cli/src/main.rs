//! EdgeLab CLI — tradability analysis from the command line.
//!
//! Commands:
//! - `analyze` — full tradability report (gross/net, break-even, capacity)
//! - `sweep` — net performance across a grid of cost levels, as CSV
//! - `capacity` — capacity-decay ladder and maximum viable capital, as CSV
//!
//! All commands read a market CSV (`date,price,dollar_volume`) and a
//! positions CSV (`date,weight`); gross returns are derived by holding each
//! period's entering position one period forward.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use edgelab_core::{compute_turnover, BreakEven, Capacity};
use edgelab_runner::{
    cost_sensitivity, export_capacity_curve_csv, export_cost_curve_csv, load_series,
    max_viable_capital, run_analysis, save_report, simulate_capacity_decay, AnalysisConfig,
    CapacityLadder, CostGrid, LoadedSeries, TradabilityReport,
};

#[derive(Parser)]
#[command(
    name = "edgelab",
    about = "EdgeLab CLI — cost-adjusted performance and capacity analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce a full tradability report as JSON.
    Analyze {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output directory for the report JSON.
        #[arg(long, default_value = "results")]
        out: PathBuf,
    },
    /// Evaluate net performance across a grid of cost levels.
    Sweep {
        #[command(flatten)]
        inputs: InputArgs,

        /// Highest cost per unit traded to test.
        #[arg(long, default_value_t = 0.01)]
        max_cost: f64,

        /// Number of grid points.
        #[arg(long, default_value_t = 50)]
        steps: usize,

        /// Output CSV path (stdout if omitted).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Simulate performance decay across a capital ladder.
    Capacity {
        #[command(flatten)]
        inputs: InputArgs,

        /// Smallest capital level in dollars.
        #[arg(long, default_value_t = 1e6)]
        min_capital: f64,

        /// Largest capital level in dollars.
        #[arg(long, default_value_t = 1e9)]
        max_capital: f64,

        /// Number of log-spaced levels.
        #[arg(long, default_value_t = 20)]
        steps: usize,

        /// Output CSV path (stdout if omitted).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Market CSV: date,price,dollar_volume.
    #[arg(long)]
    market: PathBuf,

    /// Positions CSV: date,weight.
    #[arg(long)]
    positions: PathBuf,

    /// TOML config (cost, solver, capacity sections). Defaults apply when
    /// omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { inputs, out } => cmd_analyze(inputs, out),
        Commands::Sweep {
            inputs,
            max_cost,
            steps,
            out,
        } => cmd_sweep(inputs, max_cost, steps, out),
        Commands::Capacity {
            inputs,
            min_capital,
            max_capital,
            steps,
            out,
        } => cmd_capacity(inputs, min_capital, max_capital, steps, out),
    }
}

fn load(inputs: &InputArgs) -> Result<(LoadedSeries, AnalysisConfig)> {
    let loaded = load_series(&inputs.market, &inputs.positions)
        .context("failed to load input series")?;
    let config = match &inputs.config {
        Some(path) => AnalysisConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    Ok((loaded, config))
}

fn cmd_analyze(inputs: InputArgs, out: PathBuf) -> Result<()> {
    let (loaded, config) = load(&inputs)?;
    let report = run_analysis(
        &loaded.market,
        &loaded.positions,
        &loaded.gross_returns,
        &config,
    )?;
    let path = save_report(&report, &out)?;
    print_summary(&report);
    println!("report written to {}", path.display());
    Ok(())
}

fn cmd_sweep(
    inputs: InputArgs,
    max_cost: f64,
    steps: usize,
    out: Option<PathBuf>,
) -> Result<()> {
    let (loaded, config) = load(&inputs)?;
    let (trades, _) = compute_turnover(&loaded.positions, config.periods_per_year)?;
    let points = cost_sensitivity(
        &loaded.gross_returns,
        &trades,
        config.periods_per_year,
        &CostGrid::linear(max_cost, steps),
    )?;
    write_csv(export_cost_curve_csv(&points)?, out)
}

fn cmd_capacity(
    inputs: InputArgs,
    min_capital: f64,
    max_capital: f64,
    steps: usize,
    out: Option<PathBuf>,
) -> Result<()> {
    let (loaded, config) = load(&inputs)?;
    let ppy = config.periods_per_year;
    let (_, annualized_turnover) = compute_turnover(&loaded.positions, ppy)?;
    let points = simulate_capacity_decay(
        &loaded.gross_returns,
        annualized_turnover / ppy,
        loaded.market.avg_daily_dollar_volume(),
        config.capacity.impact_coefficient,
        ppy,
        &CapacityLadder::log_spaced(min_capital, max_capital, steps),
    )?;
    match max_viable_capital(&points, config.capacity.sharpe_floor) {
        Some(capital) => eprintln!(
            "max viable capital at Sharpe floor {}: ${capital:.0}",
            config.capacity.sharpe_floor
        ),
        None => eprintln!(
            "no capital level clears the Sharpe floor {}",
            config.capacity.sharpe_floor
        ),
    }
    write_csv(export_capacity_curve_csv(&points)?, out)
}

fn write_csv(csv: String, out: Option<PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("curve written to {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}

fn print_summary(report: &TradabilityReport) {
    let fmt_sharpe = |s: Option<f64>| {
        s.map_or_else(|| "undefined".to_string(), |v| format!("{v:.3}"))
    };
    println!(
        "gross sharpe {} | net sharpe {} | turnover {:.2}x/yr | cost drag {:.4}",
        fmt_sharpe(report.gross.sharpe),
        fmt_sharpe(report.net.sharpe),
        report.annualized_turnover,
        report.cost_drag,
    );
    match &report.break_even {
        BreakEven::Solved { cost, .. } => println!("break-even cost: {cost:.6} per unit traded"),
        BreakEven::NotConverged { best_estimate, .. } => {
            println!("break-even did not converge; best estimate {best_estimate:.6}")
        }
        BreakEven::NoRootInRange { tested_upper } => {
            println!("no break-even found up to {tested_upper:.4}")
        }
        BreakEven::Undefined => println!("break-even undefined: signal never trades"),
    }
    match report.capacity.implied_capacity {
        Capacity::Bounded { dollars } => println!("implied capacity: ${dollars:.0}"),
        Capacity::Unbounded => println!("implied capacity: unbounded (no turnover)"),
    }
}
