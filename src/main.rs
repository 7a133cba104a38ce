//! Drawdown projection CLI
//!
//! Command-line interface for running drawdown and accumulation projections

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use drawdown_projection::allocation::load_allocation;
use drawdown_projection::export::write_records_csv;
use drawdown_projection::projection::DEFAULT_MAX_YEARS;
use drawdown_projection::scenario::{load_scenarios, SweepPoint};
use drawdown_projection::{
    ProjectionConfig, ProjectionResult, Scenario, ScenarioKind, ScenarioRunner, Timing,
};

#[derive(Parser, Debug)]
#[command(name = "drawdown")]
#[command(about = "Retirement drawdown and savings accumulation projections")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Write the projection records to this CSV file
    #[arg(long, global = true, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Ceiling on years simulated when running a principal to depletion
    #[arg(long, global = true, env = "DRAWDOWN_MAX_YEARS", default_value_t = DEFAULT_MAX_YEARS)]
    max_years: u32,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Principal needed to fund growing withdrawals for a number of years
    Principal {
        /// First year's withdrawal
        #[arg(long)]
        withdrawal: f64,

        #[command(flatten)]
        rates: RateArgs,

        /// Number of years the principal must last
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        years: i32,

        #[arg(long, value_enum, default_value_t = CliTiming::End)]
        timing: CliTiming,
    },

    /// How many years a principal lasts under growing withdrawals
    Years {
        /// Starting principal
        #[arg(long, allow_negative_numbers = true)]
        principal: f64,

        /// First year's withdrawal
        #[arg(long)]
        withdrawal: f64,

        #[command(flatten)]
        rates: RateArgs,

        #[arg(long, value_enum, default_value_t = CliTiming::End)]
        timing: CliTiming,
    },

    /// Compound savings with monthly contributions
    Compound {
        /// Starting balance
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        principal: f64,

        /// Contribution per month (negative to withdraw)
        #[arg(long, allow_negative_numbers = true)]
        monthly: f64,

        #[command(flatten)]
        rate: ReturnArgs,

        /// Number of years to compound
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        years: i32,
    },

    /// Run scenarios from a JSON file (one object or an array)
    Run {
        /// Scenario file
        file: PathBuf,
    },

    /// Required principal across a grid of returns and growth rates
    Sweep {
        /// First year's withdrawal
        #[arg(long)]
        withdrawal: f64,

        #[arg(short = 'n', long)]
        years: i32,

        /// Comma-separated nominal returns, e.g. 0.04,0.05,0.06
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        returns: Vec<f64>,

        /// Comma-separated withdrawal growth rates
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        growth_rates: Vec<f64>,

        #[arg(long, value_enum, default_value_t = CliTiming::End)]
        timing: CliTiming,
    },
}

/// Nominal return, given directly or derived from an allocation file
#[derive(Args, Debug)]
struct ReturnArgs {
    /// Nominal annual return as a decimal (e.g. 0.07)
    #[arg(
        long = "return",
        value_name = "RATE",
        allow_negative_numbers = true,
        required_unless_present = "allocation"
    )]
    annual_return: Option<f64>,

    /// CSV with columns asset,weight,expected_return
    #[arg(long, value_name = "PATH", conflicts_with = "annual_return")]
    allocation: Option<PathBuf>,
}

impl ReturnArgs {
    fn resolve(&self) -> Result<f64> {
        match (self.annual_return, &self.allocation) {
            (Some(rate), _) => Ok(rate),
            (None, Some(path)) => {
                let allocation = load_allocation(path)
                    .with_context(|| format!("Failed to load allocation {}", path.display()))?;
                let rate = allocation.weighted_return()?;
                info!("Allocation return: {:.4}", rate);
                Ok(rate)
            }
            (None, None) => bail!("Either --return or --allocation is required"),
        }
    }
}

/// Return plus withdrawal growth
#[derive(Args, Debug)]
struct RateArgs {
    #[command(flatten)]
    annual_return: ReturnArgs,

    /// Annual growth of the withdrawal (inflation) as a decimal
    #[arg(long = "growth", value_name = "RATE", default_value_t = 0.0, allow_negative_numbers = true)]
    growth_rate: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTiming {
    End,
    Begin,
}

impl From<CliTiming> for Timing {
    fn from(value: CliTiming) -> Self {
        match value {
            CliTiming::End => Timing::End,
            CliTiming::Begin => Timing::Begin,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let runner = ScenarioRunner::with_config(ProjectionConfig {
        max_years: cli.max_years,
    });

    let scenarios = match cli.command {
        Command::Principal {
            withdrawal,
            rates,
            years,
            timing,
        } => vec![Scenario::AnnuityTarget {
            first_withdrawal: withdrawal,
            annual_return: rates.annual_return.resolve()?,
            growth_rate: rates.growth_rate,
            years,
            timing: timing.into(),
        }],
        Command::Years {
            principal,
            withdrawal,
            rates,
            timing,
        } => vec![Scenario::DepletionTarget {
            initial_principal: principal,
            first_withdrawal: withdrawal,
            annual_return: rates.annual_return.resolve()?,
            growth_rate: rates.growth_rate,
            timing: timing.into(),
            max_years: None,
        }],
        Command::Compound {
            principal,
            monthly,
            rate,
            years,
        } => vec![Scenario::AccumulationTarget {
            principal,
            monthly,
            annual_return: rate.resolve()?,
            years,
        }],
        Command::Run { file } => load_scenarios(&file)
            .with_context(|| format!("Failed to load scenarios from {}", file.display()))?,
        Command::Sweep {
            withdrawal,
            years,
            returns,
            growth_rates,
            timing,
        } => {
            let points = runner.sweep_required_principal(
                withdrawal,
                years,
                timing.into(),
                &returns,
                &growth_rates,
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print_sweep(&points, &growth_rates);
            }
            return Ok(());
        }
    };

    let results = runner.run_batch(&scenarios);

    if let Some(path) = &cli.csv {
        export_results(path, &results)?;
    }

    if cli.json {
        if results.len() == 1 {
            println!("{}", serde_json::to_string_pretty(&results[0])?);
        } else {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    } else {
        for (i, result) in results.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print_result(result);
        }
    }

    Ok(())
}

/// Write each result's records; several results get numbered files
fn export_results(path: &Path, results: &[ProjectionResult]) -> Result<()> {
    if results.len() == 1 {
        write_records_csv(path, &results[0].records)?;
        return Ok(());
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "projection".to_string());

    for (i, result) in results.iter().enumerate() {
        let numbered = path.with_file_name(format!("{}_{}.csv", stem, i + 1));
        write_records_csv(&numbered, &result.records)?;
    }
    Ok(())
}

fn print_result(result: &ProjectionResult) {
    let title = match result.kind {
        ScenarioKind::Annuity => "Required principal",
        ScenarioKind::Depletion => "Drawdown to depletion",
        ScenarioKind::Accumulation => "Accumulation",
    };
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));

    for warning in &result.warnings {
        println!("Warning: {}", warning);
    }

    if let Some(principal) = result.required_principal {
        println!("Required principal: {:.2}", principal);
    }

    // Accumulation rows carry the balance in `growth`
    let growth_label = match result.kind {
        ScenarioKind::Accumulation => "Balance",
        _ => "Growth",
    };

    println!(
        "{:>5} {:>16} {:>16} {:>16}",
        "Year", "Expense", growth_label, "End Principal"
    );
    println!("{}", "-".repeat(56));
    for row in &result.records {
        println!(
            "{:>5} {:>16.2} {:>16.2} {:>16.2}",
            row.year, row.expense, row.growth, row.end_principal
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Years: {}", summary.years);
    if result.kind != ScenarioKind::Accumulation {
        println!("  Total Withdrawn: {:.2}", summary.total_expense);
        println!("  Total Growth: {:.2}", summary.total_growth);
    }
    println!("  Final Principal: {:.2}", summary.final_principal);
    match (result.kind, summary.depletion_year) {
        (ScenarioKind::Depletion, Some(year)) => println!("  Depleted in year {}", year),
        (ScenarioKind::Depletion, None) if summary.years > 0 => {
            println!("  Not depleted within {} years", summary.years)
        }
        _ => {}
    }
}

fn print_sweep(points: &[SweepPoint], growth_rates: &[f64]) {
    print!("{:>8}", "r \\ g");
    for g in growth_rates {
        print!(" {:>14}", format!("{:.2}%", g * 100.0));
    }
    println!();

    for row in points.chunks(growth_rates.len().max(1)) {
        if let Some(first) = row.first() {
            print!("{:>8}", format!("{:.2}%", first.annual_return * 100.0));
        }
        for point in row {
            print!(" {:>14.0}", point.required_principal);
        }
        println!();
    }
}
