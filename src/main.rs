//! SIP calculator CLI
//!
//! Command-line front end for every engine calculation. Pass `--json` to get
//! machine-readable output; set RUST_LOG=debug to see solver diagnostics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::warn;
use serde::Serialize;

use sip_engine::annuity::{
    cagr, compare_lumpsum_vs_sip, lumpsum_future_value, real_return, required_sip_amount,
    sip_future_value, sip_growth_series, sip_milestones, step_up_sip_future_value_with,
    StepUpConvention, StepUpPlan,
};
use sip_engine::xirr::{load_cash_flows, solve_xirr, XirrConfig};
use sip_engine::InputHints;

#[derive(Parser)]
#[command(name = "sip-calc", version, about = "Systematic investment plan calculators")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Future value of a level monthly SIP
    Sip {
        #[arg(long)]
        amount: f64,
        /// Expected annual return in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        /// Also print the year-by-year growth series
        #[arg(long)]
        series: bool,
    },
    /// Future value of a one-time investment
    Lumpsum {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
    },
    /// Monthly SIP needed to reach a target corpus
    Goal {
        #[arg(long)]
        target: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
    },
    /// SIP whose monthly amount rises every year
    StepUp {
        #[arg(long)]
        amount: f64,
        /// Annual increase of the monthly amount in percent
        #[arg(long)]
        increase: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        /// Value each year's twelve payments as a block compounded to the end of the plan
        #[arg(long)]
        year_block: bool,
        /// Write the yearly breakdown to a CSV file
        #[arg(long = "csv", value_name = "PATH")]
        csv_path: Option<PathBuf>,
    },
    /// Lumpsum vs SIP for the same total investment
    Compare {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
    },
    /// XIRR of dated cash flows from a `date,amount` CSV file
    Xirr {
        file: PathBuf,
        /// Starting rate as a decimal (overrides XIRR_GUESS)
        #[arg(long)]
        guess: Option<f64>,
    },
    /// Inflation-adjusted return
    RealReturn {
        #[arg(long)]
        nominal: f64,
        #[arg(long)]
        inflation: f64,
    },
    /// Compound annual growth rate between two values
    Cagr {
        #[arg(long)]
        begin: f64,
        #[arg(long)]
        end: f64,
        #[arg(long)]
        years: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json;

    match cli.command {
        Command::Sip { amount, rate, years, series } => {
            warn_on_hints(amount, rate, years);
            let result = sip_future_value(amount, rate, years);
            let milestones = sip_milestones(amount, rate, years);

            if json {
                #[derive(Serialize)]
                struct Output<'a> {
                    #[serde(flatten)]
                    result: &'a sip_engine::FutureValueResult,
                    gain_percentage: f64,
                    milestones: &'a [(u32, f64)],
                    #[serde(skip_serializing_if = "Option::is_none")]
                    series: Option<Vec<sip_engine::annuity::GrowthPoint>>,
                }
                let output = Output {
                    result: &result,
                    gain_percentage: result.gain_percentage(),
                    milestones: &milestones,
                    series: series.then(|| sip_growth_series(amount, rate, years)),
                };
                return print_json(&output);
            }

            println!("SIP of {:.2}/month at {}% for {} years", amount, rate, years);
            println!("  Total Investment: {:.2}", result.total_investment);
            println!("  Future Value:     {:.2}", result.future_value);
            println!("  Capital Gains:    {:.2} ({:.1}%)", result.capital_gains, result.gain_percentage());

            if !milestones.is_empty() {
                println!("\nMilestones:");
                for (year, value) in &milestones {
                    println!("  Year {:>2}: {:.2}", year, value);
                }
            }

            if series {
                println!("\n{:>4} {:>16} {:>16} {:>16}", "Year", "Invested", "Value", "Gains");
                println!("{}", "-".repeat(55));
                for point in sip_growth_series(amount, rate, years) {
                    println!("{:>4} {:>16.2} {:>16.2} {:>16.2}", point.year, point.invested, point.value, point.gains);
                }
            }
        }

        Command::Lumpsum { principal, rate, years } => {
            let value = lumpsum_future_value(principal, rate, years);
            if json {
                return print_json(&serde_json::json!({ "future_value": value }));
            }
            println!("Lumpsum of {:.2} at {}% for {} years: {:.2}", principal, rate, years, value);
        }

        Command::Goal { target, rate, years } => {
            let amount = required_sip_amount(target, rate, years);
            warn_on_hints(amount, rate, years);
            if json {
                return print_json(&serde_json::json!({ "monthly_amount": amount }));
            }
            println!("To reach {:.2} in {} years at {}%: invest {:.2}/month", target, years, rate, amount);
        }

        Command::StepUp { amount, increase, rate, years, year_block, csv_path } => {
            warn_on_hints(amount, rate, years);
            let convention = if year_block {
                StepUpConvention::YearBlock
            } else {
                StepUpConvention::RemainingHorizon
            };
            let plan = StepUpPlan::new(amount, increase, rate, years);
            let result = step_up_sip_future_value_with(plan, convention);

            if let Some(path) = csv_path {
                let mut writer = csv::Writer::from_path(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                for row in &result.yearly_breakdown {
                    writer.serialize(row)?;
                }
                writer.flush()?;
                if !json {
                    println!("Breakdown written to: {}", path.display());
                }
            }

            if json {
                return print_json(&result);
            }

            println!("{:>4} {:>12} {:>14} {:>16} {:>16}", "Year", "Monthly", "Yearly", "Cumulative", "Value");
            println!("{}", "-".repeat(66));
            for row in &result.yearly_breakdown {
                println!(
                    "{:>4} {:>12.2} {:>14.2} {:>16.2} {:>16.2}",
                    row.year, row.monthly_amount, row.yearly_investment, row.cumulative_investment, row.year_end_value
                );
            }
            println!("\n  Total Investment: {:.2}", result.total_investment);
            println!("  Future Value:     {:.2}", result.future_value);
            println!("  Capital Gains:    {:.2}", result.capital_gains);
        }

        Command::Compare { amount, rate, years } => {
            warn_on_hints(amount, rate, years);
            let comparison = compare_lumpsum_vs_sip(amount, rate, years);
            if json {
                return print_json(&comparison);
            }
            println!("Investing {:.2} over {} years at {}%", comparison.sip.total_investment, years, rate);
            println!("  As SIP:     {:.2}", comparison.sip.future_value);
            println!("  As lumpsum: {:.2}", comparison.lumpsum.future_value);
            println!("  Difference: {:.2}", comparison.lumpsum_advantage);
        }

        Command::Xirr { file, guess } => {
            let mut config = XirrConfig::from_env().context("reading XIRR_* settings")?;
            if let Some(guess) = guess {
                config.guess = guess;
            }
            let flows = load_cash_flows(&file)
                .with_context(|| format!("loading cash flows from {}", file.display()))?;

            match solve_xirr(&flows, &config) {
                Ok(solution) if json => return print_json(&solution),
                Ok(solution) => println!(
                    "XIRR: {:.4}% ({:?}, {} iterations)",
                    solution.rate_percent, solution.method, solution.iterations
                ),
                Err(failure) if json => {
                    return print_json(&serde_json::json!({ "rate_percent": null, "reason": failure.to_string() }))
                }
                Err(failure) => println!("Could not calculate XIRR: {}", failure),
            }
        }

        Command::RealReturn { nominal, inflation } => {
            let real = real_return(nominal, inflation);
            if json {
                return print_json(&serde_json::json!({ "real_return": real }));
            }
            println!("Real return: {:.4}%", real);
        }

        Command::Cagr { begin, end, years } => {
            let rate = cagr(begin, end, years);
            if json {
                return print_json(&serde_json::json!({ "cagr": rate }));
            }
            match rate {
                Some(rate) => println!("CAGR: {:.4}%", rate),
                None => println!("CAGR undefined for a non-positive start value or period"),
            }
        }
    }

    Ok(())
}

fn warn_on_hints(amount: f64, rate: f64, years: u32) {
    for note in InputHints::default().check(amount, rate, years) {
        warn!("{}", note);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
