//! Dashboard KPIs for every portfolio in a transaction ledger
//!
//! Joins a ledger CSV (`portfolio_id,date,type,amount,status`) with a valuation
//! CSV (`portfolio_id,date,value`) and reports invested amount, current value,
//! gain and XIRR per portfolio plus block totals.
//! Solver settings come from XIRR_GUESS, XIRR_MAX_ITERATIONS, XIRR_TOLERANCE,
//! XIRR_BISECTION_FALLBACK.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use sip_engine::annuity::gain_percentage;
use sip_engine::portfolio::{
    load_ledger, load_valuations, summarize_portfolios, PortfolioInput, PortfolioReport,
};
use sip_engine::XirrConfig;

#[derive(Parser)]
#[command(name = "portfolio_kpis", about = "Portfolio KPIs from a transaction ledger")]
struct Args {
    /// Ledger CSV
    #[arg(long)]
    ledger: PathBuf,

    /// Valuations CSV
    #[arg(long)]
    valuations: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Totals {
    portfolio_count: usize,
    invested_amount: f64,
    current_value: f64,
    absolute_gain: f64,
    gain_percentage: f64,
    unsolved_xirr: usize,
}

#[derive(Serialize)]
struct Response<'a> {
    totals: Totals,
    portfolios: &'a [PortfolioReport],
    execution_time_ms: u64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let config = XirrConfig::from_env().context("reading XIRR_* settings")?;
    let ledger = load_ledger(&args.ledger)
        .with_context(|| format!("loading ledger {}", args.ledger.display()))?;
    let mut valuations = load_valuations(&args.valuations)
        .with_context(|| format!("loading valuations {}", args.valuations.display()))?;

    info!("Loaded {} portfolios in {:?}", ledger.len(), start.elapsed());

    let inputs: Vec<PortfolioInput> = ledger
        .into_iter()
        .filter_map(|(portfolio_id, transactions)| match valuations.remove(&portfolio_id) {
            Some(valuation) => Some(PortfolioInput {
                portfolio_id,
                transactions,
                valuation,
            }),
            None => {
                warn!("No valuation for portfolio {}, skipping", portfolio_id);
                None
            }
        })
        .collect();

    let reports = summarize_portfolios(&inputs, &config);

    let invested_amount: f64 = reports.iter().map(|r| r.summary.invested_amount).sum();
    let current_value: f64 = reports.iter().map(|r| r.summary.current_value).sum();
    let absolute_gain = current_value - invested_amount;
    let totals = Totals {
        portfolio_count: reports.len(),
        invested_amount,
        current_value,
        absolute_gain,
        gain_percentage: gain_percentage(absolute_gain, invested_amount),
        unsolved_xirr: reports.iter().filter(|r| r.summary.xirr.is_none()).count(),
    };

    if args.json {
        let response = Response {
            totals,
            portfolios: &reports,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    println!("{:<16} {:>14} {:>14} {:>14} {:>8} {:>9}", "Portfolio", "Invested", "Value", "Gain", "Gain%", "XIRR%");
    println!("{}", "-".repeat(80));
    for report in &reports {
        let s = &report.summary;
        let xirr = s.xirr.map_or_else(|| "n/a".to_string(), |rate| format!("{:.2}", rate));
        println!(
            "{:<16} {:>14.2} {:>14.2} {:>14.2} {:>8.2} {:>9}",
            report.portfolio_id, s.invested_amount, s.current_value, s.absolute_gain, s.gain_percentage, xirr
        );
    }

    println!("\nTotals ({} portfolios):", totals.portfolio_count);
    println!("  Invested: {:.2}", totals.invested_amount);
    println!("  Value:    {:.2}", totals.current_value);
    println!("  Gain:     {:.2} ({:.2}%)", totals.absolute_gain, totals.gain_percentage);
    if totals.unsolved_xirr > 0 {
        println!("  XIRR not solved for {} portfolios", totals.unsolved_xirr);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
