//! Money-weighted rate of return (XIRR) for irregularly dated cash flows
//!
//! Newton-Raphson on the actual/365 NPV function:
//!
//! ```text
//! NPV(r)  = Σ a_i / (1 + r)^(t_i)
//! dNPV/dr = Σ -a_i * t_i / (1 + r)^(t_i + 1)        t_i = days since first flow / 365
//! ```
//!
//! The rate is clamped to [-99%, +1000%] after every step and the iteration
//! count is capped, so the solver always terminates. Failure is reported, never
//! an unconverged rate.

use log::{debug, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cashflow::CashFlow;
use super::config::{XirrConfig, RATE_CEILING, RATE_FLOOR};
use crate::constants::DAYS_IN_YEAR;

const BISECTION_MAX_ITERATIONS: u32 = 200;
const BISECTION_WIDTH_TOLERANCE: f64 = 1e-10;

/// Why the solver produced no rate
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum XirrFailure {
    #[error("XIRR needs at least 2 cash flows, got {count}")]
    InsufficientCashFlows { count: usize },

    #[error("NPV derivative vanished at iteration {iteration} (rate {rate})")]
    ZeroDerivative { iteration: u32, rate: f64 },

    #[error("no convergence after {iterations} iterations (last rate {last_rate})")]
    NotConverged { iterations: u32, last_rate: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMethod {
    NewtonRaphson,
    Bisection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XirrSolution {
    /// Annualised rate in percent (10.0 = 10%)
    pub rate_percent: f64,
    pub iterations: u32,
    pub method: SolveMethod,
}

/// XIRR in percent, or `None` when there are fewer than two flows or the
/// solver does not converge.
///
/// # Arguments
/// * `cash_flows` - Dated amounts in any order, negative for money invested
/// * `guess` - Starting rate as a decimal, 0.10 when `None`
///
/// # Returns
/// Annualised rate in percent, always within [-99, 1000]
pub fn xirr(cash_flows: &[CashFlow], guess: Option<f64>) -> Option<f64> {
    let config = guess.map(XirrConfig::with_guess).unwrap_or_default();
    xirr_with_config(cash_flows, &config)
}

pub fn xirr_with_config(cash_flows: &[CashFlow], config: &XirrConfig) -> Option<f64> {
    solve_xirr(cash_flows, config)
        .ok()
        .map(|solution| solution.rate_percent)
}

/// XIRR with the reason for failure when no rate is found.
///
/// Runs Newton-Raphson from `config.guess`, clamping every iterate to
/// [-0.99, 10]. When `config.bisection_fallback` is set, a failed Newton run is
/// retried by bisection over that band.
///
/// # Arguments
/// * `cash_flows` - Dated amounts in any order, negative for money invested
/// * `config` - Starting guess, iteration budget, tolerance and fallback switch
///
/// # Returns
/// * `Ok(XirrSolution)` - Rate in percent with the method and iteration count
/// * `Err(XirrFailure)` - Too few flows, a vanishing derivative or no convergence
pub fn solve_xirr(cash_flows: &[CashFlow], config: &XirrConfig) -> Result<XirrSolution, XirrFailure> {
    if cash_flows.len() < 2 {
        return Err(XirrFailure::InsufficientCashFlows {
            count: cash_flows.len(),
        });
    }

    let points = year_fractions(cash_flows);

    match newton_raphson(&points, config) {
        Ok(solution) => Ok(solution),
        Err(failure) if config.bisection_fallback => {
            debug!("XIRR Newton-Raphson failed ({}), trying bisection", failure);
            bisection(&points, config.tolerance).ok_or(failure)
        }
        Err(failure) => {
            debug!("XIRR failed: {}", failure);
            Err(failure)
        }
    }
}

/// XIRR for many independent cash-flow sets, computed in parallel
pub fn xirr_batch(sets: &[Vec<CashFlow>], config: &XirrConfig) -> Vec<Option<f64>> {
    sets.par_iter()
        .map(|flows| xirr_with_config(flows, config))
        .collect()
}

/// Sort by date and convert to (years since first flow, amount).
/// Day offsets are whole days.
fn year_fractions(cash_flows: &[CashFlow]) -> Vec<(f64, f64)> {
    let mut sorted = cash_flows.to_vec();
    sorted.sort_by_key(|cf| cf.date);

    let first_date = sorted[0].date;
    sorted
        .iter()
        .map(|cf| {
            let days = (cf.date - first_date).num_days();
            (days as f64 / DAYS_IN_YEAR, cf.amount)
        })
        .collect()
}

fn npv_and_derivative(points: &[(f64, f64)], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for &(t, amount) in points {
        npv += amount / (1.0 + rate).powf(t);
        dnpv -= amount * t / (1.0 + rate).powf(t + 1.0);
    }

    (npv, dnpv)
}

fn npv_at_rate(points: &[(f64, f64)], rate: f64) -> f64 {
    points
        .iter()
        .map(|&(t, amount)| amount / (1.0 + rate).powf(t))
        .sum()
}

fn newton_raphson(points: &[(f64, f64)], config: &XirrConfig) -> Result<XirrSolution, XirrFailure> {
    let mut rate = config.guess.clamp(RATE_FLOOR, RATE_CEILING);

    for iteration in 0..config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(points, rate);
        trace!("XIRR iteration {}: rate={} npv={} dnpv={}", iteration, rate, npv, dnpv);

        if npv.abs() < config.tolerance {
            debug!("XIRR converged to {} after {} iterations", rate, iteration + 1);
            return Ok(XirrSolution {
                rate_percent: rate * 100.0,
                iterations: iteration + 1,
                method: SolveMethod::NewtonRaphson,
            });
        }

        if dnpv.abs() < config.tolerance {
            return Err(XirrFailure::ZeroDerivative { iteration, rate });
        }

        rate = (rate - npv / dnpv).clamp(RATE_FLOOR, RATE_CEILING);

        if !rate.is_finite() {
            return Err(XirrFailure::NotConverged {
                iterations: iteration + 1,
                last_rate: rate,
            });
        }
    }

    Err(XirrFailure::NotConverged {
        iterations: config.max_iterations,
        last_rate: rate,
    })
}

/// Bracketing fallback over the full rate band; `None` when the NPV has the
/// same sign at both ends.
fn bisection(points: &[(f64, f64)], tolerance: f64) -> Option<XirrSolution> {
    let mut low = RATE_FLOOR;
    let mut high = RATE_CEILING;
    let mut npv_low = npv_at_rate(points, low);
    let npv_high = npv_at_rate(points, high);

    let bracket = npv_low * npv_high;
    if bracket.is_nan() || bracket > 0.0 {
        return None;
    }

    for iteration in 0..BISECTION_MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(points, mid);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < BISECTION_WIDTH_TOLERANCE {
            debug!("XIRR bisection converged to {} after {} iterations", mid, iteration + 1);
            return Some(XirrSolution {
                rate_percent: mid * 100.0,
                iterations: iteration + 1,
                method: SolveMethod::Bisection,
            });
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}
