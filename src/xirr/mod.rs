//! XIRR: annualised money-weighted return of dated cash flows

mod cashflow;
mod config;
mod solver;

pub use cashflow::{CashFlow, load_cash_flows, load_cash_flows_from_reader};
pub use config::{XirrConfig, DEFAULT_GUESS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, RATE_FLOOR, RATE_CEILING};
pub use solver::{xirr, xirr_with_config, solve_xirr, xirr_batch, XirrFailure, XirrSolution, SolveMethod};

pub(crate) use cashflow::parse_date;
