//! SIP Engine - time-value-of-money calculations for systematic investment plans
//!
//! This library provides:
//! - Level SIP future value and the required SIP for a target corpus
//! - Step-up SIP with a per-year breakdown
//! - Lumpsum growth, lumpsum-vs-SIP comparison, real return and CAGR
//! - XIRR (money-weighted return) for dated cash flows
//! - Portfolio KPIs from a transaction ledger
//!
//! Every calculation is a pure function of its inputs and safe to call from
//! any number of threads.

pub mod constants;
pub mod error;
pub mod hints;
pub mod annuity;
pub mod xirr;
pub mod portfolio;

// Re-export commonly used types
pub use error::{Error, Result};
pub use hints::InputHints;
pub use annuity::{
    sip_future_value, required_sip_amount, lumpsum_future_value, step_up_sip_future_value,
    real_return, ContributionPlan, FutureValueResult, StepUpPlan, StepUpResult, YearlyBreakdownEntry,
};
pub use xirr::{xirr, CashFlow, XirrConfig};
pub use portfolio::{PortfolioSummary, Transaction};
