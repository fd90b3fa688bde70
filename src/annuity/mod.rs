//! Annuity engine: closed-form future values and required contributions
//!
//! All functions are pure and stateless. Rates are annual percentages
//! (12.0 = 12%), durations are whole years, contributions are monthly.

mod sip;
mod lumpsum;
mod step_up;
mod rates;
mod growth;

pub use sip::{sip_future_value, required_sip_amount, monthly_rate, ContributionPlan, FutureValueResult};
pub use lumpsum::{lumpsum_future_value, compare_lumpsum_vs_sip, LumpsumComparison};
pub use step_up::{
    step_up_sip_future_value, step_up_sip_future_value_with,
    StepUpPlan, StepUpResult, StepUpSchedule, StepUpConvention, YearlyBreakdownEntry,
};
pub use rates::{real_return, cagr, gain_percentage};
pub use growth::{sip_growth_series, sip_milestones, GrowthPoint};
