//! Level monthly SIP: future value and the goal-based inverse
//!
//! Contributions are made at the start of each month (annuity-due), so every
//! instalment compounds one extra period compared with an ordinary annuity:
//!
//! ```text
//! FV = A * [((1 + r)^n - 1) / r] * (1 + r),   r = annual% / 100 / 12,  n = years * 12
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::MONTHS_IN_YEAR;

/// Future value of a contribution stream together with what was paid in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureValueResult {
    pub future_value: f64,
    pub total_investment: f64,
    /// `future_value - total_investment`
    pub capital_gains: f64,
}

impl FutureValueResult {
    pub(crate) fn new(future_value: f64, total_investment: f64) -> Self {
        Self {
            future_value,
            total_investment,
            capital_gains: future_value - total_investment,
        }
    }

    /// Gains as a percentage of the amount invested
    pub fn gain_percentage(&self) -> f64 {
        super::rates::gain_percentage(self.capital_gains, self.total_investment)
    }
}

/// A level monthly contribution plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionPlan {
    /// Monthly contribution
    pub monthly_amount: f64,
    /// Expected annual return, in percent (12.0 = 12%)
    pub annual_return_rate: f64,
    pub duration_years: u32,
}

impl ContributionPlan {
    pub fn new(monthly_amount: f64, annual_return_rate: f64, duration_years: u32) -> Self {
        Self {
            monthly_amount,
            annual_return_rate,
            duration_years,
        }
    }

    /// Saturates at `u32::MAX`
    pub fn total_months(&self) -> u32 {
        self.duration_years.saturating_mul(MONTHS_IN_YEAR)
    }

    pub fn future_value(&self) -> FutureValueResult {
        sip_future_value(self.monthly_amount, self.annual_return_rate, self.duration_years)
    }
}

/// Convert an annual percentage rate into a monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / MONTHS_IN_YEAR as f64
}

/// Month count for a whole number of years, in floating point so no duration overflows
pub(crate) fn months_in(years: u32) -> f64 {
    f64::from(years) * f64::from(MONTHS_IN_YEAR)
}

/// Accumulation factor of an annuity-due of 1 per period for `months` periods.
///
/// Callers must branch on `monthly_rate == 0` themselves.
pub(crate) fn annuity_due_factor(monthly_rate: f64, months: f64) -> f64 {
    let growth = (1.0 + monthly_rate).powf(months);
    ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate)
}

/// Future value of a level monthly SIP.
///
/// A zero rate returns the plain sum of contributions with zero gains. Negative
/// rates are accepted and yield a future value below the amount invested.
///
/// # Arguments
/// * `monthly_amount` - Contribution paid at the start of every month
/// * `annual_return_rate` - Expected annual return in percent (12.0 = 12%)
/// * `duration_years` - Length of the plan in whole years
///
/// # Returns
/// Future value, total amount invested and capital gains at the end of the plan
pub fn sip_future_value(
    monthly_amount: f64,
    annual_return_rate: f64,
    duration_years: u32,
) -> FutureValueResult {
    let rate = monthly_rate(annual_return_rate);
    let total_months = months_in(duration_years);
    let total_investment = monthly_amount * total_months;

    if rate == 0.0 {
        return FutureValueResult {
            future_value: total_investment,
            total_investment,
            capital_gains: 0.0,
        };
    }

    let future_value = monthly_amount * annuity_due_factor(rate, total_months);
    FutureValueResult::new(future_value, total_investment)
}

/// Monthly contribution needed to reach `target_corpus` (goal-based planning).
///
/// Exact inverse of [`sip_future_value`] for the same rate and duration.
///
/// # Arguments
/// * `target_corpus` - Amount wanted at the end of the plan
/// * `annual_return_rate` - Expected annual return in percent
/// * `duration_years` - Length of the plan in whole years
///
/// # Returns
/// The monthly contribution that grows to `target_corpus`. A zero duration
/// divides by zero months and yields an infinite or NaN amount.
pub fn required_sip_amount(target_corpus: f64, annual_return_rate: f64, duration_years: u32) -> f64 {
    let rate = monthly_rate(annual_return_rate);
    let total_months = months_in(duration_years);

    if rate == 0.0 {
        return target_corpus / total_months;
    }

    target_corpus / annuity_due_factor(rate, total_months)
}
