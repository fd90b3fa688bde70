//! Step-up SIP: the monthly contribution rises by a fixed percentage every year
//!
//! Each year's monthly amount is valued separately as an annuity-due running from
//! the start of that year to the end of the plan, then summed. The per-year rows
//! are produced by [`StepUpSchedule`], a finite iterator that
//! [`step_up_sip_future_value`] drains.
//!
//! `year_end_value` in each row is the running sum of the projected end-of-plan
//! values of all years so far, not a mark-to-market value at that year end.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use super::sip::{annuity_due_factor, monthly_rate, months_in};
use crate::constants::MONTHS_IN_YEAR;

/// How one year's contributions are carried to the end of the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepUpConvention {
    /// The year's amount is treated as an annuity-due running for every month
    /// left in the plan, `(duration - year + 1) * 12`.
    #[default]
    RemainingHorizon,
    /// Twelve annuity-due payments, then compounded over the years left.
    /// With no step-up this reproduces the level SIP future value.
    YearBlock,
}

/// A monthly SIP whose contribution is increased once per year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepUpPlan {
    pub initial_amount: f64,
    /// Annual increase of the monthly contribution, in percent
    pub annual_increase_percent: f64,
    /// Expected annual return, in percent
    pub annual_return_rate: f64,
    pub duration_years: u32,
}

impl StepUpPlan {
    pub fn new(
        initial_amount: f64,
        annual_increase_percent: f64,
        annual_return_rate: f64,
        duration_years: u32,
    ) -> Self {
        Self {
            initial_amount,
            annual_increase_percent,
            annual_return_rate,
            duration_years,
        }
    }

    /// Monthly contribution during `year` (1-based)
    pub fn amount_in_year(&self, year: u32) -> f64 {
        let growth = 1.0 + self.annual_increase_percent / 100.0;
        self.initial_amount * growth.powf(f64::from(year.saturating_sub(1)))
    }

    pub fn schedule(&self) -> StepUpSchedule {
        StepUpSchedule::new(*self, StepUpConvention::default())
    }

    pub fn future_value(&self) -> StepUpResult {
        StepUpResult::from_schedule(self.schedule())
    }
}

/// One row of the step-up breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyBreakdownEntry {
    /// 1-based
    pub year: u32,
    pub monthly_amount: f64,
    pub yearly_investment: f64,
    pub cumulative_investment: f64,
    /// Running sum of projected end-of-plan values for years `1..=year`
    pub year_end_value: f64,
}

/// Step-up SIP totals plus the per-year breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepUpResult {
    pub future_value: f64,
    pub total_investment: f64,
    pub capital_gains: f64,
    pub yearly_breakdown: Vec<YearlyBreakdownEntry>,
}

impl StepUpResult {
    fn from_schedule(schedule: StepUpSchedule) -> Self {
        let yearly_breakdown: Vec<YearlyBreakdownEntry> = schedule.collect();
        let (future_value, total_investment) = yearly_breakdown
            .last()
            .map(|row| (row.year_end_value, row.cumulative_investment))
            .unwrap_or((0.0, 0.0));

        Self {
            future_value,
            total_investment,
            capital_gains: future_value - total_investment,
            yearly_breakdown,
        }
    }
}

/// Lazily yields one [`YearlyBreakdownEntry`] per plan year, in order
#[derive(Debug, Clone)]
pub struct StepUpSchedule {
    monthly_rate: f64,
    step_up: f64,
    convention: StepUpConvention,
    next_year: u32,
    years_left: u32,
    current_amount: f64,
    cumulative_investment: f64,
    running_value: f64,
}

impl StepUpSchedule {
    pub fn new(plan: StepUpPlan, convention: StepUpConvention) -> Self {
        Self {
            monthly_rate: monthly_rate(plan.annual_return_rate),
            step_up: plan.annual_increase_percent / 100.0,
            convention,
            next_year: 1,
            years_left: plan.duration_years,
            current_amount: plan.initial_amount,
            cumulative_investment: 0.0,
            running_value: 0.0,
        }
    }

    /// Value at the end of the plan of one year's contributions
    fn year_value(&self, months_remaining: f64, yearly_investment: f64) -> f64 {
        let r = self.monthly_rate;
        if r == 0.0 {
            return yearly_investment;
        }

        match self.convention {
            StepUpConvention::YearBlock => {
                let year_months = f64::from(MONTHS_IN_YEAR);
                self.current_amount
                    * annuity_due_factor(r, year_months)
                    * (1.0 + r).powf(months_remaining - year_months)
            }
            StepUpConvention::RemainingHorizon => {
                self.current_amount * annuity_due_factor(r, months_remaining)
            }
        }
    }
}

impl Iterator for StepUpSchedule {
    type Item = YearlyBreakdownEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.years_left == 0 {
            return None;
        }
        let year = self.next_year;

        let yearly_investment = self.current_amount * f64::from(MONTHS_IN_YEAR);
        self.cumulative_investment += yearly_investment;

        let months_remaining = months_in(self.years_left);
        self.running_value += self.year_value(months_remaining, yearly_investment);

        let row = YearlyBreakdownEntry {
            year,
            monthly_amount: self.current_amount,
            yearly_investment,
            cumulative_investment: self.cumulative_investment,
            year_end_value: self.running_value,
        };

        self.current_amount *= 1.0 + self.step_up;
        self.next_year = self.next_year.saturating_add(1);
        self.years_left -= 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.years_left as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for StepUpSchedule {}

impl FusedIterator for StepUpSchedule {}

/// Future value of a step-up SIP with its yearly breakdown.
///
/// Uses [`StepUpConvention::RemainingHorizon`]: year `y`'s monthly amount is
/// valued as a level SIP over the `duration_years - y + 1` years left.
///
/// # Arguments
/// * `initial_amount` - Monthly contribution in the first year
/// * `annual_increase_percent` - Rise of the monthly contribution after every year
/// * `annual_return_rate` - Expected annual return in percent
/// * `duration_years` - Length of the plan in whole years
///
/// # Returns
/// Totals plus one [`YearlyBreakdownEntry`] per year
pub fn step_up_sip_future_value(
    initial_amount: f64,
    annual_increase_percent: f64,
    annual_return_rate: f64,
    duration_years: u32,
) -> StepUpResult {
    StepUpPlan::new(initial_amount, annual_increase_percent, annual_return_rate, duration_years)
        .future_value()
}

/// Same as [`step_up_sip_future_value`] under an explicit convention
pub fn step_up_sip_future_value_with(
    plan: StepUpPlan,
    convention: StepUpConvention,
) -> StepUpResult {
    StepUpResult::from_schedule(StepUpSchedule::new(plan, convention))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annuity::sip::sip_future_value;
    use approx::assert_relative_eq;

    #[test]
    fn test_year_block_without_step_up_matches_level_sip() {
        for years in 1..=40 {
            for rate in [0.0, 4.0, 12.0, 25.0] {
                let plan = StepUpPlan::new(5000.0, 0.0, rate, years);
                let step_up = step_up_sip_future_value_with(plan, StepUpConvention::YearBlock);
                let level = sip_future_value(5000.0, rate, years);
                assert_relative_eq!(step_up.future_value, level.future_value, max_relative = 1e-9);
                assert_relative_eq!(step_up.total_investment, level.total_investment);
            }
        }
    }

    #[test]
    fn test_default_sums_level_sips_over_remaining_years() {
        for (amount, increase, rate, years) in [(5000.0, 10.0, 12.0, 3), (2000.0, 7.5, 9.0, 20)] {
            let result = step_up_sip_future_value(amount, increase, rate, years);
            let plan = StepUpPlan::new(amount, increase, rate, years);

            let expected: f64 = (1..=years)
                .map(|year| sip_future_value(plan.amount_in_year(year), rate, years - year + 1).future_value)
                .sum();
            assert_relative_eq!(result.future_value, expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_three_year_breakdown() {
        let result = step_up_sip_future_value(5000.0, 10.0, 12.0, 3);
        let rows = &result.yearly_breakdown;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].year, 1);
        assert_relative_eq!(rows[0].monthly_amount, 5000.0);
        assert_relative_eq!(rows[1].monthly_amount, 5500.0);
        assert_relative_eq!(rows[2].monthly_amount, 6050.0, max_relative = 1e-12);

        assert_relative_eq!(rows[0].cumulative_investment, 60_000.0);
        assert_relative_eq!(rows[1].cumulative_investment, 126_000.0);
        assert_relative_eq!(rows[2].cumulative_investment, 198_600.0, max_relative = 1e-12);

        // First year's amount runs as a 36-month annuity-due
        assert_relative_eq!(
            rows[0].year_end_value,
            sip_future_value(5000.0, 12.0, 3).future_value,
            max_relative = 1e-12
        );
        assert_relative_eq!(rows[1].year_end_value, 367_375.8330, max_relative = 1e-9);
        assert_relative_eq!(rows[2].year_end_value, 444_872.2676, max_relative = 1e-9);

        assert_relative_eq!(result.future_value, rows[2].year_end_value);
        assert_relative_eq!(result.total_investment, 198_600.0, max_relative = 1e-12);
        assert_relative_eq!(
            result.capital_gains,
            result.future_value - result.total_investment
        );
    }

    #[test]
    fn test_year_block_convention() {
        let plan = StepUpPlan::new(5000.0, 10.0, 12.0, 3);
        let result = step_up_sip_future_value_with(plan, StepUpConvention::YearBlock);
        let rows = &result.yearly_breakdown;

        // Running sum of each year's projected end-of-plan value
        assert_relative_eq!(rows[0].year_end_value, 81_322.2382, max_relative = 1e-9);
        assert_relative_eq!(rows[1].year_end_value, 160_708.5312, max_relative = 1e-9);
        assert_relative_eq!(rows[2].year_end_value, 238_204.9659, max_relative = 1e-9);
        assert_relative_eq!(result.future_value, rows[2].year_end_value);
    }

    #[test]
    fn test_cumulative_investment_never_decreases() {
        let result = step_up_sip_future_value(2000.0, 15.0, 11.0, 25);
        for pair in result.yearly_breakdown.windows(2) {
            assert!(pair[1].cumulative_investment >= pair[0].cumulative_investment);
            assert_eq!(pair[1].year, pair[0].year + 1);
        }
    }

    #[test]
    fn test_zero_rate_counts_contributions_only() {
        let result = step_up_sip_future_value(1000.0, 10.0, 0.0, 2);
        assert_relative_eq!(result.total_investment, 12_000.0 + 13_200.0, max_relative = 1e-12);
        assert_relative_eq!(result.future_value, result.total_investment);
        assert_relative_eq!(result.capital_gains, 0.0);
    }

    #[test]
    fn test_zero_duration_is_empty() {
        let result = step_up_sip_future_value(1000.0, 10.0, 12.0, 0);
        assert!(result.yearly_breakdown.is_empty());
        assert_eq!(result.future_value, 0.0);
        assert_eq!(result.total_investment, 0.0);
    }

    #[test]
    fn test_schedule_handles_max_duration() {
        let plan = StepUpPlan::new(1000.0, 5.0, 10.0, u32::MAX);
        let mut schedule = plan.schedule();
        assert_eq!(schedule.len(), u32::MAX as usize);

        assert_eq!(schedule.next().map(|row| row.year), Some(1));
        assert_eq!(schedule.len(), u32::MAX as usize - 1);
    }

    #[test]
    fn test_schedule_is_finite_and_sized() {
        let plan = StepUpPlan::new(1000.0, 5.0, 10.0, 4);
        let mut schedule = plan.schedule();
        assert_eq!(schedule.len(), 4);

        schedule.next();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.by_ref().count(), 3);
        assert!(schedule.next().is_none());
    }

    #[test]
    fn test_amount_in_year_matches_schedule() {
        let plan = StepUpPlan::new(4000.0, 8.0, 12.0, 10);
        for row in plan.schedule() {
            assert_relative_eq!(row.monthly_amount, plan.amount_in_year(row.year), max_relative = 1e-12);
        }
    }
}
