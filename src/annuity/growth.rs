//! Year-by-year growth of a level SIP, as plotted by the calculator

use serde::{Deserialize, Serialize};

use super::sip::sip_future_value;
use crate::constants::MILESTONE_YEARS;

/// Value of a level SIP had it stopped after `year` years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: u32,
    pub invested: f64,
    pub value: f64,
    pub gains: f64,
}

/// One point per year `1..=duration_years`
pub fn sip_growth_series(
    monthly_amount: f64,
    annual_return_rate: f64,
    duration_years: u32,
) -> Vec<GrowthPoint> {
    (1..=duration_years)
        .map(|year| {
            let result = sip_future_value(monthly_amount, annual_return_rate, year);
            GrowthPoint {
                year,
                invested: result.total_investment,
                value: result.future_value,
                gains: result.capital_gains,
            }
        })
        .collect()
}

/// Future value at each milestone year that falls within the plan
pub fn sip_milestones(
    monthly_amount: f64,
    annual_return_rate: f64,
    duration_years: u32,
) -> Vec<(u32, f64)> {
    MILESTONE_YEARS
        .iter()
        .copied()
        .filter(|&year| year <= duration_years)
        .map(|year| {
            (year, sip_future_value(monthly_amount, annual_return_rate, year).future_value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_series_ends_at_full_plan_value() {
        let series = sip_growth_series(5000.0, 12.0, 15);
        assert_eq!(series.len(), 15);
        assert_eq!(series[0].year, 1);

        let last = series.last().unwrap();
        assert_eq!(last.year, 15);
        assert_relative_eq!(last.value, sip_future_value(5000.0, 12.0, 15).future_value);
        assert_relative_eq!(last.invested, 900_000.0);
    }

    #[test]
    fn test_series_values_increase() {
        let series = sip_growth_series(1000.0, 8.0, 20);
        for pair in series.windows(2) {
            assert!(pair[1].value > pair[0].value);
            assert!(pair[1].gains > pair[0].gains);
        }
    }

    #[test]
    fn test_milestones_within_duration() {
        let milestones = sip_milestones(5000.0, 12.0, 17);
        let years: Vec<u32> = milestones.iter().map(|(y, _)| *y).collect();
        assert_eq!(years, vec![5, 10, 15]);

        assert!(sip_milestones(5000.0, 12.0, 4).is_empty());
        assert_eq!(sip_milestones(5000.0, 12.0, 40).len(), 6);
    }
}
