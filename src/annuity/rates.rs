//! Rate conversions: inflation-adjusted return, CAGR, gain percentage
//!
//! All inputs and outputs are percentages (6.0 = 6%).

/// Real (inflation-adjusted) annual return via the Fisher equation
pub fn real_return(nominal_return: f64, inflation_rate: f64) -> f64 {
    ((1.0 + nominal_return / 100.0) / (1.0 + inflation_rate / 100.0) - 1.0) * 100.0
}

/// Compound annual growth rate between two values.
///
/// Returns `None` when the starting value or the period is not positive.
pub fn cagr(begin_value: f64, end_value: f64, years: f64) -> Option<f64> {
    if begin_value <= 0.0 || years <= 0.0 {
        return None;
    }
    Some(((end_value / begin_value).powf(1.0 / years) - 1.0) * 100.0)
}

/// Absolute gain as a percentage of invested capital; 0 when nothing is invested
pub fn gain_percentage(gain: f64, invested: f64) -> f64 {
    if invested > 0.0 {
        gain / invested * 100.0
    } else {
        0.0
    }
}
