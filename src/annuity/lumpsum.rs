//! One-time (lumpsum) investments and the lumpsum-vs-SIP comparison

use serde::{Deserialize, Serialize};

use super::sip::{sip_future_value, FutureValueResult};

/// Future value of a single principal compounded annually.
///
/// No monthly conversion: `principal * (1 + rate/100)^years`.
pub fn lumpsum_future_value(principal: f64, annual_return_rate: f64, duration_years: u32) -> f64 {
    principal * (1.0 + annual_return_rate / 100.0).powf(f64::from(duration_years))
}

/// Investing the same total either up front or as a monthly SIP
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpsumComparison {
    pub sip: FutureValueResult,
    /// Lumpsum of `sip.total_investment` invested on day one
    pub lumpsum: FutureValueResult,
    /// `lumpsum.future_value - sip.future_value`
    pub lumpsum_advantage: f64,
}

/// Compare a monthly SIP with investing its total contribution as a lumpsum
pub fn compare_lumpsum_vs_sip(
    monthly_amount: f64,
    annual_return_rate: f64,
    duration_years: u32,
) -> LumpsumComparison {
    let sip = sip_future_value(monthly_amount, annual_return_rate, duration_years);
    let lumpsum_value =
        lumpsum_future_value(sip.total_investment, annual_return_rate, duration_years);
    let lumpsum = FutureValueResult::new(lumpsum_value, sip.total_investment);

    LumpsumComparison {
        sip,
        lumpsum,
        lumpsum_advantage: lumpsum.future_value - sip.future_value,
    }
}
