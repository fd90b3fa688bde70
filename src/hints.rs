//! Calculator input hints
//!
//! The engine computes any arithmetically valid input. These ranges mirror the
//! calculator sliders so front ends can flag unusual values.

use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_DURATION_YEARS, MAX_RETURN_RATE, MAX_SIP_AMOUNT, MIN_DURATION_YEARS, MIN_RETURN_RATE,
    MIN_SIP_AMOUNT,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputHints {
    pub min_amount: f64,
    pub max_amount: f64,
    pub min_years: u32,
    pub max_years: u32,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl Default for InputHints {
    fn default() -> Self {
        Self {
            min_amount: MIN_SIP_AMOUNT,
            max_amount: MAX_SIP_AMOUNT,
            min_years: MIN_DURATION_YEARS,
            max_years: MAX_DURATION_YEARS,
            min_rate: MIN_RETURN_RATE,
            max_rate: MAX_RETURN_RATE,
        }
    }
}

impl InputHints {
    /// Messages for every hint the inputs fall outside of; empty when all fit
    pub fn check(&self, monthly_amount: f64, annual_return_rate: f64, duration_years: u32) -> Vec<String> {
        let mut notes = Vec::new();

        if !(self.min_amount..=self.max_amount).contains(&monthly_amount) {
            notes.push(format!(
                "monthly amount {} outside {}..={}",
                monthly_amount, self.min_amount, self.max_amount
            ));
        }
        if !(self.min_rate..=self.max_rate).contains(&annual_return_rate) {
            notes.push(format!(
                "return rate {}% outside {}..={}%",
                annual_return_rate, self.min_rate, self.max_rate
            ));
        }
        if !(self.min_years..=self.max_years).contains(&duration_years) {
            notes.push(format!(
                "duration {} years outside {}..={}",
                duration_years, self.min_years, self.max_years
            ));
        }

        notes
    }
}
