//! Dated cash flows and loading them from CSV
//!
//! Sign convention: negative = money invested, positive = money returned.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl CashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }

    /// Money paid in; stored as a negative amount
    pub fn outflow(date: NaiveDate, amount: f64) -> Self {
        Self::new(date, -amount.abs())
    }

    /// Money received; stored as a positive amount
    pub fn inflow(date: NaiveDate, amount: f64) -> Self {
        Self::new(date, amount.abs())
    }
}

/// Raw CSV row: `date,amount`
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    amount: f64,
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Load cash flows from a CSV file with `date,amount` columns
pub fn load_cash_flows<P: AsRef<Path>>(path: P) -> Result<Vec<CashFlow>> {
    let file = std::fs::File::open(path)?;
    load_cash_flows_from_reader(file)
}

/// Load cash flows from any reader (e.g. stdin, string buffer)
pub fn load_cash_flows_from_reader<R: Read>(reader: R) -> Result<Vec<CashFlow>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut flows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        flows.push(CashFlow::new(parse_date(&row.date)?, row.amount));
    }

    Ok(flows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_helpers() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(CashFlow::outflow(d, 5000.0).amount, -5000.0);
        assert_eq!(CashFlow::outflow(d, -5000.0).amount, -5000.0);
        assert_eq!(CashFlow::inflow(d, -700.0).amount, 700.0);
    }

    #[test]
    fn test_load_from_reader() {
        let data = "date,amount\n2024-01-15,-5000\n2024-02-15,-5000.50\n2025-01-15,11000\n";
        let flows = load_cash_flows_from_reader(data.as_bytes()).unwrap();

        assert_eq!(flows.len(), 3);
        assert_eq!(flows[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(flows[1].amount, -5000.50);
        assert_eq!(flows[2].amount, 11000.0);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let data = "date,amount\n15/01/2024,-5000\n";
        let err = load_cash_flows_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidDate { ref value } if value == "15/01/2024"));
    }

    #[test]
    fn test_bad_amount_is_csv_error() {
        let data = "date,amount\n2024-01-15,lots\n";
        let err = load_cash_flows_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }
}
