//! Load transaction ledgers and valuations from CSV
//!
//! Ledger columns: `portfolio_id,date,type,amount,status` (status defaults to SUCCESS)
//! Valuation columns: `portfolio_id,date,value`

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::Reader;

use super::summary::Valuation;
use super::transaction::{Transaction, TransactionKind, TransactionStatus};
use crate::error::Result;
use crate::xirr::parse_date;

#[derive(Debug, serde::Deserialize)]
struct LedgerRow {
    portfolio_id: String,
    date: String,
    #[serde(rename = "type")]
    kind: String,
    amount: f64,
    #[serde(default)]
    status: Option<String>,
}

impl LedgerRow {
    fn into_transaction(self) -> Result<(String, Transaction)> {
        let status = match self.status.as_deref() {
            Some(s) if !s.trim().is_empty() => s.parse::<TransactionStatus>()?,
            _ => TransactionStatus::default(),
        };
        let kind = self.kind.parse::<TransactionKind>()?;
        let transaction = Transaction::new(parse_date(&self.date)?, kind, self.amount, status);
        Ok((self.portfolio_id, transaction))
    }
}

#[derive(Debug, serde::Deserialize)]
struct ValuationRow {
    portfolio_id: String,
    date: String,
    value: f64,
}

/// Transactions grouped by portfolio id, in file order within each portfolio
pub type Ledger = BTreeMap<String, Vec<Transaction>>;

pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<Ledger> {
    let file = std::fs::File::open(path)?;
    load_ledger_from_reader(file)
}

pub fn load_ledger_from_reader<R: Read>(reader: R) -> Result<Ledger> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut ledger = Ledger::new();

    for result in csv_reader.deserialize() {
        let row: LedgerRow = result?;
        let (portfolio_id, transaction) = row.into_transaction()?;
        ledger.entry(portfolio_id).or_default().push(transaction);
    }

    Ok(ledger)
}

/// Latest valuation per portfolio; later rows for the same id replace earlier ones
pub fn load_valuations<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, Valuation>> {
    let file = std::fs::File::open(path)?;
    load_valuations_from_reader(file)
}

pub fn load_valuations_from_reader<R: Read>(reader: R) -> Result<BTreeMap<String, Valuation>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut valuations = BTreeMap::new();

    for result in csv_reader.deserialize() {
        let row: ValuationRow = result?;
        let valuation = Valuation {
            date: parse_date(&row.date)?,
            value: row.value,
        };
        valuations.insert(row.portfolio_id, valuation);
    }

    Ok(valuations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_load_ledger_groups_by_portfolio() {
        let data = "\
portfolio_id,date,type,amount,status
p1,2024-01-15,SIP,5000,SUCCESS
p2,2024-01-20,SIP,2000,PENDING
p1,2024-02-15,SIP,5000,
p1,2024-03-01,REFUND,1000,SUCCESS
";
        let ledger = load_ledger_from_reader(data.as_bytes()).unwrap();

        assert_eq!(ledger.len(), 2);
        let p1 = &ledger["p1"];
        assert_eq!(p1.len(), 3);
        assert_eq!(p1[1].status, TransactionStatus::Success);
        assert_eq!(p1[2].kind, TransactionKind::Refund);
        assert_eq!(ledger["p2"][0].status, TransactionStatus::Pending);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let data = "portfolio_id,date,type,amount,status\np1,2024-01-15,BONUS,5000,SUCCESS\n";
        let err = load_ledger_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::UnknownTransactionType(ref t) if t == "BONUS"));
    }

    #[test]
    fn test_latest_valuation_wins() {
        let data = "portfolio_id,date,value\np1,2024-12-31,10000\np1,2025-01-31,10500\n";
        let valuations = load_valuations_from_reader(data.as_bytes()).unwrap();

        assert_eq!(valuations.len(), 1);
        assert_eq!(valuations["p1"].value, 10500.0);
    }
}
