//! Ledger transactions and their effect on invested capital

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::xirr::CashFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Scheduled SIP debit (money invested)
    Sip,
    /// Money returned to the investor
    Refund,
    /// Signed manual correction to invested capital
    Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionStatus {
    #[default]
    Success,
    Failed,
    Pending,
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SIP" => Ok(Self::Sip),
            "REFUND" => Ok(Self::Refund),
            "ADJUSTMENT" => Ok(Self::Adjustment),
            _ => Err(Error::UnknownTransactionType(s.to_string())),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            "PENDING" => Ok(Self::Pending),
            _ => Err(Error::UnknownTransactionStatus(s.to_string())),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sip => "SIP",
            Self::Refund => "REFUND",
            Self::Adjustment => "ADJUSTMENT",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: f64,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(date: NaiveDate, kind: TransactionKind, amount: f64, status: TransactionStatus) -> Self {
        Self {
            date,
            kind,
            amount,
            status,
        }
    }

    /// A settled SIP debit
    pub fn sip(date: NaiveDate, amount: f64) -> Self {
        Self::new(date, TransactionKind::Sip, amount, TransactionStatus::Success)
    }

    /// Only settled transactions move money
    pub fn is_settled(&self) -> bool {
        self.status == TransactionStatus::Success
    }

    /// Signed change to invested capital
    pub fn invested_delta(&self) -> f64 {
        match self.kind {
            TransactionKind::Sip => self.amount.abs(),
            TransactionKind::Refund => -self.amount.abs(),
            TransactionKind::Adjustment => self.amount,
        }
    }

    /// Investor's view: investments are outflows, refunds inflows
    pub fn to_cash_flow(&self) -> CashFlow {
        CashFlow::new(self.date, -self.invested_delta())
    }
}
