//! Portfolio KPIs from a transaction ledger and a current valuation

use chrono::NaiveDate;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;
use crate::annuity::gain_percentage;
use crate::xirr::{xirr_with_config, CashFlow, XirrConfig};

/// Market value of a portfolio on a given date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Headline figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub invested_amount: f64,
    pub current_value: f64,
    pub absolute_gain: f64,
    pub gain_percentage: f64,
    /// Annualised money-weighted return in percent, if the solver converged
    pub xirr: Option<f64>,
    pub settled_transactions: usize,
    pub first_investment: Option<NaiveDate>,
}

impl PortfolioSummary {
    /// Summarise settled transactions against `valuation`.
    ///
    /// XIRR treats every settled transaction as a dated flow and the valuation
    /// as a final inflow on its date.
    ///
    /// # Arguments
    /// * `transactions` - Ledger entries of one portfolio; unsettled ones are ignored
    /// * `valuation` - Market value and the date it was taken
    /// * `config` - Solver settings for the XIRR
    ///
    /// # Returns
    /// Dashboard figures. `xirr` is `None` with no settled transactions or when
    /// the solver fails.
    pub fn from_transactions(
        transactions: &[Transaction],
        valuation: Valuation,
        config: &XirrConfig,
    ) -> Self {
        let settled: Vec<&Transaction> = transactions.iter().filter(|tx| tx.is_settled()).collect();

        let invested_amount: f64 = settled.iter().map(|tx| tx.invested_delta()).sum();
        let absolute_gain = valuation.value - invested_amount;
        let first_investment = settled.iter().map(|tx| tx.date).min();

        let mut flows: Vec<CashFlow> = settled.iter().map(|tx| tx.to_cash_flow()).collect();
        let xirr = if flows.is_empty() {
            None
        } else {
            flows.push(CashFlow::new(valuation.date, valuation.value));
            xirr_with_config(&flows, config)
        };

        Self {
            invested_amount,
            current_value: valuation.value,
            absolute_gain,
            gain_percentage: gain_percentage(absolute_gain, invested_amount),
            xirr,
            settled_transactions: settled.len(),
            first_investment,
        }
    }
}

/// Everything needed to summarise one portfolio
#[derive(Debug, Clone)]
pub struct PortfolioInput {
    pub portfolio_id: String,
    pub transactions: Vec<Transaction>,
    pub valuation: Valuation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub portfolio_id: String,
    #[serde(flatten)]
    pub summary: PortfolioSummary,
}

/// Summarise many portfolios in parallel, preserving input order
pub fn summarize_portfolios(inputs: &[PortfolioInput], config: &XirrConfig) -> Vec<PortfolioReport> {
    info!("Summarising {} portfolios", inputs.len());

    inputs
        .par_iter()
        .map(|input| PortfolioReport {
            portfolio_id: input.portfolio_id.clone(),
            summary: PortfolioSummary::from_transactions(&input.transactions, input.valuation, config),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{TransactionKind, TransactionStatus};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_ledger() -> Vec<Transaction> {
        (1..=12).map(|m| Transaction::sip(ymd(2024, m, 1), 1000.0)).collect()
    }

    #[test]
    fn test_kpis_for_monthly_ledger() {
        let valuation = Valuation {
            date: ymd(2025, 1, 1),
            value: 13_000.0,
        };
        let summary =
            PortfolioSummary::from_transactions(&monthly_ledger(), valuation, &XirrConfig::default());

        assert_relative_eq!(summary.invested_amount, 12_000.0);
        assert_relative_eq!(summary.absolute_gain, 1_000.0);
        assert_relative_eq!(summary.gain_percentage, 8.333333, max_relative = 1e-6);
        assert_abs_diff_eq!(summary.xirr.unwrap(), 15.655170, epsilon = 1e-3);
        assert_eq!(summary.settled_transactions, 12);
        assert_eq!(summary.first_investment, Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn test_unsettled_transactions_are_ignored() {
        let mut ledger = monthly_ledger();
        ledger.push(Transaction::new(
            ymd(2024, 12, 15),
            TransactionKind::Sip,
            50_000.0,
            TransactionStatus::Failed,
        ));
        ledger.push(Transaction::new(
            ymd(2024, 12, 20),
            TransactionKind::Sip,
            50_000.0,
            TransactionStatus::Pending,
        ));
        let valuation = Valuation {
            date: ymd(2025, 1, 1),
            value: 13_000.0,
        };
        let summary = PortfolioSummary::from_transactions(&ledger, valuation, &XirrConfig::default());

        assert_relative_eq!(summary.invested_amount, 12_000.0);
        assert_eq!(summary.settled_transactions, 12);
    }

    #[test]
    fn test_refund_reduces_invested_amount() {
        let mut ledger = monthly_ledger();
        ledger.push(Transaction::new(
            ymd(2024, 6, 10),
            TransactionKind::Refund,
            1000.0,
            TransactionStatus::Success,
        ));
        let valuation = Valuation {
            date: ymd(2025, 1, 1),
            value: 12_000.0,
        };
        let summary = PortfolioSummary::from_transactions(&ledger, valuation, &XirrConfig::default());

        assert_relative_eq!(summary.invested_amount, 11_000.0);
        assert!(summary.xirr.unwrap() > 0.0);
    }

    #[test]
    fn test_empty_ledger() {
        let valuation = Valuation {
            date: ymd(2025, 1, 1),
            value: 0.0,
        };
        let summary = PortfolioSummary::from_transactions(&[], valuation, &XirrConfig::default());

        assert_eq!(summary.invested_amount, 0.0);
        assert_eq!(summary.gain_percentage, 0.0);
        assert!(summary.xirr.is_none());
        assert!(summary.first_investment.is_none());
    }

    #[test]
    fn test_batch_preserves_order() {
        let valuation = Valuation {
            date: ymd(2025, 1, 1),
            value: 13_000.0,
        };
        let inputs: Vec<PortfolioInput> = ["alpha", "beta", "gamma"]
            .iter()
            .map(|id| PortfolioInput {
                portfolio_id: id.to_string(),
                transactions: monthly_ledger(),
                valuation,
            })
            .collect();

        let reports = summarize_portfolios(&inputs, &XirrConfig::default());
        let ids: Vec<&str> = reports.iter().map(|r| r.portfolio_id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta", "gamma"]);
        assert_eq!(reports[0].summary, reports[2].summary);
    }
}
