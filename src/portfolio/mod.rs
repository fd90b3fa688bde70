//! Dashboard KPIs computed from a real transaction ledger
//!
//! Current value comes from a supplied valuation; the engine does not price
//! holdings itself.

mod transaction;
mod summary;
pub mod loader;

pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use summary::{PortfolioSummary, PortfolioInput, PortfolioReport, Valuation, summarize_portfolios};
pub use loader::{load_ledger, load_ledger_from_reader, load_valuations, load_valuations_from_reader, Ledger};
