//! Loanbook - rolling-reinvestment simulator for amortizing loan portfolios
//!
//! This library provides:
//! - Fixed-payment amortization schedules for single loans
//! - A lender income view with cumulative-since-inception accumulators
//! - A multi-loan portfolio simulator that redeploys repaid principal into
//!   new fixed-size loans under a pluggable issuance policy
//! - CSV export of period-level results and parallel batch runs

pub mod amortization;
pub mod portfolio;
pub mod error;
pub mod export;
pub mod batch;

// Re-export commonly used types
pub use amortization::{LenderView, LoanTerms, Schedule};
pub use error::LoanError;
pub use portfolio::{IssuanceCaps, IssuancePolicy, LoanPortfolio, PeriodRecord, PortfolioConfig};

use serde::Serializer;

/// Serialize a monetary amount rounded to cents.
///
/// Display rounding is fixed at two decimals; in-memory values stay at full
/// precision so accumulators never compound rounding error.
pub(crate) fn ser_cents<S: Serializer>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(amortization::round_cents(*amount))
}
