//! Rolling-reinvestment portfolio: loans, issuance policy, simulator, records

mod loan;
mod policy;
mod simulator;
mod records;

pub use loan::{Loan, LoanCashflow, LoanId};
pub use policy::{IssuanceCaps, IssuancePolicy};
pub use simulator::{LoanPortfolio, PortfolioConfig};
pub use records::{PeriodRecord, SimulationResult, SimulationSummary};
