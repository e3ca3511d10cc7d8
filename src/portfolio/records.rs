//! Period-level output records for portfolio simulations

use serde::{Deserialize, Serialize};

/// One period of portfolio output. Immutable once produced; field order is
/// stable and matches the exported CSV header order.
///
/// Monetary values are full precision in memory and rounded to cents on
/// serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Period index, 1-based
    #[serde(rename = "Period")]
    pub period: u32,

    /// Total payments collected across all active loans this period
    #[serde(rename = "Payment Received", serialize_with = "crate::ser_cents")]
    pub payment_received: f64,

    /// Interest portion of this period's collections
    #[serde(rename = "Interest Income", serialize_with = "crate::ser_cents")]
    pub interest_income: f64,

    /// Principal portion of this period's collections
    #[serde(rename = "Principal Repaid", serialize_with = "crate::ser_cents")]
    pub principal_repaid: f64,

    /// Loans still active after this period's payoffs and issuances
    #[serde(rename = "Active Loans")]
    pub active_loans: usize,

    /// Loans newly issued this period
    #[serde(rename = "Loans Issued This Period")]
    pub loans_issued: u32,

    /// Aggregate balance outstanding across all active loans
    #[serde(rename = "Outstanding Balance", serialize_with = "crate::ser_cents")]
    pub outstanding_balance: f64,

    /// Repayment cash on hand, below one loan's principal after issuance
    #[serde(rename = "Cash Available for Loans", serialize_with = "crate::ser_cents")]
    pub cash_available: f64,

    /// Interest income accumulated since inception
    #[serde(rename = "Cumulative Interest", serialize_with = "crate::ser_cents")]
    pub cumulative_interest: f64,

    /// Payments accumulated since inception
    #[serde(rename = "Cumulative Payment", serialize_with = "crate::ser_cents")]
    pub cumulative_payment: f64,

    /// Loans issued since inception, counting the seed loan
    #[serde(rename = "Total Loans Issued")]
    pub total_loans_issued: u32,
}

impl std::fmt::Display for PeriodRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>6} {:>14.2} {:>12.2} {:>14.2} {:>7} {:>7} {:>16.2} {:>14.2}",
            self.period,
            self.payment_received,
            self.interest_income,
            self.principal_repaid,
            self.active_loans,
            self.total_loans_issued,
            self.outstanding_balance,
            self.cash_available,
        )
    }
}

/// Full simulation output: the ordered period records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    pub records: Vec<PeriodRecord>,
}

impl SimulationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: PeriodRecord) {
        self.records.push(record);
    }

    /// Summary statistics over the whole run
    pub fn summary(&self) -> SimulationSummary {
        let total_collected: f64 = self.records.iter().map(|r| r.payment_received).sum();
        let total_interest: f64 = self.records.iter().map(|r| r.interest_income).sum();
        let total_principal: f64 = self.records.iter().map(|r| r.principal_repaid).sum();

        let last = self.records.last();

        SimulationSummary {
            total_periods: self.records.len() as u32,
            total_collected,
            total_interest,
            total_principal,
            total_loans_issued: last.map(|r| r.total_loans_issued).unwrap_or(0),
            final_active_loans: last.map(|r| r.active_loans).unwrap_or(0),
            final_outstanding_balance: last.map(|r| r.outstanding_balance).unwrap_or(0.0),
            final_cash_available: last.map(|r| r.cash_available).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_periods: u32,
    pub total_collected: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_loans_issued: u32,
    pub final_active_loans: usize,
    pub final_outstanding_balance: f64,
    pub final_cash_available: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(period: u32, payment: f64) -> PeriodRecord {
        PeriodRecord {
            period,
            payment_received: payment,
            interest_income: payment * 0.4,
            principal_repaid: payment * 0.6,
            active_loans: 1,
            loans_issued: 0,
            outstanding_balance: 1_000.0,
            cash_available: 0.0,
            cumulative_interest: 0.0,
            cumulative_payment: 0.0,
            total_loans_issued: 1,
        }
    }

    #[test]
    fn test_summary_totals() {
        let mut result = SimulationResult::new();
        result.add_record(record(1, 100.0));
        result.add_record(record(2, 200.0));

        let summary = result.summary();
        assert_eq!(summary.total_periods, 2);
        assert_eq!(summary.total_collected, 300.0);
        assert_eq!(summary.final_active_loans, 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = SimulationResult::new().summary();
        assert_eq!(summary.total_periods, 0);
        assert_eq!(summary.total_collected, 0.0);
        assert_eq!(summary.total_loans_issued, 0);
    }
}
