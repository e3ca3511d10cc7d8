//! Lender income view of a single-loan schedule
//!
//! Adds running cumulative interest and cumulative payment to each period.
//! The accumulators run from inception and are never reset; there is no
//! calendar-year boundary in this model.

use serde::{Deserialize, Serialize};

use super::schedule::Schedule;

/// One period of the lender view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderRow {
    /// Period index, 1-based
    #[serde(rename = "Period")]
    pub period: u32,

    /// Payment received this period
    #[serde(rename = "Payment Received", serialize_with = "crate::ser_cents")]
    pub payment_received: f64,

    /// Interest income earned this period
    #[serde(rename = "Interest Income", serialize_with = "crate::ser_cents")]
    pub interest_income: f64,

    /// Principal repaid this period
    #[serde(rename = "Principal Repaid", serialize_with = "crate::ser_cents")]
    pub principal_repaid: f64,

    /// Borrower balance outstanding after this period
    #[serde(rename = "Remaining Balance", serialize_with = "crate::ser_cents")]
    pub remaining_balance: f64,

    /// Interest income accumulated since inception
    #[serde(rename = "Cumulative Interest", serialize_with = "crate::ser_cents")]
    pub cumulative_interest: f64,

    /// Payments accumulated since inception
    #[serde(rename = "Cumulative Payment", serialize_with = "crate::ser_cents")]
    pub cumulative_payment: f64,
}

/// Lender income view derived from an amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LenderView {
    pub rows: Vec<LenderRow>,
}

impl LenderView {
    /// Derive the lender view. Pure: the schedule is not modified, and
    /// deriving twice yields identical rows.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut cumulative_interest = 0.0;
        let mut cumulative_payment = 0.0;

        let rows = schedule
            .rows
            .iter()
            .map(|row| {
                cumulative_interest += row.interest_portion;
                cumulative_payment += row.payment;
                LenderRow {
                    period: row.period,
                    payment_received: row.payment,
                    interest_income: row.interest_portion,
                    principal_repaid: row.principal_portion,
                    remaining_balance: row.remaining_balance,
                    cumulative_interest,
                    cumulative_payment,
                }
            })
            .collect();

        Self { rows }
    }

    /// Total interest income over the life of the loan
    pub fn total_interest(&self) -> f64 {
        self.rows.last().map(|r| r.cumulative_interest).unwrap_or(0.0)
    }

    /// Total payments over the life of the loan
    pub fn total_payment(&self) -> f64 {
        self.rows.last().map(|r| r.cumulative_payment).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{LoanTerms, Schedule};
    use approx::assert_relative_eq;

    #[test]
    fn test_cumulative_totals_match_schedule_sums() {
        let schedule = Schedule::generate(LoanTerms::monthly(30_000.0, 0.12, 60)).unwrap();
        let view = LenderView::from_schedule(&schedule);

        assert_eq!(view.rows.len(), schedule.rows.len());
        assert_relative_eq!(
            view.total_interest(),
            schedule.total_interest(),
            epsilon = 1e-9
        );

        let paid: f64 = schedule.rows.iter().map(|r| r.payment).sum();
        assert_relative_eq!(view.total_payment(), paid, epsilon = 1e-9);
    }

    #[test]
    fn test_accumulators_never_reset() {
        // 36 monthly periods span three "years"; the accumulators keep climbing
        let schedule = Schedule::generate(LoanTerms::monthly(10_000.0, 0.1, 36)).unwrap();
        let view = LenderView::from_schedule(&schedule);

        for pair in view.rows.windows(2) {
            assert!(pair[1].cumulative_interest >= pair[0].cumulative_interest);
            assert!(pair[1].cumulative_payment > pair[0].cumulative_payment);
        }
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let schedule = Schedule::generate(LoanTerms::monthly(30_000.0, 0.12, 60)).unwrap();
        let first = LenderView::from_schedule(&schedule);
        let second = LenderView::from_schedule(&schedule);

        for (a, b) in first.rows.iter().zip(&second.rows) {
            assert_eq!(a.cumulative_interest, b.cumulative_interest);
            assert_eq!(a.cumulative_payment, b.cumulative_payment);
        }
    }
}
