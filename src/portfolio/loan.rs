//! Loan entity tracked by the rolling portfolio

use serde::{Deserialize, Serialize};

use crate::amortization::BALANCE_EPSILON;

/// Identity of a loan within a portfolio (its issuance ordinal).
pub type LoanId = u32;

/// One amortizing obligation inside the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Issuance ordinal, unique within the portfolio
    pub id: LoanId,

    /// Period the loan was issued; first payment is due at this period
    pub start_period: u32,

    /// Outstanding balance, strictly decreasing while serviced
    pub remaining_balance: f64,
}

/// Cash collected from servicing one loan for one period.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanCashflow {
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
}

impl Loan {
    pub fn new(id: LoanId, start_period: u32, principal: f64) -> Self {
        Self {
            id,
            start_period,
            remaining_balance: principal,
        }
    }

    /// Periods elapsed since issuance, counting the issuance period as 1.
    pub fn age_at(&self, period: u32) -> i64 {
        period as i64 - self.start_period as i64 + 1
    }

    /// Whether the loan has amortized to zero (within tolerance).
    pub fn is_paid_off(&self) -> bool {
        self.remaining_balance <= BALANCE_EPSILON
    }

    /// Service the loan for one period at the given per-period rate and
    /// fixed payment. Returns the cash collected, or `None` when the loan is
    /// not yet active or already paid off.
    ///
    /// The final payment is clamped so principal collected never exceeds the
    /// outstanding balance.
    pub fn service(&mut self, period: u32, rate: f64, fixed_payment: f64) -> Option<LoanCashflow> {
        if self.age_at(period) <= 0 || self.remaining_balance <= 0.0 {
            return None;
        }

        let interest = self.remaining_balance * rate;
        let mut principal = fixed_payment - interest;
        let mut payment = fixed_payment;

        if principal > self.remaining_balance {
            principal = self.remaining_balance;
            payment = principal + interest;
        }

        self.remaining_balance -= principal;
        if self.remaining_balance.abs() < BALANCE_EPSILON {
            self.remaining_balance = 0.0;
        }

        Some(LoanCashflow {
            payment,
            interest,
            principal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_service_splits_interest_and_principal() {
        let mut loan = Loan::new(1, 1, 30_000.0);
        let cf = loan.service(1, 0.01, 667.33).unwrap();

        assert_relative_eq!(cf.interest, 300.0, epsilon = 1e-9);
        assert_relative_eq!(cf.principal, 367.33, epsilon = 1e-9);
        assert_relative_eq!(loan.remaining_balance, 29_632.67, epsilon = 1e-9);
    }

    #[test]
    fn test_final_payment_clamped_to_balance() {
        let mut loan = Loan::new(1, 1, 100.0);
        let cf = loan.service(1, 0.01, 667.33).unwrap();

        assert_relative_eq!(cf.principal, 100.0, epsilon = 1e-12);
        assert_relative_eq!(cf.payment, 101.0, epsilon = 1e-12);
        assert!(loan.is_paid_off());
        assert_eq!(loan.remaining_balance, 0.0);
    }

    #[test]
    fn test_paid_off_loan_is_never_serviced() {
        let mut loan = Loan::new(1, 1, 100.0);
        loan.service(1, 0.01, 667.33).unwrap();
        assert!(loan.service(2, 0.01, 667.33).is_none());
    }

    #[test]
    fn test_future_loan_is_not_serviced() {
        let mut loan = Loan::new(2, 5, 30_000.0);
        assert!(loan.service(4, 0.01, 667.33).is_none());
        assert!(loan.service(5, 0.01, 667.33).is_some());
    }
}
