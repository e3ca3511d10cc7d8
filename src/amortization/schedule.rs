//! Single-loan amortization schedules

use serde::{Deserialize, Serialize};

use super::payment::{fixed_payment, periodic_rate};
use super::{round_cents, BALANCE_EPSILON};
use crate::error::LoanError;

/// Terms of a single amortizing loan
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original loan amount
    pub principal: f64,

    /// Annual interest rate as a decimal (0.12 = 12%)
    pub annual_rate: f64,

    /// Total number of payments over the life of the loan
    pub total_periods: u32,

    /// Compounding/payment frequency (12 = monthly)
    pub periods_per_year: u32,
}

impl LoanTerms {
    /// Terms with the default monthly compounding
    pub fn monthly(principal: f64, annual_rate: f64, total_periods: u32) -> Self {
        Self {
            principal,
            annual_rate,
            total_periods,
            periods_per_year: 12,
        }
    }

    /// Per-period interest rate
    pub fn periodic_rate(&self) -> f64 {
        periodic_rate(self.annual_rate, self.periods_per_year)
    }

    pub fn validate(&self) -> Result<(), LoanError> {
        if self.principal <= 0.0 {
            return Err(LoanError::NonPositivePrincipal(self.principal));
        }
        if self.annual_rate < 0.0 {
            return Err(LoanError::NegativeRate(self.annual_rate));
        }
        if self.total_periods == 0 {
            return Err(LoanError::ZeroPeriodTerm);
        }
        if self.periods_per_year == 0 {
            return Err(LoanError::ZeroPeriodsPerYear);
        }
        Ok(())
    }
}

/// One period of an amortization schedule.
///
/// Values are kept at full precision; rounding to cents happens at the
/// display/export boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Period index, 1-based
    #[serde(rename = "Period")]
    pub period: u32,

    /// Payment made this period
    #[serde(rename = "Payment", serialize_with = "crate::ser_cents")]
    pub payment: f64,

    /// Portion of the payment applied to principal
    #[serde(rename = "Principal Portion", serialize_with = "crate::ser_cents")]
    pub principal_portion: f64,

    /// Portion of the payment that is interest
    #[serde(rename = "Interest Portion", serialize_with = "crate::ser_cents")]
    pub interest_portion: f64,

    /// Balance outstanding after this payment
    #[serde(rename = "Remaining Balance", serialize_with = "crate::ser_cents")]
    pub remaining_balance: f64,
}

impl std::fmt::Display for ScheduleRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>6} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
            self.period,
            round_cents(self.payment),
            round_cents(self.principal_portion),
            round_cents(self.interest_portion),
            round_cents(self.remaining_balance),
        )
    }
}

/// Complete amortization schedule for a single loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Terms the schedule was generated from
    pub terms: LoanTerms,

    /// Fixed per-period payment
    pub fixed_payment: f64,

    /// One row per period, length exactly `terms.total_periods`
    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    /// Generate the full schedule for the given terms.
    pub fn generate(terms: LoanTerms) -> Result<Self, LoanError> {
        terms.validate()?;

        let rate = terms.periodic_rate();
        let pmt = fixed_payment(terms.principal, rate, terms.total_periods)?;

        let mut rows = Vec::with_capacity(terms.total_periods as usize);
        let mut balance = terms.principal;

        for period in 1..=terms.total_periods {
            let interest = balance * rate;
            let mut principal_portion = pmt - interest;
            let mut payment = pmt;

            // Final-payment correction: never collect more principal than
            // remains outstanding.
            if principal_portion > balance {
                principal_portion = balance;
                payment = principal_portion + interest;
            }

            balance -= principal_portion;

            // Rounding drift can cross the payoff threshold before the last
            // period, so the snap-to-zero applies every period.
            if balance.abs() < BALANCE_EPSILON {
                balance = 0.0;
            }

            rows.push(ScheduleRow {
                period,
                payment,
                principal_portion,
                interest_portion: interest,
                remaining_balance: balance,
            });
        }

        Ok(Self {
            terms,
            fixed_payment: pmt,
            rows,
        })
    }

    /// Balance outstanding after the final period
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.remaining_balance).unwrap_or(0.0)
    }

    /// Sum of all principal portions (should recover the principal)
    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal_portion).sum()
    }

    /// Sum of all interest portions
    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest_portion).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_schedule_length_matches_term() {
        let schedule = Schedule::generate(LoanTerms::monthly(30_000.0, 0.12, 60)).unwrap();
        assert_eq!(schedule.rows.len(), 60);
    }

    #[test]
    fn test_first_period_decomposition() {
        // 30,000 at 12%/12: period-1 interest is exactly 1% of principal
        let schedule = Schedule::generate(LoanTerms::monthly(30_000.0, 0.12, 60)).unwrap();
        let first = &schedule.rows[0];
        assert_relative_eq!(first.interest_portion, 300.0, epsilon = 0.01);
        assert_relative_eq!(first.payment, 667.33, epsilon = 0.01);
        assert_relative_eq!(
            first.principal_portion,
            first.payment - first.interest_portion,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_principal_portions_sum_to_principal() {
        for (principal, rate, periods) in [
            (30_000.0, 0.12, 60),
            (250_000.0, 0.065, 360),
            (5_000.0, 0.2, 24),
            (9_999.99, 0.0001, 7),
        ] {
            let schedule =
                Schedule::generate(LoanTerms::monthly(principal, rate, periods)).unwrap();
            assert_relative_eq!(schedule.total_principal(), principal, epsilon = 1e-6);
            assert_eq!(schedule.final_balance(), 0.0);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = Schedule::generate(LoanTerms::monthly(12_000.0, 0.0, 12)).unwrap();
        assert_eq!(schedule.fixed_payment, 1_000.0);
        for row in &schedule.rows {
            assert_eq!(row.interest_portion, 0.0);
        }
        assert_eq!(schedule.final_balance(), 0.0);
    }

    #[test]
    fn test_balance_never_negative() {
        let schedule = Schedule::generate(LoanTerms::monthly(30_000.0, 0.12, 60)).unwrap();
        for row in &schedule.rows {
            assert!(row.remaining_balance >= 0.0);
        }
    }

    #[test]
    fn test_invalid_terms_rejected() {
        assert!(Schedule::generate(LoanTerms::monthly(-1.0, 0.12, 60)).is_err());
        assert!(Schedule::generate(LoanTerms::monthly(30_000.0, -0.12, 60)).is_err());
        assert!(Schedule::generate(LoanTerms::monthly(30_000.0, 0.12, 0)).is_err());
        assert!(Schedule::generate(LoanTerms {
            principal: 30_000.0,
            annual_rate: 0.12,
            total_periods: 60,
            periods_per_year: 0,
        })
        .is_err());
    }
}
