//! Amortization engine: fixed-payment formula, single-loan schedules,
//! and the lender income view derived from them

mod payment;
mod schedule;
mod lender;

pub use payment::{fixed_payment, periodic_rate};
pub use schedule::{LoanTerms, Schedule, ScheduleRow};
pub use lender::{LenderRow, LenderView};

/// Balances within this tolerance of zero are treated as paid off.
pub const BALANCE_EPSILON: f64 = 1e-8;

/// Round a monetary amount to cents for display and export.
///
/// Internal accumulation always uses unrounded values; this is applied only
/// at the serialization/formatting boundary.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round_cents;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(667.336), 667.34);
        assert_eq!(round_cents(299.999), 300.0);
        assert_eq!(round_cents(0.0), 0.0);
        assert_eq!(round_cents(-0.005), -0.01);
    }
}
