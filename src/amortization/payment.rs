//! Fixed-payment annuity formula

use crate::error::LoanError;

/// Per-period rate from an annual rate and compounding frequency.
pub fn periodic_rate(annual_rate: f64, periods_per_year: u32) -> f64 {
    annual_rate / periods_per_year as f64
}

/// Constant per-period payment that retires `principal` over `periods`
/// payments at per-period rate `rate`.
///
/// A zero rate degenerates to straight-line `principal / periods`; otherwise
/// the standard annuity formula applies. A zero-period term is rejected
/// rather than letting the division produce NaN or infinity.
pub fn fixed_payment(principal: f64, rate: f64, periods: u32) -> Result<f64, LoanError> {
    if principal <= 0.0 {
        return Err(LoanError::NonPositivePrincipal(principal));
    }
    if rate < 0.0 {
        return Err(LoanError::NegativeRate(rate));
    }
    if periods == 0 {
        return Err(LoanError::ZeroPeriodTerm);
    }

    let n = periods as f64;
    if rate == 0.0 {
        Ok(principal / n)
    } else {
        Ok(principal * rate / (1.0 - (1.0 + rate).powf(-n)))
    }
}
