//! Error types for loan and portfolio construction

use thiserror::Error;

/// Errors raised when validating loan terms or portfolio configuration.
///
/// All validation happens up front: a successfully constructed schedule or
/// portfolio never errors during subsequent computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanError {
    /// Principal must be strictly positive
    #[error("principal must be positive, got {0}")]
    NonPositivePrincipal(f64),

    /// Annual rate may be zero but never negative
    #[error("annual rate must be non-negative, got {0}")]
    NegativeRate(f64),

    /// A zero-period term makes the payment formula divide by zero
    #[error("loan term must be at least one period")]
    ZeroPeriodTerm,

    /// Compounding frequency must be at least one period per year
    #[error("periods per year must be at least one")]
    ZeroPeriodsPerYear,
}
