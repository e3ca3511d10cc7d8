//! Issuance policy: decides whether accumulated repayments may fund a new loan

/// Predicate consulted before every candidate issuance.
///
/// Implementations must be side-effect-free; the simulator re-invokes the
/// policy for each candidate within a period rather than caching the first
/// answer.
pub trait IssuancePolicy {
    /// Whether a new loan may be issued given the current period, the number
    /// of loans issued so far, and the current active-loan count.
    fn permits(&self, period: u32, total_issued: u32, active_loans: usize) -> bool;
}

impl<F> IssuancePolicy for F
where
    F: Fn(u32, u32, usize) -> bool,
{
    fn permits(&self, period: u32, total_issued: u32, active_loans: usize) -> bool {
        self(period, total_issued, active_loans)
    }
}

/// Default policy: optional caps on total issuance and concurrent active loans.
///
/// With no caps configured, issuance is always permitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssuanceCaps {
    /// Maximum loans ever issued, counting the seed loan
    pub max_total_loans: Option<u32>,

    /// Maximum loans active at once
    pub max_active_loans: Option<u32>,
}

impl IssuanceCaps {
    /// No caps: always permit issuance
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Cap on total loans issued over the life of the portfolio
    pub fn max_total(max: u32) -> Self {
        Self {
            max_total_loans: Some(max),
            max_active_loans: None,
        }
    }

    /// Never issue: repayments accumulate as cash
    pub fn never() -> Self {
        Self::max_total(0)
    }
}

impl IssuancePolicy for IssuanceCaps {
    fn permits(&self, _period: u32, total_issued: u32, active_loans: usize) -> bool {
        if let Some(max) = self.max_total_loans {
            if total_issued >= max {
                return false;
            }
        }
        if let Some(max) = self.max_active_loans {
            if active_loans >= max as usize {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_always_permits() {
        let caps = IssuanceCaps::unlimited();
        assert!(caps.permits(1, 1, 1));
        assert!(caps.permits(500, 10_000, 9_000));
    }

    #[test]
    fn test_total_cap() {
        let caps = IssuanceCaps::max_total(3);
        assert!(caps.permits(1, 2, 2));
        assert!(!caps.permits(1, 3, 1));
    }

    #[test]
    fn test_active_cap() {
        let caps = IssuanceCaps {
            max_total_loans: None,
            max_active_loans: Some(5),
        };
        assert!(caps.permits(10, 20, 4));
        assert!(!caps.permits(10, 20, 5));
    }

    #[test]
    fn test_never_policy() {
        let caps = IssuanceCaps::never();
        assert!(!caps.permits(1, 1, 1));
    }

    #[test]
    fn test_closure_policy() {
        let only_first_year = |period: u32, _issued: u32, _active: usize| period <= 12;
        assert!(only_first_year.permits(12, 5, 5));
        assert!(!only_first_year.permits(13, 5, 5));
    }
}
