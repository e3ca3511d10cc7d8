//! Rolling-reinvestment portfolio simulator
//!
//! Owns a set of concurrently amortizing loans and advances them one period
//! at a time. Principal repayments pool into a cash balance; whenever the
//! pool covers one loan's principal, the issuance policy is consulted and,
//! if it permits, a new loan is originated at the current period.

use log::debug;

use super::loan::{Loan, LoanCashflow};
use super::policy::{IssuanceCaps, IssuancePolicy};
use super::records::{PeriodRecord, SimulationResult};
use crate::amortization::{fixed_payment, periodic_rate};
use crate::error::LoanError;

/// Configuration for a rolling portfolio
#[derive(Debug, Clone, Copy)]
pub struct PortfolioConfig {
    /// Face principal of every loan the portfolio issues
    pub principal_per_loan: f64,

    /// Annual interest rate as a decimal (0.12 = 12%)
    pub annual_rate: f64,

    /// Amortization horizon used to size the fixed payment. Independent of
    /// how many periods the simulation runs.
    pub loan_term_periods: u32,

    /// Compounding/payment frequency (12 = monthly)
    pub periods_per_year: u32,
}

impl PortfolioConfig {
    /// Config with the default monthly compounding
    pub fn monthly(principal_per_loan: f64, annual_rate: f64, loan_term_periods: u32) -> Self {
        Self {
            principal_per_loan,
            annual_rate,
            loan_term_periods,
            periods_per_year: 12,
        }
    }

    /// Per-period interest rate
    pub fn periodic_rate(&self) -> f64 {
        periodic_rate(self.annual_rate, self.periods_per_year)
    }

    pub fn validate(&self) -> Result<(), LoanError> {
        if self.principal_per_loan <= 0.0 {
            return Err(LoanError::NonPositivePrincipal(self.principal_per_loan));
        }
        if self.annual_rate < 0.0 {
            return Err(LoanError::NegativeRate(self.annual_rate));
        }
        if self.loan_term_periods == 0 {
            return Err(LoanError::ZeroPeriodTerm);
        }
        if self.periods_per_year == 0 {
            return Err(LoanError::ZeroPeriodsPerYear);
        }
        Ok(())
    }
}

/// A portfolio of concurrently amortizing loans with rolling reinvestment.
///
/// Single-threaded by design: one period advance is one atomic in-memory
/// state transition, and there is no rollback. Callers wanting speculative
/// simulation clone the portfolio before advancing.
#[derive(Debug, Clone)]
pub struct LoanPortfolio<P: IssuancePolicy = IssuanceCaps> {
    config: PortfolioConfig,
    policy: P,

    /// Per-period rate, precomputed at construction
    rate: f64,

    /// Fixed per-loan payment, precomputed at construction
    fixed_payment: f64,

    /// Active loans; paid-off loans are dropped at the end of each period
    loans: Vec<Loan>,

    /// Repayment cash not yet redeployed
    cash_balance: f64,

    /// Interest collected since inception (never reset)
    cumulative_interest: f64,

    /// Payments collected since inception (never reset)
    cumulative_payment: f64,

    /// Loans issued since inception, counting the seed loan
    total_loans_issued: u32,

    /// Simulation clock, 0 before the first advance
    current_period: u32,
}

impl LoanPortfolio<IssuanceCaps> {
    /// Portfolio with the default unconstrained issuance policy.
    pub fn new(config: PortfolioConfig) -> Result<Self, LoanError> {
        Self::with_policy(config, IssuanceCaps::unlimited())
    }
}

impl<P: IssuancePolicy> LoanPortfolio<P> {
    /// Portfolio with a caller-supplied issuance policy.
    ///
    /// Validates the configuration, sizes the fixed payment from the per-loan
    /// amortization horizon, and seeds one loan at period 1. Construction is
    /// the only fallible operation; `advance` never errors.
    pub fn with_policy(config: PortfolioConfig, policy: P) -> Result<Self, LoanError> {
        config.validate()?;

        let rate = config.periodic_rate();
        let payment = fixed_payment(config.principal_per_loan, rate, config.loan_term_periods)?;

        Ok(Self {
            config,
            policy,
            rate,
            fixed_payment: payment,
            loans: vec![Loan::new(1, 1, config.principal_per_loan)],
            cash_balance: 0.0,
            cumulative_interest: 0.0,
            cumulative_payment: 0.0,
            total_loans_issued: 1,
            current_period: 0,
        })
    }

    /// Advance the portfolio by one period and return its record.
    pub fn advance(&mut self) -> PeriodRecord {
        self.current_period += 1;
        let period = self.current_period;

        // Service every active loan, accumulating period totals. Payoffs are
        // collected by a retain pass afterwards; the set is never mutated
        // while being iterated.
        let mut totals = LoanCashflow::default();
        for loan in &mut self.loans {
            if let Some(cf) = loan.service(period, self.rate, self.fixed_payment) {
                totals.payment += cf.payment;
                totals.interest += cf.interest;
                totals.principal += cf.principal;
            }
        }
        self.loans.retain(|loan| !loan.is_paid_off());

        self.cash_balance += totals.payment;
        self.cumulative_interest += totals.interest;
        self.cumulative_payment += totals.payment;

        // Issuance loop: the policy is consulted fresh for every candidate;
        // a decline halts issuance for the rest of the period.
        let mut issued_this_period = 0;
        while self.cash_balance >= self.config.principal_per_loan {
            if !self
                .policy
                .permits(period, self.total_loans_issued, self.loans.len())
            {
                break;
            }
            self.total_loans_issued += 1;
            self.loans.push(Loan::new(
                self.total_loans_issued,
                period,
                self.config.principal_per_loan,
            ));
            self.cash_balance -= self.config.principal_per_loan;
            issued_this_period += 1;
            debug!(
                "period {}: issued loan #{} ({} active, {:.2} cash remaining)",
                period,
                self.total_loans_issued,
                self.loans.len(),
                self.cash_balance
            );
        }

        PeriodRecord {
            period,
            payment_received: totals.payment,
            interest_income: totals.interest,
            principal_repaid: totals.principal,
            active_loans: self.loans.len(),
            loans_issued: issued_this_period,
            outstanding_balance: self.outstanding_balance(),
            cash_available: self.cash_balance,
            cumulative_interest: self.cumulative_interest,
            cumulative_payment: self.cumulative_payment,
            total_loans_issued: self.total_loans_issued,
        }
    }

    /// Advance for a fixed number of periods, collecting one record each.
    pub fn run(&mut self, periods: u32) -> SimulationResult {
        let mut result = SimulationResult::new();
        for _ in 0..periods {
            result.add_record(self.advance());
        }
        result
    }

    /// Aggregate balance outstanding across all active loans
    pub fn outstanding_balance(&self) -> f64 {
        self.loans.iter().map(|l| l.remaining_balance).sum()
    }

    /// Fixed per-loan payment sized from the amortization horizon
    pub fn fixed_payment(&self) -> f64 {
        self.fixed_payment
    }

    /// Number of loans currently active
    pub fn active_loan_count(&self) -> usize {
        self.loans.len()
    }

    /// Repayment cash not yet redeployed
    pub fn cash_balance(&self) -> f64 {
        self.cash_balance
    }

    /// Loans issued since inception, counting the seed loan
    pub fn total_loans_issued(&self) -> u32 {
        self.total_loans_issued
    }

    /// Current simulation period (0 before the first advance)
    pub fn current_period(&self) -> u32 {
        self.current_period
    }

    /// The portfolio configuration
    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }
}
