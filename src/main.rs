//! Loanbook CLI
//!
//! Command-line driver for amortization schedules, lender income views, and
//! rolling-reinvestment portfolio simulations

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use loanbook::amortization::{LenderView, LoanTerms, Schedule};
use loanbook::export;
use loanbook::portfolio::{IssuanceCaps, LoanPortfolio, PortfolioConfig};

#[derive(Parser)]
#[command(name = "loanbook", version, about = "Amortizing loan and rolling-reinvestment portfolio simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the amortization schedule for a single loan
    Schedule(LoanArgs),

    /// Print the lender income view of a single loan
    Lender(LoanArgs),

    /// Run the rolling-reinvestment portfolio simulation
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct LoanArgs {
    /// Loan principal
    #[arg(long, default_value_t = 30_000.0)]
    principal: f64,

    /// Annual interest rate as a decimal (0.12 = 12%)
    #[arg(long, default_value_t = 0.12)]
    annual_rate: f64,

    /// Number of payments over the life of the loan
    #[arg(long, default_value_t = 60)]
    periods: u32,

    /// Payments per year
    #[arg(long, default_value_t = 12)]
    periods_per_year: u32,

    /// Write the full table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl LoanArgs {
    fn terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            annual_rate: self.annual_rate,
            total_periods: self.periods,
            periods_per_year: self.periods_per_year,
        }
    }
}

#[derive(Args)]
struct SimulateArgs {
    /// Face principal of every loan the portfolio issues
    #[arg(long, default_value_t = 30_000.0)]
    principal: f64,

    /// Annual interest rate as a decimal (0.12 = 12%)
    #[arg(long, default_value_t = 0.12)]
    annual_rate: f64,

    /// Per-loan amortization horizon in periods (sizes the fixed payment)
    #[arg(long, default_value_t = 60)]
    loan_term: u32,

    /// Payments per year
    #[arg(long, default_value_t = 12)]
    periods_per_year: u32,

    /// Periods to simulate (default: three loan terms)
    #[arg(long)]
    periods: Option<u32>,

    /// Cap on total loans ever issued
    #[arg(long)]
    max_loans: Option<u32>,

    /// Cap on concurrently active loans
    #[arg(long)]
    max_active: Option<u32>,

    /// Write all period records to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the run summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Rows of the preview table printed to the console
const PREVIEW_ROWS: usize = 24;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Schedule(args) => run_schedule(args),
        Command::Lender(args) => run_lender(args),
        Command::Simulate(args) => run_simulate(args),
    }
}

fn run_schedule(args: LoanArgs) -> anyhow::Result<()> {
    let schedule = Schedule::generate(args.terms())?;

    println!(
        "Amortization schedule: {:.2} at {:.2}% over {} periods",
        schedule.terms.principal,
        schedule.terms.annual_rate * 100.0,
        schedule.terms.total_periods
    );
    println!("Fixed payment: {:.2}\n", schedule.fixed_payment);

    println!(
        "{:>6} {:>14} {:>14} {:>14} {:>16}",
        "Period", "Payment", "Principal", "Interest", "Balance"
    );
    println!("{}", "-".repeat(68));
    for row in schedule.rows.iter().take(PREVIEW_ROWS) {
        println!("{}", row);
    }
    if schedule.rows.len() > PREVIEW_ROWS {
        println!("... ({} more periods)", schedule.rows.len() - PREVIEW_ROWS);
    }

    println!("\nTotal interest: {:.2}", schedule.total_interest());

    if let Some(path) = args.csv {
        let file = File::create(&path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        export::write_schedule(file, &schedule)?;
        info!("schedule written to {}", path.display());
        println!("Full schedule written to: {}", path.display());
    }

    Ok(())
}

fn run_lender(args: LoanArgs) -> anyhow::Result<()> {
    let schedule = Schedule::generate(args.terms())?;
    let view = LenderView::from_schedule(&schedule);

    println!(
        "Lender income view: {:.2} at {:.2}% over {} periods\n",
        schedule.terms.principal,
        schedule.terms.annual_rate * 100.0,
        schedule.terms.total_periods
    );

    println!(
        "{:>6} {:>12} {:>12} {:>12} {:>14} {:>14}",
        "Period", "Payment", "Interest", "Principal", "Cum Interest", "Cum Payment"
    );
    println!("{}", "-".repeat(76));
    for row in view.rows.iter().take(PREVIEW_ROWS) {
        println!(
            "{:>6} {:>12.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2}",
            row.period,
            row.payment_received,
            row.interest_income,
            row.principal_repaid,
            row.cumulative_interest,
            row.cumulative_payment,
        );
    }
    if view.rows.len() > PREVIEW_ROWS {
        println!("... ({} more periods)", view.rows.len() - PREVIEW_ROWS);
    }

    println!("\nTotal interest income: {:.2}", view.total_interest());
    println!("Total payments received: {:.2}", view.total_payment());

    if let Some(path) = args.csv {
        let file = File::create(&path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        export::write_lender_view(file, &view)?;
        println!("Full view written to: {}", path.display());
    }

    Ok(())
}

fn run_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = PortfolioConfig {
        principal_per_loan: args.principal,
        annual_rate: args.annual_rate,
        loan_term_periods: args.loan_term,
        periods_per_year: args.periods_per_year,
    };
    let caps = IssuanceCaps {
        max_total_loans: args.max_loans,
        max_active_loans: args.max_active,
    };
    let periods = args.periods.unwrap_or(args.loan_term * 3);

    let mut portfolio = LoanPortfolio::with_policy(config, caps)?;
    info!(
        "simulating {} periods: {:.2} per loan at {:.2}%, fixed payment {:.2}",
        periods,
        config.principal_per_loan,
        config.annual_rate * 100.0,
        portfolio.fixed_payment()
    );

    let result = portfolio.run(periods);
    let summary = result.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Rolling portfolio: {:.2} per loan at {:.2}%, {}-period horizon\n",
            config.principal_per_loan,
            config.annual_rate * 100.0,
            config.loan_term_periods
        );

        println!(
            "{:>6} {:>14} {:>12} {:>14} {:>7} {:>7} {:>16} {:>14}",
            "Period", "Payment", "Interest", "Principal", "Active", "Issued", "Balance", "Cash"
        );
        println!("{}", "-".repeat(98));
        for record in result.records.iter().take(PREVIEW_ROWS) {
            println!("{}", record);
        }
        if result.records.len() > PREVIEW_ROWS {
            println!("... ({} more periods)", result.records.len() - PREVIEW_ROWS);
        }

        println!("\nSummary:");
        println!("  Periods simulated: {}", summary.total_periods);
        println!("  Total collected: {:.2}", summary.total_collected);
        println!("  Total interest: {:.2}", summary.total_interest);
        println!("  Total principal repaid: {:.2}", summary.total_principal);
        println!("  Loans issued: {}", summary.total_loans_issued);
        println!("  Active loans at end: {}", summary.final_active_loans);
        println!(
            "  Outstanding balance at end: {:.2}",
            summary.final_outstanding_balance
        );
        println!("  Cash available at end: {:.2}", summary.final_cash_available);
    }

    if let Some(path) = args.csv {
        export::write_simulation_to_path(&path, &result)
            .with_context(|| format!("unable to write {}", path.display()))?;
        println!("Full results written to: {}", path.display());
    }

    Ok(())
}
