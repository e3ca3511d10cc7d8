//! CSV export of schedules, lender views, and simulation records
//!
//! Headers come from the serde field names and stay in declaration order
//! across a run.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::amortization::{LenderView, Schedule};
use crate::portfolio::SimulationResult;

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a single-loan amortization schedule as CSV.
pub fn write_schedule<W: Write>(writer: W, schedule: &Schedule) -> csv::Result<()> {
    write_rows(writer, &schedule.rows)
}

/// Write a lender income view as CSV.
pub fn write_lender_view<W: Write>(writer: W, view: &LenderView) -> csv::Result<()> {
    write_rows(writer, &view.rows)
}

/// Write simulation period records as CSV.
pub fn write_simulation<W: Write>(writer: W, result: &SimulationResult) -> csv::Result<()> {
    write_rows(writer, &result.records)
}

/// Write simulation period records to a file path.
pub fn write_simulation_to_path<P: AsRef<Path>>(
    path: P,
    result: &SimulationResult,
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in &result.records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
