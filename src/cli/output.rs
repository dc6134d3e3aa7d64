//! GitHub Actions annotations for check outcomes.
//!
//! Each outcome is printed as a workflow command (`::notice::` or
//! `::error::`) so the result shows up on the run summary.

use std::io::{self, Write};

use approval_gate::{CheckError, CheckOutcome};

/// Writes the annotation for `outcome` to stdout.
pub fn write_outcome(outcome: &CheckOutcome) -> Result<(), CheckError> {
    let mut stdout = io::stdout().lock();
    write_outcome_to(&mut stdout, outcome)
}

/// Writes the annotation for `outcome` to the given writer.
///
/// Internal errors are preceded by a plain line carrying the cause, since
/// the annotation itself only says that the check could not run.
pub fn write_outcome_to<W: Write>(writer: &mut W, outcome: &CheckOutcome) -> Result<(), CheckError> {
    match outcome {
        CheckOutcome::Satisfied => {
            writeln!(writer, "::notice::Everyone is happy!").map_err(|e| io_error(&e))
        }
        CheckOutcome::ApprovalsNeeded(count) => {
            let noun = if count.get() == 1 { "approval" } else { "approvals" };
            writeln!(writer, "::error::{count} {noun} required").map_err(|e| io_error(&e))
        }
        CheckOutcome::Rejected => {
            writeln!(writer, "::error::Approvals required").map_err(|e| io_error(&e))
        }
        CheckOutcome::InternalError(error) => {
            writeln!(writer, "Internal error: {error}").map_err(|e| io_error(&e))?;
            writeln!(writer, "::error::Internal error").map_err(|e| io_error(&e))
        }
    }
}

/// Converts an I/O error to a [`CheckError::Io`].
pub(crate) fn io_error(error: &io::Error) -> CheckError {
    CheckError::Io {
        message: error.to_string(),
    }
}
