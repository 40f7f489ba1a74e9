//! Per-submission console reporting.
//!
//! One line per record: ordinal, HTTP status, whatever body the server
//! sent back. No aggregation; each submission's outcome stands on its
//! own.

use colored::*;

use crate::api::SubmissionOutcome;
use crate::error::SubmitError;

/// Report the server's verdict on one submission.
pub fn outcome(ordinal: usize, total: usize, outcome: &SubmissionOutcome) {
    let status = outcome.status.to_string();
    let status = if outcome.is_success() {
        status.green()
    } else {
        status.red()
    };
    println!("[{}/{}] {} {}", ordinal, total, status, outcome.body.trim());
}

/// Report a transport failure; the queue keeps going afterwards.
pub fn failure(ordinal: usize, total: usize, error: &SubmitError) {
    println!("[{}/{}] {} {}", ordinal, total, "failed".red(), error);
    log::error!("submission {}/{} failed: {}", ordinal, total, error);
}
