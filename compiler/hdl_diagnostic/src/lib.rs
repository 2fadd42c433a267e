//! Diagnostics for elaboration failures.
//!
//! Every error that aborts a batch is turned into a [`Diagnostic`]:
//! - an error code for searchability
//! - a message saying what went wrong
//! - a primary span saying where
//! - notes with the offending sub-expression or other context

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
