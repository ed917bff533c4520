//! Use case orchestration for attendguard.
//!
//! This crate provides the application layer: use cases that coordinate the repository loader
//! and the pure engine. It is intentionally thin and delegates heavy lifting to the appropriate
//! layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod error;
mod explain;

pub use check::{CheckInput, CheckOutput, decision_exit_code, run_check};
pub use error::EvaluateError;
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
