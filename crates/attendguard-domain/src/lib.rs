//! Pure eligibility evaluation (no IO).
//!
//! Input: an evaluation context loaded elsewhere, the request, and the clock reading.
//! Output: a decision, the stage it was reached at, and diagnostics.

#![forbid(unsafe_code)]

pub mod checks;
pub mod config;
pub mod geo;
pub mod model;
pub mod policy;
pub mod report;

mod denial;
mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use config::EngineConfig;
pub use denial::Denial;
pub use engine::{evaluate, precheck};
pub use report::{Decision, Evaluation, Stage};
