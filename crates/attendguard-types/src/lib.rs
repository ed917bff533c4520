//! Stable DTOs and IDs used across the attendguard workspace.
//!
//! This crate is intentionally boring:
//! - the request a caller submits for one check-in attempt
//! - the result handed back (decision, reason, diagnostics)
//! - stable reason codes
//! - explain registry for operator guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod request;
pub mod result;

pub use explain::{Explanation, lookup_explanation};
pub use request::{CheckinMethod, Coordinates, EligibilityRequest};
pub use result::{EligibilityResult, PolicyMode, PolicySnapshot};
