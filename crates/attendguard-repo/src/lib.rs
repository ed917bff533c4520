//! Read side of attendguard.
//!
//! This crate is intentionally boring:
//! - it defines the read-only repository port the engine's inputs come from
//! - it loads an evaluation context in stages, reading only what later gates can use
//! - it ships an in-memory adapter over a JSON snapshot for the CLI and tests
//!
//! It never writes. Attendance inserts happen in the caller after an allowed decision.

#![forbid(unsafe_code)]

mod error;
mod loader;
mod memory;
mod port;

pub use error::RepoError;
pub use loader::load_context;
pub use memory::{InMemoryRepository, ScopeRow, Snapshot};
pub use port::CheckinRepository;
