use thiserror::Error;

/// Infrastructure failure while reading. Never a business denial.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RepoError {
    /// A single lookup failed.
    #[error("{lookup} lookup failed: {message}")]
    Read {
        /// Name of the port operation, e.g. `session` or `overrides`.
        lookup: &'static str,
        message: String,
    },

    /// The backing store cannot be reached at all.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepoError {
    pub fn read(lookup: &'static str, message: impl Into<String>) -> Self {
        Self::Read {
            lookup,
            message: message.into(),
        }
    }
}
