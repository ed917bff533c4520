use attendguard_repo::RepoError;
use std::time::Duration;
use thiserror::Error;

/// Why an eligibility question could not be answered.
///
/// Distinct from a denial: the caller must not treat either variant as "not eligible".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaluateError {
    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error("repository reads did not complete within {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl EvaluateError {
    /// Both variants are transient from the caller's point of view.
    pub fn is_retryable(&self) -> bool {
        match self {
            EvaluateError::Repository(_) | EvaluateError::Timeout(_) => true,
        }
    }
}
