//! Claims domain errors
//!
//! None of these describe a rejected claim: rejections are verdicts carried
//! in `AdjudicationResult`. These are faults the caller must handle.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    /// A reference data lookup failed to answer
    #[error("Reference data unavailable: {0}")]
    ReferenceData(#[from] PortError),

    /// Reference data could not be loaded at startup
    #[error("Failed to load reference data: {0}")]
    ReferenceDataLoad(String),

    /// The claim store failed
    #[error("Claim repository error: {0}")]
    Repository(#[source] PortError),

    /// Listing parameters out of range
    #[error("Invalid claim query: {0}")]
    InvalidQuery(String),
}

impl ClaimError {
    /// Wraps a repository failure
    pub fn repository(error: PortError) -> Self {
        ClaimError::Repository(error)
    }

    /// Returns true if retrying the operation may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ClaimError::ReferenceData(e) | ClaimError::Repository(e) => e.is_transient(),
            _ => false,
        }
    }
}
