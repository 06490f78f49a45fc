//! Claims application service
//!
//! Orchestrates the submission flow: adjudicate a validated claim, then
//! persist the claim together with its verdict. Reads go straight to the
//! repository and never touch the adjudicator.

use std::sync::Arc;
use tracing::{info, instrument};

use core_kernel::{ClaimId, HealthCheckResult};

use crate::adjudication::ClaimAdjudicator;
use crate::claim::{ClaimRecord, ClaimRequest, NewClaimRecord};
use crate::error::ClaimError;
use crate::ports::{ClaimPage, ClaimQuery, ClaimRepositoryPort};

/// Service for submitting and retrieving claims
#[derive(Clone)]
pub struct ClaimService {
    adjudicator: ClaimAdjudicator,
    repository: Arc<dyn ClaimRepositoryPort>,
}

impl ClaimService {
    /// Creates a new claim service
    ///
    /// # Arguments
    ///
    /// * `adjudicator` - Rule engine applied to every submission
    /// * `repository` - Store for adjudicated claims
    pub fn new(adjudicator: ClaimAdjudicator, repository: Arc<dyn ClaimRepositoryPort>) -> Self {
        Self {
            adjudicator,
            repository,
        }
    }

    /// Adjudicates and persists a claim
    ///
    /// # Errors
    ///
    /// Returns an error if reference data or the repository fails. A
    /// rejected claim is still persisted and returned successfully.
    #[instrument(skip(self, request), fields(member = %request.member_id))]
    pub async fn submit(&self, request: ClaimRequest) -> Result<ClaimRecord, ClaimError> {
        let result = self.adjudicator.adjudicate(&request)?;

        let record = self
            .repository
            .save(NewClaimRecord::new(request, result))
            .await
            .map_err(ClaimError::repository)?;

        info!(claim_id = %record.id, status = %record.status, "Claim recorded");
        Ok(record)
    }

    /// Retrieves a claim by identifier
    pub async fn get(&self, id: ClaimId) -> Result<Option<ClaimRecord>, ClaimError> {
        self.repository.get(id).await.map_err(ClaimError::repository)
    }

    /// Lists claims matching the query
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidQuery` for out-of-range pagination.
    pub async fn list(&self, query: &ClaimQuery) -> Result<ClaimPage, ClaimError> {
        query.validate()?;
        self.repository.list(query).await.map_err(ClaimError::repository)
    }

    /// Reports the health of the claim store
    pub async fn health(&self) -> HealthCheckResult {
        self.repository.health_check().await
    }
}
