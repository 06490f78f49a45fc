//! In-memory claim store

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, HealthCheckResult, PortError};

use crate::claim::{ClaimRecord, NewClaimRecord};
use crate::ports::{ClaimPage, ClaimQuery, ClaimRepositoryPort};

/// Claim store kept in process memory
///
/// Records are appended in submission order, so iterating in reverse
/// yields newest first. Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimAdapter {
    claims: Arc<RwLock<Vec<ClaimRecord>>>,
}

impl InMemoryClaimAdapter {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored claims
    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.claims.read().await.is_empty()
    }
}

impl DomainPort for InMemoryClaimAdapter {}

#[async_trait]
impl HealthCheckable for InMemoryClaimAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-claim-store", 0)
    }
}

#[async_trait]
impl ClaimRepositoryPort for InMemoryClaimAdapter {
    async fn save(&self, claim: NewClaimRecord) -> Result<ClaimRecord, PortError> {
        let record = ClaimRecord::create(claim, ClaimId::new_v7(), Utc::now());
        self.claims.write().await.push(record.clone());

        debug!(claim_id = %record.id, "Stored claim in memory");
        Ok(record)
    }

    async fn get(&self, id: ClaimId) -> Result<Option<ClaimRecord>, PortError> {
        Ok(self
            .claims
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn list(&self, query: &ClaimQuery) -> Result<ClaimPage, PortError> {
        let claims = self.claims.read().await;
        let matching: Vec<&ClaimRecord> = claims
            .iter()
            .rev()
            .filter(|record| query.matches(record))
            .collect();

        let total = matching.len() as u64;
        let offset = usize::try_from(query.offset())
            .map_err(|_| PortError::validation_field("page out of range", "page"))?;
        let items = matching
            .into_iter()
            .skip(offset)
            .take(query.page_size as usize)
            .cloned()
            .collect();

        Ok(ClaimPage::new(items, total, query))
    }
}
