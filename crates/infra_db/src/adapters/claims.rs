//! PostgreSQL Claim Adapter
//!
//! Implements the claims domain's `ClaimRepositoryPort` on top of
//! `ClaimsRepository`, translating domain records to rows and database
//! errors to port errors.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{ClaimId, DomainPort, HealthCheckable, HealthCheckResult, PortError};
use domain_claims::{
    AdjudicationStatus, ClaimPage, ClaimQuery, ClaimRecord, ClaimRepositoryPort, NewClaimRecord,
    RejectionCategory,
};

use crate::repositories::claims::{ClaimFilter, ClaimRow, ClaimStatus, ClaimsRepository, NewClaim};

/// PostgreSQL-backed implementation of the ClaimRepositoryPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - Constraint violations -> `PortError::Conflict`
/// - Connection issues -> `PortError::Connection`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimAdapter {
    /// Creates a new PostgreSQL claim adapter
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimAdapter {
    /// Checks database connectivity with a `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::healthy("postgres-claim-adapter", latency_ms),
            Err(e) => HealthCheckResult::unhealthy(
                "postgres-claim-adapter",
                latency_ms,
                format!("Database error: {}", e),
            ),
        }
    }
}

#[async_trait]
impl ClaimRepositoryPort for PostgresClaimAdapter {
    #[instrument(skip(self, claim))]
    async fn save(&self, claim: NewClaimRecord) -> Result<ClaimRecord, PortError> {
        let row = self.repository.insert(to_new_claim(claim)).await?;
        debug!(claim_id = %row.claim_id, "Inserted claim");
        row_to_record(row)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn get(&self, id: ClaimId) -> Result<Option<ClaimRecord>, PortError> {
        let row = self.repository.find_by_id(id.into()).await?;
        row.map(row_to_record).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ClaimQuery) -> Result<ClaimPage, PortError> {
        let filter = to_filter(query)?;
        let (rows, total) = self.repository.list(&filter).await?;

        let total = u64::try_from(total)
            .map_err(|_| PortError::internal(format!("negative claim count {}", total)))?;
        let items = rows
            .into_iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClaimPage::new(items, total, query))
    }
}

// =============================================================================
// Conversion Functions
// =============================================================================

fn to_db_status(status: AdjudicationStatus) -> ClaimStatus {
    match status {
        AdjudicationStatus::Approved => ClaimStatus::Approved,
        AdjudicationStatus::Partial => ClaimStatus::Partial,
        AdjudicationStatus::Rejected => ClaimStatus::Rejected,
    }
}

fn to_domain_status(status: ClaimStatus) -> AdjudicationStatus {
    match status {
        ClaimStatus::Approved => AdjudicationStatus::Approved,
        ClaimStatus::Partial => AdjudicationStatus::Partial,
        ClaimStatus::Rejected => AdjudicationStatus::Rejected,
    }
}

fn to_new_claim(claim: NewClaimRecord) -> NewClaim {
    let NewClaimRecord { request, result } = claim;
    NewClaim {
        member_id: request.member_id,
        provider_id: request.provider_id,
        diagnosis_code: request.diagnosis_code,
        procedure_code: request.procedure_code,
        claim_amount: request.claim_amount,
        status: to_db_status(result.status),
        fraud_flag: result.fraud_flag,
        approved_amount: result.approved_amount,
        rejection_reasons: result.rejection_reasons,
        rejection_categories: result
            .rejection_categories
            .iter()
            .map(|category| category.as_str().to_string())
            .collect(),
    }
}

fn to_filter(query: &ClaimQuery) -> Result<ClaimFilter, PortError> {
    let offset = i64::try_from(query.offset())
        .map_err(|_| PortError::validation_field("page out of range", "page"))?;

    Ok(ClaimFilter {
        status: query.status.map(to_db_status),
        member_id: query.member_id.clone(),
        fraud_flag: query.fraud_flag,
        limit: i64::from(query.page_size),
        offset,
    })
}

fn row_to_record(row: ClaimRow) -> Result<ClaimRecord, PortError> {
    let rejection_categories = row
        .rejection_categories
        .iter()
        .map(|code| code.parse::<RejectionCategory>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| PortError::Transformation { message })?;

    Ok(ClaimRecord {
        id: ClaimId::from(row.claim_id),
        member_id: row.member_id,
        provider_id: row.provider_id,
        diagnosis_code: row.diagnosis_code,
        procedure_code: row.procedure_code,
        claim_amount: row.claim_amount,
        status: to_domain_status(row.status),
        fraud_flag: row.fraud_flag,
        approved_amount: row.approved_amount,
        rejection_reasons: row.rejection_reasons,
        rejection_categories,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
