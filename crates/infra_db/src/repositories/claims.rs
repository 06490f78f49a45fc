//! Claims repository implementation
//!
//! This module provides database access for adjudicated claims: insertion
//! of a claim with its verdict, lookup by identifier, and filtered,
//! paginated listing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = r#"
    claim_id, member_id, provider_id, diagnosis_code, procedure_code,
    claim_amount, status, fraud_flag, approved_amount, rejection_reasons,
    rejection_categories, created_at, updated_at
"#;

/// Repository for managing claims data
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by its identifier
    ///
    /// # Arguments
    ///
    /// * `claim_id` - The claim identifier
    ///
    /// # Returns
    ///
    /// The claim record, or `None` if no claim has the identifier
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, claim_id: Uuid) -> Result<Option<ClaimRow>, DatabaseError> {
        let sql = format!("SELECT {} FROM claims WHERE claim_id = $1", CLAIM_COLUMNS);

        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Inserts an adjudicated claim
    ///
    /// # Arguments
    ///
    /// * `claim` - The claim data to insert
    ///
    /// # Returns
    ///
    /// The created claim with generated identifier and timestamps
    #[instrument(skip(self, claim), fields(member_id = %claim.member_id))]
    pub async fn insert(&self, claim: NewClaim) -> Result<ClaimRow, DatabaseError> {
        let claim_id = Uuid::now_v7();
        let now = Utc::now();

        let sql = format!(
            r#"
            INSERT INTO claims (
                claim_id, member_id, provider_id, diagnosis_code, procedure_code,
                claim_amount, status, fraud_flag, approved_amount, rejection_reasons,
                rejection_categories, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING {}
            "#,
            CLAIM_COLUMNS
        );

        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .bind(&claim.member_id)
            .bind(&claim.provider_id)
            .bind(&claim.diagnosis_code)
            .bind(&claim.procedure_code)
            .bind(claim.claim_amount)
            .bind(claim.status)
            .bind(claim.fraud_flag)
            .bind(claim.approved_amount)
            .bind(&claim.rejection_reasons)
            .bind(&claim.rejection_categories)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Lists claims matching the filter, newest first
    ///
    /// # Returns
    ///
    /// The requested slice of rows and the total number of matching rows
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ClaimFilter) -> Result<(Vec<ClaimRow>, i64), DatabaseError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM claims");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM claims", CLAIM_COLUMNS));
        push_filters(&mut page_query, filter);
        page_query
            .push(" ORDER BY created_at DESC, claim_id DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let rows = page_query
            .build_query_as::<ClaimRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

}

/// Appends the WHERE clause for the filter's set conditions
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ClaimFilter) {
    let mut separator = " WHERE ";

    if let Some(status) = filter.status {
        query.push(separator).push("status = ").push_bind(status);
        separator = " AND ";
    }
    if let Some(member_id) = &filter.member_id {
        query.push(separator).push("member_id = ").push_bind(member_id.clone());
        separator = " AND ";
    }
    if let Some(fraud_flag) = filter.fraud_flag {
        query.push(separator).push("fraud_flag = ").push_bind(fraud_flag);
    }
}

/// Claim status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_status", rename_all = "UPPERCASE")]
pub enum ClaimStatus {
    Approved,
    Partial,
    Rejected,
}

/// Database row for claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub member_id: String,
    pub provider_id: String,
    pub diagnosis_code: String,
    pub procedure_code: String,
    pub claim_amount: Decimal,
    pub status: ClaimStatus,
    pub fraud_flag: bool,
    pub approved_amount: Decimal,
    pub rejection_reasons: Vec<String>,
    /// Category codes, one per reason
    pub rejection_categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting an adjudicated claim
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub member_id: String,
    pub provider_id: String,
    pub diagnosis_code: String,
    pub procedure_code: String,
    pub claim_amount: Decimal,
    pub status: ClaimStatus,
    pub fraud_flag: bool,
    pub approved_amount: Decimal,
    pub rejection_reasons: Vec<String>,
    pub rejection_categories: Vec<String>,
}

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    pub status: Option<ClaimStatus>,
    pub member_id: Option<String>,
    pub fraud_flag: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_filters_without_conditions() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM claims");
        push_filters(&mut query, &ClaimFilter::default());
        assert_eq!(query.sql(), "SELECT COUNT(*) FROM claims");
    }

    #[test]
    fn test_push_filters_joins_conditions() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM claims");
        let filter = ClaimFilter {
            status: Some(ClaimStatus::Rejected),
            member_id: Some("M125".to_string()),
            fraud_flag: Some(false),
            ..Default::default()
        };
        push_filters(&mut query, &filter);
        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM claims WHERE status = $1 AND member_id = $2 AND fraud_flag = $3"
        );
    }
}
