//! Claims Domain Ports
//!
//! This module defines the port interfaces the claims domain needs from
//! its collaborators, so the backing systems can be swapped without
//! touching the adjudication logic.
//!
//! - [`ReferenceDataPort`]: read-only member, provider, benefit-limit and
//!   procedure-cost lookups consumed by the adjudicator. Lookups are
//!   synchronous; adjudication never suspends.
//! - [`ClaimRepositoryPort`]: persistence of adjudicated claims with
//!   filtered, paginated listing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{ClaimAdjudicator, StaticReferenceData, InMemoryClaimAdapter};
//! use std::sync::Arc;
//!
//! let reference: Arc<dyn ReferenceDataPort> = Arc::new(StaticReferenceData::seeded());
//! let repository: Arc<dyn ClaimRepositoryPort> = Arc::new(InMemoryClaimAdapter::new());
//! ```

use async_trait::async_trait;
use rust_decimal::Decimal;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::adjudication::AdjudicationStatus;
use crate::claim::{ClaimRecord, NewClaimRecord};
use crate::error::ClaimError;
use crate::reference::{MemberStatus, Provider};

/// Default number of claims per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Read-only reference data consulted by the adjudicator
///
/// Each lookup returns `Ok(None)` when the key is unknown; that is an
/// expected business outcome. `Err` is reserved for a store that cannot
/// answer at all, which the adjudicator surfaces to its caller instead of
/// turning it into a rejection.
pub trait ReferenceDataPort: DomainPort {
    /// Returns the eligibility status of a member
    fn member_status(&self, member_id: &str) -> Result<Option<MemberStatus>, PortError>;

    /// Returns the provider registered under the identifier
    fn provider(&self, provider_id: &str) -> Result<Option<Provider>, PortError>;

    /// Returns the maximum payable amount for a diagnosis
    fn benefit_limit(&self, diagnosis_code: &str) -> Result<Option<Decimal>, PortError>;

    /// Returns the historical average cost of a procedure
    fn procedure_average_cost(&self, procedure_code: &str) -> Result<Option<Decimal>, PortError>;
}

/// Filters and pagination for listing claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimQuery {
    /// Filter by adjudication status
    pub status: Option<AdjudicationStatus>,
    /// Filter by member identifier
    pub member_id: Option<String>,
    /// Filter by fraud flag
    pub fraud_flag: Option<bool>,
    /// 1-based page number
    pub page: u32,
    /// Number of claims per page
    pub page_size: u32,
}

impl Default for ClaimQuery {
    fn default() -> Self {
        Self {
            status: None,
            member_id: None,
            fraud_flag: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClaimQuery {
    /// Creates a query restricted to one status
    pub fn by_status(status: AdjudicationStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Creates a query restricted to one member
    pub fn by_member(member_id: impl Into<String>) -> Self {
        Self {
            member_id: Some(member_id.into()),
            ..Default::default()
        }
    }

    /// Sets the page and page size
    pub fn paginate(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Checks the pagination bounds
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.page < 1 {
            return Err(ClaimError::InvalidQuery("page must be at least 1".to_string()));
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(ClaimError::InvalidQuery(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// Number of records skipped before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Returns true if the record satisfies every filter set on the query
    pub fn matches(&self, record: &ClaimRecord) -> bool {
        self.status.map_or(true, |status| record.status == status)
            && self
                .member_id
                .as_deref()
                .map_or(true, |member_id| record.member_id == member_id)
            && self.fraud_flag.map_or(true, |flag| record.fraud_flag == flag)
    }
}

/// One page of claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPage {
    pub items: Vec<ClaimRecord>,
    /// Total number of claims matching the filters
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    /// Number of pages, zero when nothing matches
    pub pages: u64,
}

impl ClaimPage {
    /// Builds a page, deriving the page count from the total
    pub fn new(items: Vec<ClaimRecord>, total: u64, query: &ClaimQuery) -> Self {
        let page_size = u64::from(query.page_size.max(1));
        Self {
            items,
            total,
            page: query.page,
            page_size: query.page_size,
            pages: total.div_ceil(page_size),
        }
    }
}

/// Persistence for adjudicated claims
#[async_trait]
pub trait ClaimRepositoryPort: DomainPort + HealthCheckable {
    /// Persists a new claim, assigning its identifier and timestamps
    async fn save(&self, claim: NewClaimRecord) -> Result<ClaimRecord, PortError>;

    /// Retrieves a claim by identifier
    async fn get(&self, id: ClaimId) -> Result<Option<ClaimRecord>, PortError>;

    /// Lists claims newest first
    async fn list(&self, query: &ClaimQuery) -> Result<ClaimPage, PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        let query = ClaimQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(query.offset(), 0);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_offset() {
        assert_eq!(ClaimQuery::default().paginate(3, 2).offset(), 4);
    }

    #[test]
    fn test_validate_rejects_out_of_range_pagination() {
        assert!(ClaimQuery::default().paginate(0, 10).validate().is_err());
        assert!(ClaimQuery::default().paginate(1, 0).validate().is_err());
        assert!(ClaimQuery::default().paginate(1, MAX_PAGE_SIZE + 1).validate().is_err());
        assert!(ClaimQuery::default().paginate(1, MAX_PAGE_SIZE).validate().is_ok());
    }

    #[test]
    fn test_page_count() {
        let query = ClaimQuery::default().paginate(1, 2);
        assert_eq!(ClaimPage::new(vec![], 0, &query).pages, 0);
        assert_eq!(ClaimPage::new(vec![], 4, &query).pages, 2);
        assert_eq!(ClaimPage::new(vec![], 5, &query).pages, 3);
    }
}
