//! Claim intake and persisted claim records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use crate::adjudication::{AdjudicationResult, AdjudicationStatus};
use crate::rules::RejectionCategory;

/// Maximum length of member and provider identifiers
pub const MAX_PARTY_ID_LEN: usize = 50;

/// Maximum length of diagnosis and procedure codes
pub const MAX_CODE_LEN: usize = 20;

/// A claim submitted for adjudication
///
/// Structural constraints (non-empty identifiers within the length bounds
/// above, `claim_amount > 0`) are enforced by the caller before the claim
/// reaches the adjudicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub member_id: String,
    pub provider_id: String,
    pub diagnosis_code: String,
    pub procedure_code: String,
    pub claim_amount: Decimal,
}

impl ClaimRequest {
    /// Creates a claim request from its five fields
    pub fn new(
        member_id: impl Into<String>,
        provider_id: impl Into<String>,
        diagnosis_code: impl Into<String>,
        procedure_code: impl Into<String>,
        claim_amount: Decimal,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            provider_id: provider_id.into(),
            diagnosis_code: diagnosis_code.into(),
            procedure_code: procedure_code.into(),
            claim_amount,
        }
    }
}

/// A claim and its verdict, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaimRecord {
    pub request: ClaimRequest,
    pub result: AdjudicationResult,
}

impl NewClaimRecord {
    pub fn new(request: ClaimRequest, result: AdjudicationResult) -> Self {
        Self { request, result }
    }
}

/// A persisted claim
///
/// Records are written once per submission and never mutated afterwards;
/// `updated_at` equals `created_at` for every record created today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: ClaimId,
    pub member_id: String,
    pub provider_id: String,
    pub diagnosis_code: String,
    pub procedure_code: String,
    pub claim_amount: Decimal,
    pub status: AdjudicationStatus,
    pub fraud_flag: bool,
    pub approved_amount: Decimal,
    pub rejection_reasons: Vec<String>,
    pub rejection_categories: Vec<RejectionCategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClaimRecord {
    /// Materializes a record from a new claim with a generated identifier
    pub fn create(new_claim: NewClaimRecord, id: ClaimId, now: DateTime<Utc>) -> Self {
        let NewClaimRecord { request, result } = new_claim;
        Self {
            id,
            member_id: request.member_id,
            provider_id: request.provider_id,
            diagnosis_code: request.diagnosis_code,
            procedure_code: request.procedure_code,
            claim_amount: request.claim_amount,
            status: result.status,
            fraud_flag: result.fraud_flag,
            approved_amount: result.approved_amount,
            rejection_reasons: result.rejection_reasons,
            rejection_categories: result.rejection_categories,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the claim was rejected outright
    pub fn is_rejected(&self) -> bool {
        self.status == AdjudicationStatus::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_record_copies_request_and_verdict() {
        let request = ClaimRequest::new("M123", "H456", "D001", "P001", dec!(50000));
        let result = AdjudicationResult {
            status: AdjudicationStatus::Partial,
            approved_amount: dec!(40000),
            fraud_flag: true,
            rejection_reasons: vec![],
            rejection_categories: vec![],
        };
        let now = Utc::now();
        let id = ClaimId::new();

        let record = ClaimRecord::create(NewClaimRecord::new(request, result), id, now);

        assert_eq!(record.id, id);
        assert_eq!(record.member_id, "M123");
        assert_eq!(record.claim_amount, dec!(50000));
        assert_eq!(record.approved_amount, dec!(40000));
        assert_eq!(record.status, AdjudicationStatus::Partial);
        assert!(record.fraud_flag);
        assert_eq!(record.created_at, record.updated_at);
        assert!(!record.is_rejected());
    }
}
