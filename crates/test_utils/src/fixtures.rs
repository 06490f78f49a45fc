//! Pre-built Test Fixtures
//!
//! Provides ready-to-use claims and reference data. The reference data
//! matches the seeded development tables, so fixture claims adjudicate
//! to predictable verdicts.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use uuid::Uuid;

use core_kernel::ClaimId;
use domain_claims::{ClaimRequest, StaticReferenceData};

/// Seeded reference data shared by tests
pub static REFERENCE_DATA: Lazy<StaticReferenceData> = Lazy::new(StaticReferenceData::seeded);

/// Fixture for reference data
pub struct ReferenceFixtures;

impl ReferenceFixtures {
    /// The seeded development reference data
    pub fn seeded() -> StaticReferenceData {
        REFERENCE_DATA.clone()
    }

    /// The seeded reference data in its on-disk JSON form
    pub fn seeded_json() -> String {
        serde_json::to_string(&*REFERENCE_DATA).unwrap_or_default()
    }
}

/// Fixture for claims whose verdicts are known against the seeded data
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Active member, known provider, within limit: APPROVED 30000
    pub fn approved() -> ClaimRequest {
        ClaimRequest::new("M123", "H456", "D001", "P001", dec!(30000))
    }

    /// Over the D001 limit of 40000 and above twice P001's cost: PARTIAL, flagged
    pub fn partial_flagged() -> ClaimRequest {
        ClaimRequest::new("M123", "H456", "D001", "P001", dec!(50000))
    }

    /// Inactive member M125: REJECTED
    pub fn inactive_member() -> ClaimRequest {
        ClaimRequest::new("M125", "H456", "D001", "P001", dec!(10000))
    }

    /// Unknown member
    pub fn unknown_member() -> ClaimRequest {
        ClaimRequest::new("M999", "H456", "D001", "P001", dec!(10000))
    }

    /// Unknown provider
    pub fn unknown_provider() -> ClaimRequest {
        ClaimRequest::new("M123", "H999", "D001", "P001", dec!(10000))
    }

    /// Unknown diagnosis code
    pub fn unknown_diagnosis() -> ClaimRequest {
        ClaimRequest::new("M123", "H456", "D999", "P001", dec!(10000))
    }

    /// Within the D002 limit but above twice P001's cost: APPROVED, flagged
    pub fn approved_flagged() -> ClaimRequest {
        ClaimRequest::new("M123", "H456", "D002", "P001", dec!(45000))
    }

    /// The API submission body for a claim
    pub fn submission_json(claim: &ClaimRequest) -> Value {
        json!({
            "member_id": claim.member_id,
            "provider_id": claim.provider_id,
            "diagnosis_code": claim.diagnosis_code,
            "procedure_code": claim.procedure_code,
            "claim_amount": claim_amount_f64(claim.claim_amount),
        })
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic claim ID for testing
    pub fn claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440002))
    }
}

fn claim_amount_f64(amount: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    amount.to_f64().unwrap_or_default()
}
