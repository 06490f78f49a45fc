//! Custom Test Assertions
//!
//! Provides assertion helpers for adjudication verdicts that give more
//! meaningful failure messages than bare `assert_eq!`.

use rust_decimal::Decimal;

use domain_claims::{AdjudicationResult, AdjudicationStatus, ClaimRecord, ClaimRequest};

/// Asserts that a verdict is internally consistent with its claim
///
/// # Panics
///
/// Panics if any of these do not hold:
/// - REJECTED iff reasons are present, and then the approved amount is zero
/// - every reason has a category
/// - APPROVED means the full claimed amount is approved
/// - PARTIAL means `0 < approved < claimed`
/// - the approved amount never exceeds the claimed amount
pub fn assert_verdict_consistent(claim: &ClaimRequest, result: &AdjudicationResult) {
    assert_eq!(
        result.status == AdjudicationStatus::Rejected,
        !result.rejection_reasons.is_empty(),
        "Status {} inconsistent with reasons {:?}",
        result.status,
        result.rejection_reasons
    );
    assert_eq!(
        result.rejection_categories.len(),
        result.rejection_reasons.len(),
        "Each reason needs exactly one category"
    );
    assert!(
        result.approved_amount <= claim.claim_amount,
        "Approved {} exceeds claimed {}",
        result.approved_amount,
        claim.claim_amount
    );

    match result.status {
        AdjudicationStatus::Rejected => assert_eq!(
            result.approved_amount,
            Decimal::ZERO,
            "Rejected claim approved {}",
            result.approved_amount
        ),
        AdjudicationStatus::Approved => assert_eq!(
            result.approved_amount, claim.claim_amount,
            "Approved claim does not carry the full amount"
        ),
        AdjudicationStatus::Partial => assert!(
            result.approved_amount > Decimal::ZERO && result.approved_amount < claim.claim_amount,
            "Partial approval {} outside (0, {})",
            result.approved_amount,
            claim.claim_amount
        ),
    }
}

/// Asserts that a verdict has the expected status and approved amount
pub fn assert_verdict(result: &AdjudicationResult, status: AdjudicationStatus, approved: Decimal) {
    assert_eq!(result.status, status, "Unexpected status; reasons: {:?}", result.rejection_reasons);
    assert_eq!(result.approved_amount, approved, "Unexpected approved amount");
}

/// Asserts that a stored record carries the submitted claim unchanged
pub fn assert_record_matches(record: &ClaimRecord, claim: &ClaimRequest) {
    assert_eq!(record.member_id, claim.member_id);
    assert_eq!(record.provider_id, claim.provider_id);
    assert_eq!(record.diagnosis_code, claim.diagnosis_code);
    assert_eq!(record.procedure_code, claim.procedure_code);
    assert_eq!(
        record.claim_amount, claim.claim_amount,
        "Stored amount {} differs from submitted {}",
        record.claim_amount, claim.claim_amount
    );
    assert!(record.created_at <= record.updated_at);
}

/// Asserts that records are ordered newest first
pub fn assert_newest_first(records: &[ClaimRecord]) {
    for pair in records.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "Claim {} listed before newer claim {}",
            pair[0].id,
            pair[1].id
        );
    }
}
