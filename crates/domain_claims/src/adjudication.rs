//! Claim adjudication

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::claim::ClaimRequest;
use crate::error::ClaimError;
use crate::ports::ReferenceDataPort;
use crate::rules::{
    standard_rules, AdjudicationRule, AdjudicationState, RejectionCategory, RejectionReason,
};

/// Adjudication verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdjudicationStatus {
    /// Paid in full
    Approved,
    /// Paid up to the benefit limit
    Partial,
    /// Not paid
    Rejected,
}

impl AdjudicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjudicationStatus::Approved => "APPROVED",
            AdjudicationStatus::Partial => "PARTIAL",
            AdjudicationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for AdjudicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjudicationStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(AdjudicationStatus::Approved),
            "PARTIAL" => Ok(AdjudicationStatus::Partial),
            "REJECTED" => Ok(AdjudicationStatus::Rejected),
            other => Err(ClaimError::InvalidQuery(format!("unknown claim status: {}", other))),
        }
    }
}

/// Result of claim adjudication
///
/// Invariants:
/// - `Rejected` iff `rejection_reasons` is non-empty iff `approved_amount` is zero
/// - `Partial` iff no reasons and `approved_amount < claim_amount`
/// - `Approved` iff no reasons and `approved_amount == claim_amount`
///
/// `fraud_flag` is independent of the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjudicationResult {
    pub status: AdjudicationStatus,
    pub approved_amount: Decimal,
    pub fraud_flag: bool,
    pub rejection_reasons: Vec<String>,
    /// One category per reason, in the same order
    pub rejection_categories: Vec<RejectionCategory>,
}

impl AdjudicationResult {
    /// Resolves the final verdict from the state left by the rule chain
    pub fn resolve(claim_amount: Decimal, state: AdjudicationState) -> Self {
        let rejection_reasons: Vec<String> =
            state.rejection_reasons.iter().map(ToString::to_string).collect();
        let rejection_categories = state
            .rejection_reasons
            .iter()
            .map(RejectionReason::category)
            .collect();

        let (status, approved_amount) = if !rejection_reasons.is_empty() {
            (AdjudicationStatus::Rejected, Decimal::ZERO)
        } else if state.approved_amount < claim_amount {
            (AdjudicationStatus::Partial, state.approved_amount)
        } else {
            (AdjudicationStatus::Approved, state.approved_amount)
        };

        Self {
            status,
            approved_amount,
            fraud_flag: state.fraud_flag,
            rejection_reasons,
            rejection_categories,
        }
    }
}

/// Runs claims through the rule chain against a reference data source
///
/// The adjudicator holds no mutable state; one instance is shared by all
/// request handlers.
#[derive(Clone)]
pub struct ClaimAdjudicator {
    reference: Arc<dyn ReferenceDataPort>,
    rules: Arc<[Box<dyn AdjudicationRule>]>,
}

impl ClaimAdjudicator {
    /// Creates an adjudicator with the standard rule chain
    pub fn new(reference: Arc<dyn ReferenceDataPort>) -> Self {
        Self::with_rules(reference, standard_rules())
    }

    /// Creates an adjudicator with a custom rule chain
    pub fn with_rules(
        reference: Arc<dyn ReferenceDataPort>,
        rules: Vec<Box<dyn AdjudicationRule>>,
    ) -> Self {
        Self {
            reference,
            rules: rules.into(),
        }
    }

    /// Adjudicates a claim
    ///
    /// Every rule is evaluated, in order, regardless of earlier outcomes.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::ReferenceData` only when a reference lookup
    /// faults. Unknown members, providers, diagnoses and procedures are
    /// reported as rejection reasons, never as errors.
    pub fn adjudicate(&self, claim: &ClaimRequest) -> Result<AdjudicationResult, ClaimError> {
        let reference = self.reference.as_ref();
        let state = self.rules.iter().try_fold(
            AdjudicationState::new(claim.claim_amount),
            |state, rule| rule.apply(claim, reference, state),
        )?;

        let result = AdjudicationResult::resolve(claim.claim_amount, state);

        info!(
            member = %claim.member_id,
            status = %result.status,
            approved = %result.approved_amount,
            fraud = result.fraud_flag,
            "Adjudicated claim"
        );

        Ok(result)
    }

    /// Adjudicates a claim given as its five fields
    pub fn adjudicate_fields(
        &self,
        member_id: &str,
        provider_id: &str,
        diagnosis_code: &str,
        procedure_code: &str,
        claim_amount: Decimal,
    ) -> Result<AdjudicationResult, ClaimError> {
        self.adjudicate(&ClaimRequest::new(
            member_id,
            provider_id,
            diagnosis_code,
            procedure_code,
            claim_amount,
        ))
    }
}

impl fmt::Debug for ClaimAdjudicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<_> = self.rules.iter().map(|rule| rule.name()).collect();
        f.debug_struct("ClaimAdjudicator").field("rules", &rules).finish()
    }
}
