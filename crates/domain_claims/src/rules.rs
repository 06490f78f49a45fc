//! Adjudication rules
//!
//! Each rule inspects one aspect of a claim against reference data and
//! returns the updated running state. Rules never short-circuit each other:
//! the adjudicator folds every rule over the state in a fixed order.
//!
//! A rule may only lower the running approved amount. Rejections zero it,
//! the benefit cap clamps it with `min`, so a zero set by an earlier rule
//! is never raised again.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::PortError;

use crate::claim::ClaimRequest;
use crate::ports::ReferenceDataPort;
use crate::reference::MemberStatus;

/// Multiple of the average procedure cost above which a claim is flagged
pub const FRAUD_COST_MULTIPLIER: Decimal = dec!(2.0);

/// Why a claim was rejected
///
/// The rendered message is part of the API contract and is stored
/// verbatim with the claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    UnknownMember(String),
    IneligibleMember { member_id: String, status: MemberStatus },
    UnknownProvider(String),
    NoBenefitCoverage(String),
    UnknownProcedure(String),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::UnknownMember(id) => write!(f, "Unknown member: {}", id),
            RejectionReason::IneligibleMember { member_id, status } => {
                write!(f, "Member {} is not eligible (status: {})", member_id, status)
            }
            RejectionReason::UnknownProvider(id) => write!(f, "Unknown provider: {}", id),
            RejectionReason::NoBenefitCoverage(code) => {
                write!(f, "No benefit coverage for diagnosis: {}", code)
            }
            RejectionReason::UnknownProcedure(code) => {
                write!(f, "Unknown procedure code: {}", code)
            }
        }
    }
}

impl RejectionReason {
    /// Stable category of the rejection, independent of message wording
    pub fn category(&self) -> RejectionCategory {
        match self {
            RejectionReason::UnknownMember(_) => RejectionCategory::UnknownMember,
            RejectionReason::IneligibleMember { .. } => RejectionCategory::IneligibleMember,
            RejectionReason::UnknownProvider(_) => RejectionCategory::UnknownProvider,
            RejectionReason::NoBenefitCoverage(_) => RejectionCategory::NoBenefitCoverage,
            RejectionReason::UnknownProcedure(_) => RejectionCategory::UnknownProcedure,
        }
    }
}

/// Machine-readable kind of a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCategory {
    UnknownMember,
    IneligibleMember,
    UnknownProvider,
    NoBenefitCoverage,
    UnknownProcedure,
}

impl RejectionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionCategory::UnknownMember => "unknown_member",
            RejectionCategory::IneligibleMember => "ineligible_member",
            RejectionCategory::UnknownProvider => "unknown_provider",
            RejectionCategory::NoBenefitCoverage => "no_benefit_coverage",
            RejectionCategory::UnknownProcedure => "unknown_procedure",
        }
    }
}

impl fmt::Display for RejectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RejectionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown_member" => Ok(RejectionCategory::UnknownMember),
            "ineligible_member" => Ok(RejectionCategory::IneligibleMember),
            "unknown_provider" => Ok(RejectionCategory::UnknownProvider),
            "no_benefit_coverage" => Ok(RejectionCategory::NoBenefitCoverage),
            "unknown_procedure" => Ok(RejectionCategory::UnknownProcedure),
            other => Err(format!("unknown rejection category: {}", other)),
        }
    }
}

/// Running state threaded through the rule chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjudicationState {
    pub approved_amount: Decimal,
    pub fraud_flag: bool,
    pub rejection_reasons: Vec<RejectionReason>,
}

impl AdjudicationState {
    /// Starting state: the full claimed amount, no flags
    pub fn new(claim_amount: Decimal) -> Self {
        Self {
            approved_amount: claim_amount,
            fraud_flag: false,
            rejection_reasons: Vec::new(),
        }
    }

    /// Records a rejection and zeroes the approved amount
    pub fn reject(mut self, reason: RejectionReason) -> Self {
        self.rejection_reasons.push(reason);
        self.approved_amount = Decimal::ZERO;
        self
    }

    /// Lowers the approved amount to at most `cap`
    pub fn cap(mut self, cap: Decimal) -> Self {
        self.approved_amount = self.approved_amount.min(cap);
        self
    }

    pub fn flag_fraud(mut self) -> Self {
        self.fraud_flag = true;
        self
    }
}

/// A single adjudication check
pub trait AdjudicationRule: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Evaluates the claim and returns the updated state
    ///
    /// # Errors
    ///
    /// Only a reference data fault is an error; unknown keys are
    /// rejections recorded in the state.
    fn apply(
        &self,
        claim: &ClaimRequest,
        reference: &dyn ReferenceDataPort,
        state: AdjudicationState,
    ) -> Result<AdjudicationState, PortError>;
}

/// Member must exist and be active
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberEligibilityRule;

impl AdjudicationRule for MemberEligibilityRule {
    fn name(&self) -> &'static str {
        "member_eligibility"
    }

    fn apply(
        &self,
        claim: &ClaimRequest,
        reference: &dyn ReferenceDataPort,
        state: AdjudicationState,
    ) -> Result<AdjudicationState, PortError> {
        let state = match reference.member_status(&claim.member_id)? {
            None => state.reject(RejectionReason::UnknownMember(claim.member_id.clone())),
            Some(status) if !status.is_active() => {
                state.reject(RejectionReason::IneligibleMember {
                    member_id: claim.member_id.clone(),
                    status,
                })
            }
            Some(_) => state,
        };
        Ok(state)
    }
}

/// Provider must be registered
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderValidityRule;

impl AdjudicationRule for ProviderValidityRule {
    fn name(&self) -> &'static str {
        "provider_validity"
    }

    fn apply(
        &self,
        claim: &ClaimRequest,
        reference: &dyn ReferenceDataPort,
        state: AdjudicationState,
    ) -> Result<AdjudicationState, PortError> {
        let state = match reference.provider(&claim.provider_id)? {
            None => state.reject(RejectionReason::UnknownProvider(claim.provider_id.clone())),
            Some(_) => state,
        };
        Ok(state)
    }
}

/// Diagnosis must be covered; amounts above the limit are capped
#[derive(Debug, Clone, Copy, Default)]
pub struct BenefitLimitRule;

impl AdjudicationRule for BenefitLimitRule {
    fn name(&self) -> &'static str {
        "benefit_limit"
    }

    fn apply(
        &self,
        claim: &ClaimRequest,
        reference: &dyn ReferenceDataPort,
        state: AdjudicationState,
    ) -> Result<AdjudicationState, PortError> {
        let state = match reference.benefit_limit(&claim.diagnosis_code)? {
            None => state.reject(RejectionReason::NoBenefitCoverage(claim.diagnosis_code.clone())),
            Some(limit) if claim.claim_amount > limit => state.cap(limit),
            Some(_) => state,
        };
        Ok(state)
    }
}

/// Procedure must be known; amounts far above its average cost are flagged
#[derive(Debug, Clone, Copy, Default)]
pub struct FraudHeuristicRule;

impl AdjudicationRule for FraudHeuristicRule {
    fn name(&self) -> &'static str {
        "fraud_heuristic"
    }

    fn apply(
        &self,
        claim: &ClaimRequest,
        reference: &dyn ReferenceDataPort,
        state: AdjudicationState,
    ) -> Result<AdjudicationState, PortError> {
        let state = match reference.procedure_average_cost(&claim.procedure_code)? {
            None => state.reject(RejectionReason::UnknownProcedure(claim.procedure_code.clone())),
            // Strictly greater: exactly the threshold is not flagged.
            // A threshold beyond Decimal range cannot be exceeded.
            Some(avg_cost) => match avg_cost.checked_mul(FRAUD_COST_MULTIPLIER) {
                Some(threshold) if claim.claim_amount > threshold => state.flag_fraud(),
                _ => state,
            },
        };
        Ok(state)
    }
}

/// The standard rule chain in evaluation order
pub fn standard_rules() -> Vec<Box<dyn AdjudicationRule>> {
    vec![
        Box::new(MemberEligibilityRule),
        Box::new(ProviderValidityRule),
        Box::new(BenefitLimitRule),
        Box::new(FraudHeuristicRule),
    ]
}
