//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_claims::{
    AdjudicationResult, AdjudicationStatus, ClaimRequest, Member, MemberStatus, NewClaimRecord,
    Provider, RejectionCategory, StaticReferenceData,
};

/// Builder for constructing claim requests
///
/// Defaults to the seeded approved claim (M123 at H456, D001/P001, 30000).
#[derive(Debug, Clone)]
pub struct ClaimRequestBuilder {
    member_id: String,
    provider_id: String,
    diagnosis_code: String,
    procedure_code: String,
    claim_amount: Decimal,
}

impl Default for ClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRequestBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            member_id: "M123".to_string(),
            provider_id: "H456".to_string(),
            diagnosis_code: "D001".to_string(),
            procedure_code: "P001".to_string(),
            claim_amount: dec!(30000),
        }
    }

    /// Uses a random member id that is absent from the seeded data
    pub fn with_unknown_member(mut self) -> Self {
        self.member_id = format!("X{}", (100_000..999_999u32).fake::<u32>());
        self
    }

    /// Uses a random provider id that is absent from the seeded data
    pub fn with_unknown_provider(mut self) -> Self {
        self.provider_id = format!("X{}", (100_000..999_999u32).fake::<u32>());
        self
    }

    /// Sets the member id
    pub fn with_member(mut self, member_id: impl Into<String>) -> Self {
        self.member_id = member_id.into();
        self
    }

    /// Sets the provider id
    pub fn with_provider(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }

    /// Sets the diagnosis code
    pub fn with_diagnosis(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_code = code.into();
        self
    }

    /// Sets the procedure code
    pub fn with_procedure(mut self, code: impl Into<String>) -> Self {
        self.procedure_code = code.into();
        self
    }

    /// Sets the claimed amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.claim_amount = amount;
        self
    }

    /// Builds the claim request
    pub fn build(self) -> ClaimRequest {
        ClaimRequest::new(
            self.member_id,
            self.provider_id,
            self.diagnosis_code,
            self.procedure_code,
            self.claim_amount,
        )
    }

    /// Builds a record ready for a repository, carrying the given verdict
    pub fn build_record(self, status: AdjudicationStatus, fraud_flag: bool) -> NewClaimRecord {
        let request = self.build();
        let (approved_amount, rejection_reasons, rejection_categories) = match status {
            AdjudicationStatus::Rejected => (
                Decimal::ZERO,
                vec![format!("Unknown member: {}", request.member_id)],
                vec![RejectionCategory::UnknownMember],
            ),
            _ => (request.claim_amount, Vec::new(), Vec::new()),
        };

        NewClaimRecord::new(
            request,
            AdjudicationResult {
                status,
                approved_amount,
                fraud_flag,
                rejection_reasons,
                rejection_categories,
            },
        )
    }
}

/// Builder for reference data tables
///
/// Starts empty; tests add exactly the rows they need.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataBuilder {
    data: StaticReferenceData,
}

impl ReferenceDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member with the given status
    pub fn member(mut self, member_id: &str, status: &str) -> Self {
        let member = Member {
            name: format!("Member {}", member_id),
            status: MemberStatus::from(status),
        };
        self.data = self.data.with_member(member_id, member);
        self
    }

    /// Adds a provider
    pub fn provider(mut self, provider_id: &str, provider_type: &str) -> Self {
        let provider = Provider {
            name: format!("Provider {}", provider_id),
            provider_type: provider_type.to_string(),
        };
        self.data = self.data.with_provider(provider_id, provider);
        self
    }

    /// Adds a benefit limit for a diagnosis
    pub fn benefit_limit(mut self, diagnosis_code: &str, limit: Decimal) -> Self {
        self.data = self.data.with_benefit_limit(diagnosis_code, limit);
        self
    }

    /// Adds an average cost for a procedure
    pub fn procedure_cost(mut self, procedure_code: &str, avg_cost: Decimal) -> Self {
        self.data = self.data.with_procedure_cost(procedure_code, avg_cost);
        self
    }

    pub fn build(self) -> StaticReferenceData {
        self.data
    }
}
