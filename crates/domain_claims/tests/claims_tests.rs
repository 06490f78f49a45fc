//! Comprehensive tests for domain_claims

use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, HealthCheckResult, PortError};

use domain_claims::adjudication::{AdjudicationResult, AdjudicationStatus, ClaimAdjudicator};
use domain_claims::adapters::{InMemoryClaimAdapter, StaticReferenceData};
use domain_claims::claim::{ClaimRecord, ClaimRequest, NewClaimRecord};
use domain_claims::ports::{ClaimPage, ClaimQuery, ClaimRepositoryPort, ReferenceDataPort};
use domain_claims::reference::{MemberStatus, Provider};
use domain_claims::{ClaimError, ClaimService, FRAUD_COST_MULTIPLIER};

fn adjudicator() -> ClaimAdjudicator {
    ClaimAdjudicator::new(Arc::new(StaticReferenceData::seeded()))
}

fn adjudicate(
    member_id: &str,
    provider_id: &str,
    diagnosis_code: &str,
    procedure_code: &str,
    amount: Decimal,
) -> AdjudicationResult {
    adjudicator()
        .adjudicate_fields(member_id, provider_id, diagnosis_code, procedure_code, amount)
        .expect("static reference data never faults")
}

// ============================================================================
// Adjudication Scenarios
// ============================================================================

mod adjudication_scenarios {
    use super::*;

    #[test]
    fn test_approved_claim() {
        let result = adjudicate("M123", "H456", "D001", "P001", dec!(30000));

        assert_eq!(result.status, AdjudicationStatus::Approved);
        assert_eq!(result.approved_amount, dec!(30000));
        assert!(!result.fraud_flag);
        assert!(result.rejection_reasons.is_empty());
    }

    #[test]
    fn test_partial_approval_benefit_limit() {
        // D001 limit is 40000; 50000 > 2 * 20000 also trips the fraud flag
        let result = adjudicate("M123", "H456", "D001", "P001", dec!(50000));

        assert_eq!(result.status, AdjudicationStatus::Partial);
        assert_eq!(result.approved_amount, dec!(40000));
        assert!(result.fraud_flag);
        assert!(result.rejection_reasons.is_empty());
    }

    #[test]
    fn test_boundary_amount_is_approved_and_not_flagged() {
        let result = adjudicate("M123", "H456", "D001", "P001", dec!(40000));

        assert_eq!(result.status, AdjudicationStatus::Approved);
        assert_eq!(result.approved_amount, dec!(40000));
        assert!(!result.fraud_flag);
    }

    #[test]
    fn test_fraud_flag_does_not_reject() {
        let result = adjudicate("M123", "H456", "D002", "P001", dec!(45000));

        assert!(result.fraud_flag);
        assert_eq!(result.status, AdjudicationStatus::Approved);
        assert_eq!(result.approved_amount, dec!(45000));
    }

    #[test]
    fn test_inactive_member_rejected() {
        let result = adjudicate("M125", "H456", "D001", "P001", dec!(10000));

        assert_eq!(result.status, AdjudicationStatus::Rejected);
        assert_eq!(result.approved_amount, Decimal::ZERO);
        assert_eq!(
            result.rejection_reasons,
            vec!["Member M125 is not eligible (status: inactive)".to_string()]
        );
    }

    #[test]
    fn test_unknown_member_rejected() {
        let result = adjudicate("UNKNOWN", "H456", "D001", "P001", dec!(10000));

        assert_eq!(result.status, AdjudicationStatus::Rejected);
        assert!(result
            .rejection_reasons
            .contains(&"Unknown member: UNKNOWN".to_string()));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result = adjudicate("M123", "UNKNOWN", "D001", "P001", dec!(10000));

        assert_eq!(result.status, AdjudicationStatus::Rejected);
        assert_eq!(result.rejection_reasons, vec!["Unknown provider: UNKNOWN".to_string()]);
    }

    #[test]
    fn test_unknown_diagnosis_rejected() {
        let result = adjudicate("M123", "H456", "D999", "P001", dec!(10000));

        assert_eq!(result.status, AdjudicationStatus::Rejected);
        assert!(result
            .rejection_reasons
            .contains(&"No benefit coverage for diagnosis: D999".to_string()));
    }

    #[test]
    fn test_unknown_procedure_rejected() {
        let result = adjudicate("M123", "H456", "D001", "P999", dec!(10000));

        assert_eq!(result.status, AdjudicationStatus::Rejected);
        assert_eq!(result.rejection_reasons, vec!["Unknown procedure code: P999".to_string()]);
    }

    #[test]
    fn test_all_checks_run_and_reasons_keep_rule_order() {
        let result = adjudicate("UNKNOWN", "H999", "D999", "P999", dec!(10000));

        assert_eq!(result.status, AdjudicationStatus::Rejected);
        assert_eq!(
            result.rejection_reasons,
            vec![
                "Unknown member: UNKNOWN".to_string(),
                "Unknown provider: H999".to_string(),
                "No benefit coverage for diagnosis: D999".to_string(),
                "Unknown procedure code: P999".to_string(),
            ]
        );
    }

    #[test]
    fn test_unknown_provider_and_diagnosis_yield_two_reasons() {
        let result = adjudicate("M123", "H999", "D999", "P001", dec!(10000));
        assert_eq!(result.rejection_reasons.len(), 2);
    }

    #[test]
    fn test_rejection_overrides_benefit_cap_and_keeps_fraud_flag() {
        // Over the D001 cap and over the fraud threshold, but the provider is unknown
        let result = adjudicate("M123", "H999", "D001", "P001", dec!(50000));

        assert_eq!(result.status, AdjudicationStatus::Rejected);
        assert_eq!(result.approved_amount, Decimal::ZERO);
        assert!(result.fraud_flag);
    }

    #[test]
    fn test_fraud_threshold_strict_inequality() {
        let avg_cost = dec!(20000);
        let threshold = avg_cost * FRAUD_COST_MULTIPLIER;

        let at = adjudicate("M123", "H456", "D004", "P001", threshold);
        assert!(!at.fraud_flag);

        let above = adjudicate("M123", "H456", "D004", "P001", threshold + dec!(0.01));
        assert!(above.fraud_flag);
    }

    #[test]
    fn test_adjudication_is_deterministic() {
        let first = adjudicate("M124", "H457", "D003", "P003", dec!(26000));
        let second = adjudicate("M124", "H457", "D003", "P003", dec!(26000));
        assert_eq!(first, second);
        assert_eq!(first.status, AdjudicationStatus::Partial);
        assert_eq!(first.approved_amount, dec!(25000));
        assert!(first.fraud_flag);
    }

    #[test]
    fn test_other_member_status_is_reported_verbatim() {
        let reference = StaticReferenceData::seeded().with_member(
            "M200",
            domain_claims::Member::new("Frank", MemberStatus::from("suspended")),
        );
        let result = ClaimAdjudicator::new(Arc::new(reference))
            .adjudicate_fields("M200", "H456", "D001", "P001", dec!(100))
            .unwrap();

        assert_eq!(
            result.rejection_reasons,
            vec!["Member M200 is not eligible (status: suspended)".to_string()]
        );
    }
}

// ============================================================================
// Reference Data Faults
// ============================================================================

mod reference_faults {
    use super::*;

    /// Reference store whose provider registry is unreachable
    struct UnreachableProviderRegistry {
        inner: StaticReferenceData,
    }

    impl DomainPort for UnreachableProviderRegistry {}

    impl ReferenceDataPort for UnreachableProviderRegistry {
        fn member_status(&self, member_id: &str) -> Result<Option<MemberStatus>, PortError> {
            self.inner.member_status(member_id)
        }

        fn provider(&self, _provider_id: &str) -> Result<Option<Provider>, PortError> {
            Err(PortError::ServiceUnavailable {
                service: "provider-registry".to_string(),
            })
        }

        fn benefit_limit(&self, diagnosis_code: &str) -> Result<Option<Decimal>, PortError> {
            self.inner.benefit_limit(diagnosis_code)
        }

        fn procedure_average_cost(
            &self,
            procedure_code: &str,
        ) -> Result<Option<Decimal>, PortError> {
            self.inner.procedure_average_cost(procedure_code)
        }
    }

    #[test]
    fn test_lookup_fault_is_error_not_rejection() {
        let adjudicator = ClaimAdjudicator::new(Arc::new(UnreachableProviderRegistry {
            inner: StaticReferenceData::seeded(),
        }));

        let err = adjudicator
            .adjudicate_fields("M123", "H456", "D001", "P001", dec!(100))
            .unwrap_err();

        assert!(matches!(err, ClaimError::ReferenceData(_)));
        assert!(err.is_transient());
    }
}

// ============================================================================
// Claim Service
// ============================================================================

mod service_tests {
    use super::*;

    struct BrokenRepository;

    impl DomainPort for BrokenRepository {}

    #[async_trait]
    impl HealthCheckable for BrokenRepository {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::unhealthy("broken", 0, "connection refused")
        }
    }

    #[async_trait]
    impl ClaimRepositoryPort for BrokenRepository {
        async fn save(&self, _claim: NewClaimRecord) -> Result<ClaimRecord, PortError> {
            Err(PortError::connection("connection refused"))
        }

        async fn get(&self, _id: ClaimId) -> Result<Option<ClaimRecord>, PortError> {
            Err(PortError::connection("connection refused"))
        }

        async fn list(&self, _query: &ClaimQuery) -> Result<ClaimPage, PortError> {
            Err(PortError::connection("connection refused"))
        }
    }

    fn service() -> (ClaimService, InMemoryClaimAdapter) {
        let store = InMemoryClaimAdapter::new();
        (ClaimService::new(adjudicator(), Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn test_submit_persists_verdict() {
        let (service, store) = service();

        let record = service
            .submit(ClaimRequest::new("M123", "H456", "D001", "P001", dec!(50000)))
            .await
            .unwrap();

        assert_eq!(record.status, AdjudicationStatus::Partial);
        assert_eq!(record.approved_amount, dec!(40000));
        assert!(record.fraud_flag);
        assert_eq!(store.len().await, 1);
        assert_eq!(service.get(record.id).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_rejected_claim_is_still_persisted() {
        let (service, store) = service();

        let record = service
            .submit(ClaimRequest::new("M125", "H456", "D001", "P001", dec!(10000)))
            .await
            .unwrap();

        assert!(record.is_rejected());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_validates_query() {
        let (service, _) = service();

        let err = service
            .list(&ClaimQuery::default().paginate(0, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, ClaimError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn test_list_empty_has_zero_pages() {
        let (service, _) = service();

        let page = service.list(&ClaimQuery::default()).await.unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_repository_failure_surfaces() {
        let service = ClaimService::new(adjudicator(), Arc::new(BrokenRepository));

        let err = service
            .submit(ClaimRequest::new("M123", "H456", "D001", "P001", dec!(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, ClaimError::Repository(_)));
        assert!(err.is_transient());

        assert!(!service.health().await.is_operational());
    }
}

// ============================================================================
// Invariants
// ============================================================================

fn id_strategy(known: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::sample::select(known).prop_map(str::to_string),
        1 => "[A-Z][0-9]{3}".prop_map(|s| format!("X{}", s)),
    ]
}

fn claim_strategy() -> impl Strategy<Value = ClaimRequest> {
    (
        id_strategy(&["M123", "M124", "M125", "M126"]),
        id_strategy(&["H456", "H457", "H458"]),
        id_strategy(&["D001", "D002", "D003", "D004"]),
        id_strategy(&["P001", "P002", "P003", "P004"]),
        (1i64..20_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    )
        .prop_map(|(member, provider, diagnosis, procedure, amount)| {
            ClaimRequest::new(member, provider, diagnosis, procedure, amount)
        })
}

proptest! {
    #[test]
    fn prop_status_invariants_hold(claim in claim_strategy()) {
        let result = adjudicator().adjudicate(&claim).unwrap();
        let rejected = !result.rejection_reasons.is_empty();

        match result.status {
            AdjudicationStatus::Rejected => {
                prop_assert!(rejected);
                prop_assert_eq!(result.approved_amount, Decimal::ZERO);
            }
            AdjudicationStatus::Partial => {
                prop_assert!(!rejected);
                prop_assert!(result.approved_amount < claim.claim_amount);
            }
            AdjudicationStatus::Approved => {
                prop_assert!(!rejected);
                prop_assert_eq!(result.approved_amount, claim.claim_amount);
            }
        }
        prop_assert!(result.approved_amount >= Decimal::ZERO);
        prop_assert!(result.approved_amount <= claim.claim_amount);
    }

    #[test]
    fn prop_benefit_cap_respected(claim in claim_strategy()) {
        let reference = StaticReferenceData::seeded();
        let result = adjudicator().adjudicate(&claim).unwrap();

        if let Some(limit) = reference.benefit_limit(&claim.diagnosis_code).unwrap() {
            prop_assert!(result.approved_amount <= limit);
        }
    }

    #[test]
    fn prop_fraud_flag_matches_threshold(claim in claim_strategy()) {
        let reference = StaticReferenceData::seeded();
        let result = adjudicator().adjudicate(&claim).unwrap();

        let expected = reference
            .procedure_average_cost(&claim.procedure_code)
            .unwrap()
            .map_or(false, |avg| claim.claim_amount > avg * FRAUD_COST_MULTIPLIER);
        prop_assert_eq!(result.fraud_flag, expected);
    }
}
