//! Property-Based Test Generators
//!
//! Provides proptest strategies for claims against the seeded reference
//! data. Identifiers are drawn mostly from the seeded tables with some
//! unknown values mixed in, so every rule path gets exercised.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::ClaimRequest;

pub const SEEDED_MEMBERS: &[&str] = &["M123", "M124", "M125", "M126"];
pub const SEEDED_PROVIDERS: &[&str] = &["H456", "H457", "H458"];
pub const SEEDED_DIAGNOSES: &[&str] = &["D001", "D002", "D003", "D004"];
pub const SEEDED_PROCEDURES: &[&str] = &["P001", "P002", "P003", "P004"];

/// Strategy for an identifier that is usually one of `known`
pub fn identifier_strategy(known: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::sample::select(known).prop_map(str::to_string),
        1 => "[A-Z][0-9]{3,6}",
    ]
}

/// Strategy for a positive claim amount with up to two decimal places
pub fn claim_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..20_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for structurally valid claims
pub fn claim_request_strategy() -> impl Strategy<Value = ClaimRequest> {
    (
        identifier_strategy(SEEDED_MEMBERS),
        identifier_strategy(SEEDED_PROVIDERS),
        identifier_strategy(SEEDED_DIAGNOSES),
        identifier_strategy(SEEDED_PROCEDURES),
        claim_amount_strategy(),
    )
        .prop_map(|(member, provider, diagnosis, procedure, amount)| {
            ClaimRequest::new(member, provider, diagnosis, procedure, amount)
        })
}

/// Strategy for claims whose identifiers are all present in the seeded data
pub fn known_claim_request_strategy() -> impl Strategy<Value = ClaimRequest> {
    (
        proptest::sample::select(SEEDED_MEMBERS),
        proptest::sample::select(SEEDED_PROVIDERS),
        proptest::sample::select(SEEDED_DIAGNOSES),
        proptest::sample::select(SEEDED_PROCEDURES),
        claim_amount_strategy(),
    )
        .prop_map(|(member, provider, diagnosis, procedure, amount)| {
            ClaimRequest::new(member, provider, diagnosis, procedure, amount)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_generated_amounts_are_positive(amount in claim_amount_strategy()) {
            prop_assert!(amount > Decimal::ZERO);
        }

        #[test]
        fn test_generated_identifiers_are_nonempty(claim in claim_request_strategy()) {
            prop_assert!(!claim.member_id.is_empty());
            prop_assert!(claim.procedure_code.len() <= domain_claims::claim::MAX_CODE_LEN);
        }
    }
}
