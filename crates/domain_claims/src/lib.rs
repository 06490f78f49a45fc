//! Claims Domain
//!
//! This crate implements claim intake and adjudication: a submitted claim
//! is checked against reference data (member eligibility, provider
//! registry, benefit limits, procedure costs) and receives a verdict that
//! is then persisted through the claim repository port.
//!
//! # Adjudication Pipeline
//!
//! ```text
//! ClaimRequest -> member eligibility -> provider validity -> benefit limit
//!              -> fraud heuristic -> status resolution -> AdjudicationResult
//! ```
//!
//! Every rule runs for every claim, so all applicable rejection reasons
//! surface together.

pub mod claim;
pub mod reference;
pub mod rules;
pub mod adjudication;
pub mod error;
pub mod ports;
pub mod service;
pub mod adapters;

pub use claim::{ClaimRequest, ClaimRecord, NewClaimRecord};
pub use reference::{Member, MemberStatus, Provider};
pub use rules::{
    AdjudicationRule, AdjudicationState, RejectionCategory, RejectionReason,
    FRAUD_COST_MULTIPLIER,
};
pub use adjudication::{AdjudicationResult, AdjudicationStatus, ClaimAdjudicator};
pub use error::ClaimError;
pub use ports::{ReferenceDataPort, ClaimRepositoryPort, ClaimQuery, ClaimPage};
pub use service::ClaimService;
pub use adapters::{InMemoryClaimAdapter, StaticReferenceData};
