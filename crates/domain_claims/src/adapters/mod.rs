//! Adapters for the Claims Domain Ports
//!
//! # Available Adapters
//!
//! - **StaticReferenceData**: immutable in-process reference tables, built
//!   from the seeded defaults or a JSON document
//! - **InMemoryClaimAdapter**: claim store kept in process memory, used by
//!   tests and the `memory` storage mode
//!
//! The PostgreSQL claim store lives in `infra_db`.
//!
//! ```rust,ignore
//! use domain_claims::adapters::{InMemoryClaimAdapter, StaticReferenceData};
//! use domain_claims::{ClaimAdjudicator, ClaimRepositoryPort};
//! use std::sync::Arc;
//!
//! let adjudicator = ClaimAdjudicator::new(Arc::new(StaticReferenceData::seeded()));
//! let repository: Arc<dyn ClaimRepositoryPort> = Arc::new(InMemoryClaimAdapter::new());
//! ```

pub mod static_reference;
pub mod memory;

pub use static_reference::StaticReferenceData;
pub use memory::InMemoryClaimAdapter;
