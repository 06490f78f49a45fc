//! Core Kernel - Foundational types shared across the claims service
//!
//! This crate provides the building blocks used by every other crate:
//! - Strongly-typed identifiers
//! - Port abstractions for swappable data sources and stores

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClaimId, RequestId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
