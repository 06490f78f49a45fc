//! Port abstractions
//!
//! The claims domain talks to its data sources (reference tables, claim
//! store) through traits defined in `domain_claims`. Those traits share
//! the error and health types declared here, so the HTTP layer can
//! classify any adapter failure without knowing which adapter raised it.
//!
//! ```text
//!   handlers ──► ClaimService ──► ClaimAdjudicator
//!                    │                  │
//!                    ▼                  ▼
//!          ClaimRepositoryPort   ReferenceDataPort
//!            │            │              │
//!        Postgres     in-memory     static tables
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by an adapter
///
/// Lookups that find nothing return `Ok(None)`; `NotFound` is for
/// operations where absence is itself a fault.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The adapter refused its input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The backing system could not be reached
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The backing system answered that it cannot serve requests
    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    /// Stored data could not be mapped to domain types
    #[error("Transformation error: {message}")]
    Transformation { message: String },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl PortError {
    /// Rejected input, naming the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// True when the same call may succeed later without any change
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. } | PortError::ServiceUnavailable { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Supertrait of every port: adapters are shared between request tasks
pub trait DomainPort: Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Outcome of one adapter health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    /// Round trip of the check in milliseconds
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>, latency_ms: u64) -> Self {
        Self::at_status(adapter_id, AdapterHealth::Healthy, latency_ms, None)
    }

    pub fn unhealthy(
        adapter_id: impl Into<String>,
        latency_ms: u64,
        message: impl Into<String>,
    ) -> Self {
        Self::at_status(adapter_id, AdapterHealth::Unhealthy, latency_ms, Some(message.into()))
    }

    fn at_status(
        adapter_id: impl Into<String>,
        status: AdapterHealth,
        latency_ms: u64,
        message: Option<String>,
    ) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }

    /// Whether the adapter can take traffic
    pub fn is_operational(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Adapters that can report their own health
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_store_is_transient() {
        assert!(PortError::connection("connection refused").is_transient());
        assert!(PortError::ServiceUnavailable {
            service: "provider-registry".to_string(),
        }
        .is_transient());
    }

    #[test]
    fn test_bad_input_is_not_transient() {
        let error = PortError::validation_field("offset too large", "page");

        assert!(!error.is_transient());
        assert!(!error.is_not_found());
        assert_eq!(error.to_string(), "Validation error: offset too large");
    }

    #[test]
    fn test_not_found_message_names_entity() {
        let error = PortError::NotFound {
            entity_type: "Claim".to_string(),
            id: "CLM-123".to_string(),
        };

        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Not found: Claim with id CLM-123");
    }

    #[test]
    fn test_health_result_operational() {
        let healthy = HealthCheckResult::healthy("memory-claim-store", 0);
        let down = HealthCheckResult::unhealthy("postgres-claim-adapter", 12, "refused");

        assert!(healthy.is_operational());
        assert!(healthy.message.is_none());
        assert!(!down.is_operational());
        assert_eq!(down.message.as_deref(), Some("refused"));
    }

    #[test]
    fn test_health_status_serializes_snake_case() {
        let json = serde_json::to_value(AdapterHealth::Unhealthy).unwrap();
        assert_eq!(json, "unhealthy");
    }
}
