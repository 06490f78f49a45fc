//! In-process reference data tables

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use core_kernel::{DomainPort, PortError};

use crate::error::ClaimError;
use crate::ports::ReferenceDataPort;
use crate::reference::{Member, MemberStatus, Provider};

/// Immutable reference tables held in memory
///
/// Built once at startup and shared read-only, so lookups need no locking.
///
/// # JSON format
///
/// ```json
/// {
///   "members": { "M123": { "name": "Alice Johnson", "status": "active" } },
///   "providers": { "H456": { "name": "City General Hospital", "type": "hospital" } },
///   "benefit_limits": { "D001": 40000 },
///   "procedure_avg_costs": { "P001": 20000 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticReferenceData {
    #[serde(default)]
    members: HashMap<String, Member>,
    #[serde(default)]
    providers: HashMap<String, Provider>,
    #[serde(default)]
    benefit_limits: HashMap<String, Decimal>,
    #[serde(default)]
    procedure_avg_costs: HashMap<String, Decimal>,
}

impl StaticReferenceData {
    /// Creates empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in tables used when no reference data file is configured
    pub fn seeded() -> Self {
        Self::new()
            .with_member("M123", Member::new("Alice Johnson", MemberStatus::Active))
            .with_member("M124", Member::new("Bob Smith", MemberStatus::Active))
            .with_member("M125", Member::new("Carol White", MemberStatus::Inactive))
            .with_member("M126", Member::new("David Brown", MemberStatus::Active))
            .with_provider("H456", Provider::new("City General Hospital", "hospital"))
            .with_provider("H457", Provider::new("Downtown Clinic", "clinic"))
            .with_provider("H458", Provider::new("Specialty Care Center", "specialist"))
            .with_benefit_limit("D001", dec!(40000))
            .with_benefit_limit("D002", dec!(60000))
            .with_benefit_limit("D003", dec!(25000))
            .with_benefit_limit("D004", dec!(100000))
            .with_procedure_cost("P001", dec!(20000))
            .with_procedure_cost("P002", dec!(35000))
            .with_procedure_cost("P003", dec!(10000))
            .with_procedure_cost("P004", dec!(50000))
    }

    /// Parses tables from a JSON document
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::ReferenceDataLoad` if the document is malformed
    /// or carries a non-positive benefit limit or a negative average cost.
    pub fn from_json_str(json: &str) -> Result<Self, ClaimError> {
        let data: Self = serde_json::from_str(json)
            .map_err(|e| ClaimError::ReferenceDataLoad(e.to_string()))?;
        data.check_amounts()?;
        Ok(data)
    }

    /// Reads tables from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ClaimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClaimError::ReferenceDataLoad(format!("{}: {}", path.display(), e))
        })?;
        let data = Self::from_json_str(&json)?;

        info!(
            path = %path.display(),
            members = data.members.len(),
            providers = data.providers.len(),
            diagnoses = data.benefit_limits.len(),
            procedures = data.procedure_avg_costs.len(),
            "Loaded reference data"
        );
        Ok(data)
    }

    pub fn with_member(mut self, member_id: impl Into<String>, member: Member) -> Self {
        self.members.insert(member_id.into(), member);
        self
    }

    pub fn with_provider(mut self, provider_id: impl Into<String>, provider: Provider) -> Self {
        self.providers.insert(provider_id.into(), provider);
        self
    }

    pub fn with_benefit_limit(mut self, diagnosis_code: impl Into<String>, limit: Decimal) -> Self {
        self.benefit_limits.insert(diagnosis_code.into(), limit);
        self
    }

    pub fn with_procedure_cost(
        mut self,
        procedure_code: impl Into<String>,
        avg_cost: Decimal,
    ) -> Self {
        self.procedure_avg_costs.insert(procedure_code.into(), avg_cost);
        self
    }

    /// Benefit limits must be positive; average costs must not be negative
    fn check_amounts(&self) -> Result<(), ClaimError> {
        if let Some((code, limit)) = self
            .benefit_limits
            .iter()
            .find(|(_, limit)| *limit <= &Decimal::ZERO)
        {
            return Err(ClaimError::ReferenceDataLoad(format!(
                "benefit limit for {} must be positive, got {}",
                code, limit
            )));
        }

        if let Some((code, cost)) = self
            .procedure_avg_costs
            .iter()
            .find(|(_, cost)| *cost < &Decimal::ZERO)
        {
            return Err(ClaimError::ReferenceDataLoad(format!(
                "average cost for {} must not be negative, got {}",
                code, cost
            )));
        }

        Ok(())
    }
}

impl DomainPort for StaticReferenceData {}

impl ReferenceDataPort for StaticReferenceData {
    fn member_status(&self, member_id: &str) -> Result<Option<MemberStatus>, PortError> {
        Ok(self.members.get(member_id).map(|m| m.status.clone()))
    }

    fn provider(&self, provider_id: &str) -> Result<Option<Provider>, PortError> {
        Ok(self.providers.get(provider_id).cloned())
    }

    fn benefit_limit(&self, diagnosis_code: &str) -> Result<Option<Decimal>, PortError> {
        Ok(self.benefit_limits.get(diagnosis_code).copied())
    }

    fn procedure_average_cost(&self, procedure_code: &str) -> Result<Option<Decimal>, PortError> {
        Ok(self.procedure_avg_costs.get(procedure_code).copied())
    }
}
