//! Reference data records consulted during adjudication

use serde::{Deserialize, Serialize};
use std::fmt;

/// Eligibility status of a member
///
/// Only `Active` members are eligible. Statuses other than the two known
/// ones are kept verbatim so they can be reported back in rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemberStatus {
    Active,
    Inactive,
    Other(String),
}

impl MemberStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, MemberStatus::Active)
    }

    pub fn as_str(&self) -> &str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Other(status) => status,
        }
    }
}

impl From<String> for MemberStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "active" => MemberStatus::Active,
            "inactive" => MemberStatus::Inactive,
            _ => MemberStatus::Other(status),
        }
    }
}

impl From<&str> for MemberStatus {
    fn from(status: &str) -> Self {
        MemberStatus::from(status.to_string())
    }
}

impl From<MemberStatus> for String {
    fn from(status: MemberStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plan member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub status: MemberStatus,
}

impl Member {
    pub fn new(name: impl Into<String>, status: MemberStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// A registered care provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
}

impl Provider {
    pub fn new(name: impl Into<String>, provider_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider_type: provider_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_status_parsing() {
        assert_eq!(MemberStatus::from("active"), MemberStatus::Active);
        assert_eq!(MemberStatus::from("inactive"), MemberStatus::Inactive);
        assert_eq!(
            MemberStatus::from("suspended"),
            MemberStatus::Other("suspended".to_string())
        );
    }

    #[test]
    fn test_only_active_is_eligible() {
        assert!(MemberStatus::Active.is_active());
        assert!(!MemberStatus::Inactive.is_active());
        assert!(!MemberStatus::from("suspended").is_active());
    }

    #[test]
    fn test_member_status_serializes_lowercase() {
        let json = serde_json::to_string(&MemberStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");

        let parsed: MemberStatus = serde_json::from_str("\"terminated\"").unwrap();
        assert_eq!(parsed.to_string(), "terminated");
    }
}
