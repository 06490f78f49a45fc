//! Claims DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::ClaimId;
use domain_claims::ports::DEFAULT_PAGE_SIZE;
use domain_claims::{
    AdjudicationStatus, ClaimError, ClaimPage, ClaimQuery, ClaimRecord, ClaimRequest,
    RejectionCategory,
};

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitClaimRequest {
    #[validate(length(min = 1, max = 50))]
    pub member_id: String,
    #[validate(length(min = 1, max = 50))]
    pub provider_id: String,
    #[validate(length(min = 1, max = 20))]
    pub diagnosis_code: String,
    #[validate(length(min = 1, max = 20))]
    pub procedure_code: String,
    #[validate(custom(function = "positive_amount"))]
    pub claim_amount: Decimal,
}

fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        Ok(())
    } else {
        let mut error = ValidationError::new("positive");
        error.message = Some("must be greater than 0".into());
        Err(error)
    }
}

impl From<SubmitClaimRequest> for ClaimRequest {
    fn from(request: SubmitClaimRequest) -> Self {
        ClaimRequest::new(
            request.member_id,
            request.provider_id,
            request.diagnosis_code,
            request.procedure_code,
            request.claim_amount,
        )
    }
}

/// Verdict returned on submission
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub claim_id: ClaimId,
    pub status: AdjudicationStatus,
    pub fraud_flag: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub approved_amount: Decimal,
    pub rejection_reasons: Option<Vec<String>>,
    pub rejection_categories: Option<Vec<RejectionCategory>>,
}

impl From<ClaimRecord> for ClaimResponse {
    fn from(record: ClaimRecord) -> Self {
        Self {
            claim_id: record.id,
            status: record.status,
            fraud_flag: record.fraud_flag,
            approved_amount: record.approved_amount,
            rejection_reasons: non_empty(record.rejection_reasons),
            rejection_categories: non_empty(record.rejection_categories),
        }
    }
}

/// Stored claim with its verdict
#[derive(Debug, Serialize)]
pub struct ClaimDetailResponse {
    pub claim_id: ClaimId,
    pub member_id: String,
    pub provider_id: String,
    pub diagnosis_code: String,
    pub procedure_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub claim_amount: Decimal,
    pub status: AdjudicationStatus,
    pub fraud_flag: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub approved_amount: Decimal,
    pub rejection_reasons: Option<Vec<String>>,
    pub rejection_categories: Option<Vec<RejectionCategory>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClaimRecord> for ClaimDetailResponse {
    fn from(record: ClaimRecord) -> Self {
        Self {
            claim_id: record.id,
            member_id: record.member_id,
            provider_id: record.provider_id,
            diagnosis_code: record.diagnosis_code,
            procedure_code: record.procedure_code,
            claim_amount: record.claim_amount,
            status: record.status,
            fraud_flag: record.fraud_flag,
            approved_amount: record.approved_amount,
            rejection_reasons: non_empty(record.rejection_reasons),
            rejection_categories: non_empty(record.rejection_categories),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedClaimsResponse {
    pub items: Vec<ClaimDetailResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub pages: u64,
}

impl From<ClaimPage> for PaginatedClaimsResponse {
    fn from(page: ClaimPage) -> Self {
        Self {
            items: page.items.into_iter().map(ClaimDetailResponse::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            pages: page.pages,
        }
    }
}

/// Query string for `GET /claims`
#[derive(Debug, Default, Deserialize)]
pub struct ListClaimsParams {
    pub status: Option<String>,
    pub member_id: Option<String>,
    pub fraud_flag: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListClaimsParams {
    /// Converts the query string into a listing query
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::InvalidQuery` for an unknown status
    pub fn into_query(self) -> Result<ClaimQuery, ClaimError> {
        let status = self
            .status
            .map(|s| s.to_ascii_uppercase().parse::<AdjudicationStatus>())
            .transpose()?;

        Ok(ClaimQuery {
            status,
            member_id: self.member_id,
            fraud_flag: self.fraud_flag,
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

/// Empty lists are emitted as `null`
fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::claim::{MAX_CODE_LEN, MAX_PARTY_ID_LEN};
    use rust_decimal_macros::dec;

    fn request(amount: Decimal) -> SubmitClaimRequest {
        SubmitClaimRequest {
            member_id: "M123".to_string(),
            provider_id: "H456".to_string(),
            diagnosis_code: "D001".to_string(),
            procedure_code: "P001".to_string(),
            claim_amount: amount,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request(dec!(0.01)).validate().is_ok());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert!(request(Decimal::ZERO).validate().is_err());
        assert!(request(dec!(-5)).validate().is_err());
    }

    #[test]
    fn test_length_bounds() {
        let mut req = request(dec!(10));
        req.diagnosis_code = "D".repeat(MAX_CODE_LEN + 1);
        assert!(req.validate().is_err());

        let mut req = request(dec!(10));
        req.member_id = String::new();
        assert!(req.validate().is_err());

        let mut req = request(dec!(10));
        req.provider_id = "H".repeat(MAX_PARTY_ID_LEN);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_status_param_is_case_insensitive() {
        let params = ListClaimsParams {
            status: Some("rejected".to_string()),
            ..Default::default()
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.status, Some(AdjudicationStatus::Rejected));
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_unknown_status_param() {
        let params = ListClaimsParams {
            status: Some("PENDING".to_string()),
            ..Default::default()
        };
        assert!(params.into_query().is_err());
    }

    #[test]
    fn test_amounts_serialize_as_numbers() {
        let response = ClaimResponse {
            claim_id: ClaimId::new(),
            status: AdjudicationStatus::Partial,
            fraud_flag: true,
            approved_amount: dec!(40000),
            rejection_reasons: None,
            rejection_categories: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["approved_amount"], 40000.0);
        assert_eq!(json["status"], "PARTIAL");
        assert!(json["rejection_reasons"].is_null());
        assert!(json["rejection_categories"].is_null());
    }

    #[test]
    fn test_rejected_record_exposes_categories() {
        let record = ClaimRecord {
            id: ClaimId::new(),
            member_id: "M125".to_string(),
            provider_id: "H999".to_string(),
            diagnosis_code: "D001".to_string(),
            procedure_code: "P001".to_string(),
            claim_amount: dec!(100),
            status: AdjudicationStatus::Rejected,
            fraud_flag: false,
            approved_amount: Decimal::ZERO,
            rejection_reasons: vec![
                "Member M125 is not eligible (status: inactive)".to_string(),
                "Unknown provider: H999".to_string(),
            ],
            rejection_categories: vec![
                RejectionCategory::IneligibleMember,
                RejectionCategory::UnknownProvider,
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(ClaimResponse::from(record)).unwrap();
        assert_eq!(
            json["rejection_categories"],
            serde_json::json!(["ineligible_member", "unknown_provider"])
        );
    }
}
