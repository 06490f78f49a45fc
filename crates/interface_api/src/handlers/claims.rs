//! Claims handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::ClaimId;

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Adjudicates and records a claim
///
/// Rejected claims are still created; the verdict is in the body.
pub async fn submit_claim(
    State(state): State<AppState>,
    payload: Result<Json<SubmitClaimRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let record = state.service.submit(request.into()).await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Lists claims, newest first
pub async fn list_claims(
    State(state): State<AppState>,
    params: Result<Query<ListClaimsParams>, QueryRejection>,
) -> Result<Json<PaginatedClaimsResponse>, ApiError> {
    let Query(params) = params?;
    let query = params.into_query()?;

    let page = state.service.list(&query).await?;

    Ok(Json(page.into()))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimDetailResponse>, ApiError> {
    let not_found = || ApiError::NotFound(format!("Claim {} not found", id));

    let claim_id: ClaimId = id.parse().map_err(|_| not_found())?;
    let record = state.service.get(claim_id).await?.ok_or_else(not_found)?;

    Ok(Json(record.into()))
}
