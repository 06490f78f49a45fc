//! API key authentication

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Header carrying the client's API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Auth errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing API key")]
    MissingKey,
    #[error("Invalid API key")]
    InvalidKey,
}

/// Checks the request headers against the configured key
///
/// # Arguments
///
/// * `headers` - Request headers
/// * `expected` - Configured API key
pub fn verify_api_key(headers: &HeaderMap, expected: &str) -> Result<(), AuthError> {
    let provided = headers
        .get(API_KEY_HEADER)
        .ok_or(AuthError::MissingKey)?
        .to_str()
        .map_err(|_| AuthError::InvalidKey)?;

    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(AuthError::InvalidKey)
    }
}
