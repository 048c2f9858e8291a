//! PSK-based authentication and acting-user extraction.
//!
//! The PSK gate uses constant-time comparison to mitigate timing attacks.
//! The acting user arrives in a header set by the session layer upstream of
//! this service.

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::oid::ObjectId;
use subtle::ConstantTimeEq;

use crate::errors::{AppError, ErrorResponse};

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header identifying the acting user.
pub const USER_ID_HEADER: &str = "x-user-id";

/// PSK authentication layer function that takes the expected PSK as a parameter.
pub async fn psk_auth_layer(
    expected_psk: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // If no PSK is configured, allow all requests (dev mode)
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    // The key arrives either in the dedicated header or as a bearer token
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or_else(|| {
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
        })
        .map(|s| s.to_string());

    match provided {
        Some(provided_key) if constant_time_compare(&provided_key, &expected) => {
            next.run(request).await
        }
        Some(_) => unauthorized_response("Invalid API key"),
        None => unauthorized_response("Missing API key"),
    }
}

/// Acting user id extracted from the request headers.
///
/// Rejects requests without a well-formed id, before any handler runs.
pub struct AuthUser(pub ObjectId);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing acting user".to_string()))?;

        let id = ObjectId::parse_str(raw)
            .map_err(|_| AppError::Unauthorized("Malformed acting user id".to_string()))?;

        Ok(AuthUser(id))
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        message: message.to_string(),
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_constant_time_compare_empty() {
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("", "not-empty"));
    }
}
