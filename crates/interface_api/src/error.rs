//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use domain_claims::{ClaimError, ErrorKind};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// A domain operation was refused
    #[error(transparent)]
    Domain(#[from] ClaimError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    /// Status code and error code reported for this error
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Domain(e) => match e.kind() {
                ErrorKind::Unauthorized => (StatusCode::FORBIDDEN, "unauthorized"),
                ErrorKind::AccessDenied => (StatusCode::FORBIDDEN, "access_denied"),
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found"),
                ErrorKind::DuplicatePolicy => (StatusCode::CONFLICT, "duplicate_policy"),
                ErrorKind::InvalidState => (StatusCode::CONFLICT, "invalid_state"),
                ErrorKind::InvalidArgument => (StatusCode::BAD_REQUEST, "invalid_argument"),
                ErrorKind::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            },
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();

        let details = match &self {
            ApiError::Validation(errors) => Some(
                errors
                    .field_errors()
                    .into_iter()
                    .map(|(field, errs)| format!("{}: {} error(s)", field, errs.len()))
                    .collect(),
            ),
            _ => None,
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, PrincipalId};
    use domain_claims::ClaimState;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let principal = PrincipalId::new();
        let cases = [
            (ClaimError::unauthorized(principal, "pay"), StatusCode::FORBIDDEN),
            (ClaimError::ClaimNotFound(ClaimId::FIRST), StatusCode::NOT_FOUND),
            (ClaimError::DuplicatePolicy(principal), StatusCode::CONFLICT),
            (
                ClaimError::InvalidState {
                    claim_id: ClaimId::FIRST,
                    from: ClaimState::Paid,
                    to: ClaimState::Paid,
                },
                StatusCode::CONFLICT,
            ),
            (ClaimError::invalid_argument("empty"), StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status().0, expected);
        }
    }

    #[test]
    fn test_missing_token_is_401() {
        assert_eq!(ApiError::Unauthorized.status().0, StatusCode::UNAUTHORIZED);
    }
}
