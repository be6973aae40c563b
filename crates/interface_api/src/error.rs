//! API error handling

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_customer::CustomerError;

/// API error types
///
/// `kind` is the machine-readable name written to the `error` field of the
/// response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {message}")]
    NotFound { kind: &'static str, message: String },

    #[error("Bad request: {message}")]
    BadRequest { kind: &'static str, message: String },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    /// Maps an engine error for operations where a missing customer is a
    /// rejected request rather than a missing resource
    pub fn rejected(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(_) => ApiError::BadRequest {
                kind: "NotFound",
                message: err.to_string(),
            },
            other => other.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match &err {
            CustomerError::ValidationFailed(failure) => ApiError::BadRequest {
                kind: failure.kind(),
                message: err.to_string(),
            },
            CustomerError::DuplicateDocumentNumber(_) => ApiError::BadRequest {
                kind: "DuplicateDocumentNumber",
                message: err.to_string(),
            },
            CustomerError::NotFound(_) => ApiError::NotFound {
                kind: "NotFound",
                message: err.to_string(),
            },
            CustomerError::PersistenceFailed(source) => {
                error!(error = %source, "Customer store failure");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            kind: "InvalidBody",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest {
            kind: "InvalidPath",
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest {
            kind: "InvalidQuery",
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match self {
            ApiError::NotFound { kind, message } => (kind, message),
            ApiError::BadRequest { kind, message } => (kind, message),
            ApiError::ServiceUnavailable(msg) => ("ServiceUnavailable", msg),
            ApiError::Internal(msg) => ("PersistenceFailed", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{CustomerId, PortError};
    use domain_customer::ValidationFailure;

    #[test]
    fn test_validation_failure_is_bad_request() {
        let err: ApiError = CustomerError::from(ValidationFailure::MissingPhone).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::BadRequest { kind: "MissingPhone", .. }));
    }

    #[test]
    fn test_not_found_depends_on_operation() {
        let id = CustomerId::new(9);
        let lookup: ApiError = CustomerError::not_found(id).into();
        let update = ApiError::rejected(CustomerError::not_found(id));

        assert_eq!(lookup.status(), StatusCode::NOT_FOUND);
        assert_eq!(update.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_persistence_failure_is_internal() {
        let err: ApiError =
            CustomerError::persistence(PortError::connection("refused")).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_duplicate_is_bad_request() {
        let err = ApiError::rejected(CustomerError::DuplicateDocumentNumber(42));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
