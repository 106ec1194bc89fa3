//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::error::{DomainError, RepoError};
use blog_shared::ErrorResponse;
use std::fmt;

use crate::observability::current_request_id;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(Vec<String>),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation(errors) => ErrorResponse::validation_failed(errors.clone()),
            AppError::Internal(detail) => {
                // Diagnostic detail goes to the log, never to the client
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        let error = match current_request_id() {
            Some(request_id) => error.with_request_id(request_id),
            None => error,
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidId(e) => AppError::BadRequest(e.to_string()),
            DomainError::EmptySearchTerm => {
                AppError::BadRequest(DomainError::EmptySearchTerm.to_string())
            }
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Repo(e) => e.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Connection(_) | RepoError::NotConnected => {
                tracing::error!("Database connection error: {}", err);
            }
            RepoError::Index(_) | RepoError::Query(_) | RepoError::Corrupt(_) => {
                tracing::error!("Database query error: {}", err);
            }
        }
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use blog_core::InvalidIdError;

    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        let invalid: AppError = DomainError::InvalidId(InvalidIdError("x".into())).into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let empty: AppError = DomainError::EmptySearchTerm.into();
        assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);

        let invalid_fields: AppError = DomainError::Validation(vec!["title".into()]).into();
        assert_eq!(invalid_fields.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn storage_errors_map_to_500() {
        let err: AppError = DomainError::Repo(RepoError::Query("boom".into())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError = RepoError::NotConnected.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
