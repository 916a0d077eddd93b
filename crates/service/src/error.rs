//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that maps lookup misses to 404 and
//! validation misses to 400, and captures everything else to Sentry before
//! responding with a generic 500. All route handlers return `Result<T, AppError>`.

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mediscreen_core::{Record, Violation};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// No record exists for the lookup key.
    #[error("{0}")]
    NotFound(String),

    /// The request body breaks a field rule.
    #[error("{0}")]
    InvalidBody(String),

    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

impl AppError {
    /// Lookup by `(last_name, first_name)` found nothing.
    #[must_use]
    pub fn name_not_found<R: Record>(last_name: &str, first_name: &str) -> Self {
        Self::NotFound(format!(
            "The {} with the last name provided : '{last_name}' and first name provided : '{first_name}' could not be found in the database.",
            R::KIND
        ))
    }

    /// Lookup by identifier found nothing.
    #[must_use]
    pub fn id_not_found<R: Record>(id: impl Display) -> Self {
        Self::NotFound(format!(
            "The provided uuid : '{id}' is not attributed to an existing {}.",
            R::KIND
        ))
    }

    /// The candidate record failed validation; only the first violation is reported.
    #[must_use]
    pub fn invalid_body<R: Record>(violation: &Violation) -> Self {
        Self::InvalidBody(format!(
            "The {} provided doesn't satisfy the required field: '{violation}'.",
            R::KIND
        ))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) => "Internal server error".to_string(),
            Self::NotFound(_) | Self::InvalidBody(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use mediscreen_core::{Patient, User};

    use super::*;

    #[test]
    fn test_name_not_found_message() {
        let err = AppError::name_not_found::<Patient>("Doe", "Jane");
        assert_eq!(
            err.to_string(),
            "The patient with the last name provided : 'Doe' and first name provided : 'Jane' could not be found in the database."
        );
    }

    #[test]
    fn test_id_not_found_message() {
        let err = AppError::id_not_found::<User>("b42a8ef5-8baa-4bc2-89aa-d18cdc3239f9");
        assert_eq!(
            err.to_string(),
            "The provided uuid : 'b42a8ef5-8baa-4bc2-89aa-d18cdc3239f9' is not attributed to an existing user."
        );
    }

    #[test]
    fn test_invalid_body_message() {
        let violation = Violation {
            field: "lastName",
            message: "The last name is mandatory".to_string(),
        };
        let err = AppError::invalid_body::<Patient>(&violation);
        assert_eq!(
            err.to_string(),
            "The patient provided doesn't satisfy the required field: 'The last name is mandatory'."
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::InvalidBody("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::MissingId("patient"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
