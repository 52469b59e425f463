//! Interview Error Types
//!
//! Interview-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Interview-specific result type alias
pub type InterviewResult<T> = Result<T, InterviewError>;

/// Interview-specific error variants
#[derive(Debug, Error)]
pub enum InterviewError {
    /// Token missing, unknown user, or token does not match the issued one
    #[error("Request denied")]
    Unauthorized,

    /// Unknown user name or wrong password
    #[error("Invalid user name or password")]
    InvalidCredentials,

    /// Sign-up with a user name that already exists
    #[error("User name is already taken")]
    UserNameTaken,

    /// Request input violates a policy (user name, password)
    #[error("{0}")]
    Validation(String),

    /// Interview id is not in the catalog
    #[error("Interview not found")]
    InterviewNotFound,

    /// Credential header absent from the request
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// History append failed and the configured policy propagates it
    #[error("History store unavailable: {0}")]
    HistoryUnavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InterviewError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterviewError::Unauthorized
            | InterviewError::MissingHeader(_)
            | InterviewError::InvalidCredentials => ErrorKind::Unauthorized,
            InterviewError::UserNameTaken => ErrorKind::Conflict,
            InterviewError::Validation(_) => ErrorKind::BadRequest,
            InterviewError::InterviewNotFound => ErrorKind::NotFound,
            InterviewError::HistoryUnavailable(_) => ErrorKind::ServiceUnavailable,
            InterviewError::Database(e) => classify_sqlx_error(e),
            InterviewError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs; clients only see the public text.
    pub fn to_app_error(&self) -> AppError {
        match self {
            InterviewError::Database(_) if self.kind() == ErrorKind::ServiceUnavailable => {
                AppError::new(self.kind(), "Database unavailable")
                    .with_action("Retry the request later")
            }
            InterviewError::Database(_) => AppError::new(self.kind(), "Database error"),
            InterviewError::Internal(_) => AppError::new(self.kind(), "Internal server error"),
            InterviewError::HistoryUnavailable(_) => {
                AppError::new(self.kind(), "History store unavailable")
                    .with_action("Retry the submission later")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            InterviewError::Database(e) => {
                tracing::error!(error = %e, "Interview database error");
            }
            InterviewError::Internal(msg) => {
                tracing::error!(message = %msg, "Interview internal error");
            }
            InterviewError::HistoryUnavailable(msg) => {
                tracing::error!(message = %msg, "History store unavailable");
            }
            InterviewError::Unauthorized => {
                tracing::warn!("Interview request denied");
            }
            InterviewError::InvalidCredentials => {
                tracing::warn!("Sign-in rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Interview error");
            }
        }
    }
}

impl From<InterviewError> for AppError {
    fn from(err: InterviewError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for InterviewError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
