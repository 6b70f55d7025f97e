//! Provisioning Error Types
//!
//! Crate-level errors that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Per-candidate problems during bulk creation are *not* errors; they are
//! reported as `SkipReason`s. These variants cover request-level failures
//! and infrastructure faults.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::domain::value_object::{email::EmailError, login::LoginError};

pub type ProvisioningResult<T> = Result<T, ProvisioningError>;

#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// Login already taken (lost a race against a concurrent create)
    #[error("Login already exists: {0}")]
    LoginTaken(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Contact {0} is already linked to an account")]
    ContactAlreadyLinked(i64),

    #[error("User not found")]
    UserNotFound,

    #[error("Display name cannot be empty")]
    EmptyDisplayName,

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    InvalidLogin(#[from] LoginError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProvisioningError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::LoginTaken(_) | Self::EmailTaken | Self::ContactAlreadyLinked(_) => {
                StatusCode::CONFLICT
            }
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::EmptyDisplayName => StatusCode::BAD_REQUEST,
            Self::InvalidEmail(_) | Self::InvalidLogin(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Password(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LoginTaken(_) | Self::EmailTaken | Self::ContactAlreadyLinked(_) => {
                ErrorKind::Conflict
            }
            Self::UserNotFound => ErrorKind::NotFound,
            Self::EmptyDisplayName => ErrorKind::BadRequest,
            Self::InvalidEmail(_) | Self::InvalidLogin(_) => ErrorKind::UnprocessableEntity,
            Self::Password(_) | Self::Database(_) | Self::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Internal details never leave the process
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            kind if kind.is_server_error() => AppError::internal("Provisioning failed"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            Self::Database(e) => {
                tracing::error!(error = %e, "Provisioning database error");
            }
            Self::Password(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            Self::Internal(msg) => {
                tracing::error!(message = %msg, "Provisioning internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Provisioning request rejected");
            }
        }
    }
}

impl IntoResponse for ProvisioningError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
