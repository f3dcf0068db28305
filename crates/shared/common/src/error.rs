//! Unified error handling for the HTTP surface.
//!
//! Every failure crossing the service boundary is an [`AppError`]; its
//! variant decides the status code and the response body is always
//! `{"error": "<message>"}`.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, ErrorResponse};
use thiserror::Error;

/// Challenge sent with every 401 response
pub const BASIC_AUTH_CHALLENGE: &str = "Basic realm=\"Authorization Required\"";

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("authentication failed")]
    Unauthorized,

    #[error("incorrect username or password")]
    InvalidCredentials,

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Validation
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("{0}")]
    BadRequest(String),

    // Store errors are reported verbatim
    #[cfg(feature = "database")]
    #[error("{0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Invalid(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            #[cfg(feature = "database")]
            AppError::Database(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Keep the message but report it as a 400.
    pub fn into_bad_request(self) -> Self {
        if self.status() == StatusCode::BAD_REQUEST {
            self
        } else {
            AppError::BadRequest(self.to_string())
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        #[cfg(feature = "database")]
        if let AppError::Database(e) = &self {
            tracing::error!("Database error: {:?}", e);
        }

        let mut response = (status, Json(ErrorResponse::new(self.to_string()))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_AUTH_CHALLENGE),
            );
        }
        response
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
