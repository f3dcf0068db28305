//! Basic Authentication middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

use common::{AppError, AppResult};

use crate::api::AppState;

/// Reject requests without the configured Basic credentials.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> AppResult<Response> {
    let Authorization(basic) = request
        .headers()
        .typed_get::<Authorization<Basic>>()
        .ok_or(AppError::Unauthorized)?;

    if !state.credentials.matches(basic.username(), basic.password()) {
        tracing::debug!(username = basic.username(), "Rejected credentials");
        return Err(AppError::InvalidCredentials);
    }

    Ok(next.run(request).await)
}
