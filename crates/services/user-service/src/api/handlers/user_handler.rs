//! User handlers.
//!
//! Each handler validates first and only then mutates, so the response code
//! is chosen before any row changes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::{debug, info};

use common::{AppError, AppResult};
use domain::{clean_id, User, UserRequest, DELETE_SUCCESS};

use crate::api::extractors::JsonBody;
use crate::api::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Create user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("basic_auth" = [])),
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    info!("Creating user...");

    if let Err(err) = state.user_service.validate_new_user(&payload).await {
        debug!(error = %err, request = ?payload, "Validation failed");
        return Err(err.into_bad_request());
    }

    let user = state
        .user_service
        .save(payload)
        .await
        .map_err(|err| {
            debug!(error = %err, "Error creating user");
            err.into_bad_request()
        })?;

    info!(id = user.id, "Successfully created user.");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Retrieve user details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("basic_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<User>> {
    info!("Retrieving user details...");
    let id = parse_id(&raw_id)?;

    let user = state.user_service.get(id).await.map_err(|err| {
        debug!(error = %err, id, "Error retrieving user");
        err
    })?;

    info!(id, "Done retrieving user details.");
    Ok(Json(user))
}

/// Retrieve all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 400, description = "Store error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    info!("Retrieving all users...");

    let users = state.user_service.get_all().await.map_err(|err| {
        debug!(error = %err, "Error retrieving users");
        err.into_bad_request()
    })?;

    info!(count = users.len(), "Done retrieving all users.");
    Ok(Json(users))
}

/// Update user details
///
/// The id in the body is ignored; the path id wins.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("basic_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid ID or validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<JsonBody<User>, AppError>,
) -> AppResult<Json<User>> {
    info!("Updating user details...");
    let id = parse_id(&raw_id)?;

    let JsonBody(mut user) = body.map_err(|err| {
        debug!(error = %err, id, "Malformed body");
        err
    })?;
    user.id = id;

    if let Err(err) = state.user_service.validate_existing_user(&user).await {
        debug!(error = %err, request = ?user, "Validation failed");
        return Err(err);
    }

    let updated = state.user_service.update(user).await.map_err(|err| {
        debug!(error = %err, id, "Error updating user");
        err
    })?;

    info!(id, "Successfully updated user details.");
    Ok(Json(updated))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("basic_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = String),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<&'static str>> {
    info!("Deleting user...");
    let id = parse_id(&raw_id)?;

    if let Err(err) = state.user_service.validate_id(id).await {
        debug!(error = %err, id, "Validation failed");
        return Err(err);
    }

    state.user_service.delete(id).await.map_err(|err| {
        debug!(error = %err, id, "Error deleting user");
        err.into_bad_request()
    })?;

    info!(id, "Successfully deleted user.");
    Ok(Json(DELETE_SUCCESS))
}

fn parse_id(raw: &str) -> AppResult<u64> {
    clean_id(raw).map_err(|err| {
        debug!(error = %err, raw, "Validation failed");
        AppError::from(err)
    })
}
