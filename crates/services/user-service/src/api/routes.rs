//! Route configuration.

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::user_routes;
use crate::api::middleware::basic_auth_middleware;
use crate::api::openapi::ApiDoc;
use crate::api::AppState;

/// Mount point of the user routes and the Swagger UI
pub const API_PREFIX: &str = "/atmail";

/// Create the main router with all routes.
///
/// `docs_base_path` only sets the server URL in the OpenAPI document.
/// `/` and the Swagger UI are public; the user routes require Basic auth.
pub fn create_router(state: AppState, docs_base_path: &str) -> Router {
    let users = user_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        basic_auth_middleware,
    ));

    // Swagger UI serves absolute paths, so it is merged at the root.
    let docs = SwaggerUi::new(format!("{API_PREFIX}/swagger")).url(
        format!("{API_PREFIX}/api-docs/openapi.json"),
        ApiDoc::with_base_path(docs_base_path),
    );

    Router::new()
        .route("/", get(root))
        .nest(API_PREFIX, users)
        .merge(docs)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> Json<Value> {
    Json(json!({ "data": "Hello world..." }))
}

/// Any origin, method and header.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
