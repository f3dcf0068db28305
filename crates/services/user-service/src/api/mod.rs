//! HTTP transport: routing, authentication and JSON mapping.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use routes::{create_router, API_PREFIX};
pub use state::AppState;
