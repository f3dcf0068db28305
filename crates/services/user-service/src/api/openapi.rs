//! OpenAPI documentation.

use utoipa::{
    openapi::{
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
        Server,
    },
    Modify, OpenApi,
};

use domain::{ErrorResponse, User, UserRequest};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service",
        description = "User management operations (CRUD) over a RESTful API."
    ),
    paths(
        crate::api::handlers::user_handler::list_users,
        crate::api::handlers::user_handler::get_user,
        crate::api::handlers::user_handler::create_user,
        crate::api::handlers::user_handler::update_user,
        crate::api::handlers::user_handler::delete_user,
    ),
    components(schemas(User, UserRequest, ErrorResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Document with the server URL set to the API base path.
    pub fn with_base_path(base_path: &str) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        doc.servers = Some(vec![Server::new(base_path)]);
        doc
    }
}

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
