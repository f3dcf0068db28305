//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// User as exposed over the wire.
///
/// Missing JSON fields fall back to their zero value so that the service, not
/// the decoder, reports which field is wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct User {
    /// Store-assigned identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: u64,
    /// Unique login name
    #[cfg_attr(feature = "openapi", schema(example = "jane.doe"))]
    pub username: String,
    /// Unique email address
    #[cfg_attr(feature = "openapi", schema(example = "jane.doe@example.com"))]
    pub email: String,
    /// Age in years, 1 to 99
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub age: i32,
}

/// User creation data transfer object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct UserRequest {
    #[cfg_attr(feature = "openapi", schema(example = "jane.doe"))]
    pub username: String,
    #[cfg_attr(feature = "openapi", schema(example = "jane.doe@example.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub age: i32,
}
