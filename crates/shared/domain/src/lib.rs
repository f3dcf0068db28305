//! Domain layer - Core user entity, wire shapes and validation rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod response;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use response::ErrorResponse;
pub use user::{User, UserRequest};
pub use validation::{clean_id, is_age_valid, is_email_valid, is_username_valid};
