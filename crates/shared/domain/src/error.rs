//! Domain-level errors.
//!
//! These errors represent rejected user input. They are independent of
//! infrastructure concerns (HTTP, database); the messages are the exact
//! text reported to clients.

use thiserror::Error;

/// Input validation failures, in the order the service checks them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("email is required")]
    EmailRequired,

    #[error("invalid email")]
    InvalidEmail,

    #[error("email already exists")]
    EmailExists,

    #[error("username is required")]
    UsernameRequired,

    #[error("invalid username")]
    InvalidUsername,

    #[error("username already exists")]
    UsernameExists,

    #[error("invalid age")]
    InvalidAge,

    /// Path id that is not a positive decimal integer
    #[error("invalid ID")]
    InvalidId,
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
