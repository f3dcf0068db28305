//! Field validators.
//!
//! Pure syntax checks; uniqueness lives in the service layer because it needs
//! the store.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{EMAIL_PATTERN, MAX_AGE_EXCLUSIVE, MIN_AGE_EXCLUSIVE, USERNAME_PATTERN};
use crate::error::{DomainError, DomainResult};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(USERNAME_PATTERN).unwrap());

/// Check an email against the accepted lowercase shape.
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check a username: lowercase alnum, `.`, `_` or `-`, at least 3 characters.
pub fn is_username_valid(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Age must lie strictly between 0 and 100.
pub fn is_age_valid(age: i32) -> bool {
    age > MIN_AGE_EXCLUSIVE && age < MAX_AGE_EXCLUSIVE
}

/// Parse a path segment into a user id.
///
/// Only plain decimal digits are accepted; zero and values that overflow
/// `u64` are rejected.
pub fn clean_id(raw: &str) -> DomainResult<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidId);
    }

    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(DomainError::InvalidId),
        Ok(id) => Ok(id),
    }
}
