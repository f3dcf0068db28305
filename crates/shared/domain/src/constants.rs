//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Accepted email shape (lowercase only)
pub const EMAIL_PATTERN: &str = r"^[a-z0-9._\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$";

/// Accepted username shape (lowercase alnum, dot, underscore, hyphen)
pub const USERNAME_PATTERN: &str = r"^[a-z0-9._\-]{3,}$";

/// Lower age bound (exclusive)
pub const MIN_AGE_EXCLUSIVE: i32 = 0;

/// Upper age bound (exclusive)
pub const MAX_AGE_EXCLUSIVE: i32 = 100;

// =============================================================================
// Response messages
// =============================================================================

/// Reported by a plain lookup that finds no row
pub const USER_NOT_FOUND: &str = "user not found";

/// Reported by existence checks that find no row
pub const NO_RECORD_FOUND: &str = "no record found";

/// Body of a successful delete
pub const DELETE_SUCCESS: &str = "Successfully deleted";
