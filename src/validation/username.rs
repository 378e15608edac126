//! System username validation.
//!
//! Validates usernames before they reach the privileged user management
//! commands.

use crate::error::AdminError;

/// Minimum length for system usernames.
const MIN_USERNAME_LENGTH: usize = 2;

/// Maximum length for system usernames (Linux standard).
const MAX_USERNAME_LENGTH: usize = 32;

/// Check whether a name matches the accepted username format.
///
/// Rules:
/// - Length 2 to 32 characters
/// - Must start with a lowercase letter or underscore
/// - Body may contain lowercase letters, digits, underscores, and hyphens
/// - Must end with a lowercase letter, digit, or underscore
///
/// Pure check with no side effects. Policy beyond the format (reserved
/// names, UID ranges) belongs to the underlying utilities.
pub fn is_valid_username(username: &str) -> bool {
    let bytes = username.as_bytes();
    if bytes.len() < MIN_USERNAME_LENGTH || bytes.len() > MAX_USERNAME_LENGTH {
        return false;
    }

    let first = bytes[0];
    if !first.is_ascii_lowercase() && first != b'_' {
        return false;
    }

    let last = bytes[bytes.len() - 1];
    if !last.is_ascii_lowercase() && !last.is_ascii_digit() && last != b'_' {
        return false;
    }

    bytes[1..bytes.len() - 1]
        .iter()
        .all(|&c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'_' || c == b'-')
}

/// Validate a username, returning it if valid.
///
/// # Errors
///
/// Returns [`AdminError::InvalidUsername`] if the name fails the format
/// check.
pub fn validate_username(username: &str) -> Result<&str, AdminError> {
    if is_valid_username(username) {
        Ok(username)
    } else {
        Err(AdminError::InvalidUsername {
            username: username.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("john"));
        assert!(is_valid_username("john_doe"));
        assert!(is_valid_username("jo-hn"));
        assert!(is_valid_username("john123"));
        assert!(is_valid_username("_john"));
        assert!(is_valid_username("valid_user123"));
        assert!(is_valid_username("ab"));
    }

    #[test]
    fn test_length_bounds() {
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("a"));
        assert!(is_valid_username(&"a".repeat(32)));
        assert!(!is_valid_username(&"a".repeat(33)));
    }

    #[test]
    fn test_first_character() {
        assert!(!is_valid_username("1john"));
        assert!(!is_valid_username("-john"));
        assert!(!is_valid_username("John"));
        assert!(is_valid_username("_john"));
    }

    #[test]
    fn test_last_character() {
        assert!(!is_valid_username("john-"));
        assert!(is_valid_username("john_"));
        assert!(is_valid_username("john9"));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(!is_valid_username("john.doe"));
        assert!(!is_valid_username("john doe"));
        assert!(!is_valid_username("invalid user!"));
        assert!(!is_valid_username("JOHN"));
        assert!(!is_valid_username("john$"));
        assert!(!is_valid_username("jöhn"));
    }

    #[test]
    fn test_reserved_looking_names_are_format_valid() {
        // Only the format is checked here; the OS decides the rest.
        assert!(is_valid_username("root"));
        assert!(is_valid_username("www-data"));
        assert!(is_valid_username("nobody"));
    }

    #[test]
    fn test_validate_username_error_message() {
        let err = validate_username("invalid user!").unwrap_err();
        assert_eq!(err.to_string(), "Invalid username: invalid user!");
    }

    #[test]
    fn test_validate_username_passthrough() {
        assert_eq!(validate_username("john").unwrap(), "john");
    }
}
