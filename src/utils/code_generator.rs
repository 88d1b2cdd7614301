//! Persisted short-code generation and validation.
//!
//! Stateless tokens (see [`crate::utils::short_code`]) are self-describing;
//! persisted codes are short random strings stored on a campaign/creator
//! link. Both resolve through the same redirect endpoint.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

/// Codes reserved for routing; a persisted short code must never shadow them.
const RESERVED_CODES: &[&str] = &["track", "health", "api", "cron", "webhooks", "c"];

/// Generates a cryptographically secure random short code.
///
/// 9 random bytes encoded as URL-safe base64 without padding: 12 characters.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates an operator-provided custom short code.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved routing segment
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < 4 || code.len() > 32 {
        return Err(AppError::bad_request(
            "invalid_code",
            "Custom code must be 4-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "invalid_code",
            "Custom code can only contain lowercase letters, digits, and hyphens",
            json!({ "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "invalid_code",
            "Custom code cannot start or end with a hyphen",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "invalid_code",
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), 12);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        let code = generate_code();
        assert!(
            code.chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();
        for _ in 0..1000 {
            codes.insert(generate_code());
        }
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_accepts_typical_codes() {
        assert!(validate_custom_code("summer-sale-24").is_ok());
        assert!(validate_custom_code("cr42").is_ok());
    }

    #[test]
    fn test_validate_rejects_short_and_long() {
        assert!(validate_custom_code("abc").is_err());
        assert!(validate_custom_code(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_rejects_uppercase_and_specials() {
        assert!(validate_custom_code("MyCode123").is_err());
        assert!(validate_custom_code("my_code").is_err());
    }

    #[test]
    fn test_validate_rejects_edge_hyphens() {
        assert!(validate_custom_code("-code").is_err());
        assert!(validate_custom_code("code-").is_err());
    }

    #[test]
    fn test_validate_rejects_reserved() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "reserved code '{}' should be invalid",
                reserved
            );
        }
    }
}
