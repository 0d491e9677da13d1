// Helper functions for safe logging, timestamps, and serialization

use chrono::{SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 {
            // First char, not first byte: the local part may start with
            // a multibyte character
            match parts[0].chars().next() {
                Some(first) => format!("{}***@{}", first, parts[1]),
                None => "***@***.***".to_string(),
            }
        } else {
            "***@***.***".to_string()
        }
    } else {
        "***@***.***".to_string()
    }
}

/// Masks tokens for safe logging
/// Shows only first and last 4 characters
pub fn safe_token_log(token: &str) -> String {
    if token.len() > 8 {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "***".to_string()
    }
}

/// Current UTC time as an RFC 3339 string with whole-second precision.
/// The fixed width keeps stored timestamps lexicographically comparable,
/// which the OTP expiry queries rely on.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Serializes tags from their stored JSON string to an array for API responses
pub fn serialize_tags<S>(tags: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match tags {
        Some(tags_json) => {
            let tags_vec: Vec<String> =
                serde_json::from_str(tags_json).unwrap_or_else(|_| Vec::new());
            tags_vec.serialize(serializer)
        }
        None => Vec::<String>::new().serialize(serializer),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_email_log_masks_local_part() {
        assert_eq!(safe_email_log("user@example.com"), "u***@example.com");
        assert_eq!(safe_email_log("x"), "***@***.***");
        assert_eq!(safe_email_log("not-an-email"), "***@***.***");
    }

    #[test]
    fn test_safe_email_log_multibyte_local_part() {
        assert_eq!(safe_email_log("ü@x.com"), "ü***@x.com");
        assert_eq!(safe_email_log("日本@x.com"), "日***@x.com");
    }

    #[test]
    fn test_safe_token_log_masks_middle() {
        let masked = safe_token_log("eyJhbGciOiJIUzI1NiJ9");
        assert!(masked.starts_with("eyJh"));
        assert!(masked.contains("..."));
        assert_eq!(safe_token_log("short"), "***");
    }

    #[test]
    fn test_now_rfc3339_is_ordered() {
        let a = now_rfc3339();
        let b = now_rfc3339();
        assert!(a <= b);
        assert!(a.ends_with('Z'));
    }
}
