//! Secret detection and redaction utilities.
//!
//! Log adapters use these to blank out field values whose keys name a
//! credential; config parsing and the CLI use them to keep secrets out of
//! error metadata.
//!
//! Keys are compared by segment, not by substring: `camelCase`, `snake_case`,
//! `kebab-case` and `dotted.names` are split into lowercase words first, so
//! `db_password` and `refreshToken` match while `author`, `monkey` and
//! `tokensUsed` do not.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Words that mark a key as secret wherever they appear.
const SECRET_SEGMENTS: &[&str] = &[
    "apikey",
    "auth",
    "authorization",
    "credential",
    "credentials",
    "passphrase",
    "passwd",
    "password",
    "privatekey",
    "secret",
    "token",
];

/// Words that make a following `key` segment secret (`api_key`, `privateKey`).
const KEY_QUALIFIERS: &[&str] = &["access", "api", "encryption", "private", "secret", "signing"];

/// Checks if a key/variable name refers to a secret.
///
/// # Examples
///
/// ```
/// use ctxlog_shared::is_secret_key;
///
/// assert!(is_secret_key("apiKey"));
/// assert!(is_secret_key("SESSION_TOKEN"));
/// assert!(!is_secret_key("partitionKey"));
/// assert!(!is_secret_key("correlationId"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let segments = key_segments(key);
    segments.iter().enumerate().any(|(index, segment)| {
        SECRET_SEGMENTS.contains(&segment.as_str())
            || (segment == "key"
                && index
                    .checked_sub(1)
                    .and_then(|previous| segments.get(previous))
                    .is_some_and(|previous| KEY_QUALIFIERS.contains(&previous.as_str())))
    })
}

/// Split a key into lowercase words on separators and lower-to-upper case changes.
fn key_segments(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for ch in key.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            previous = None;
            continue;
        }
        let starts_word = ch.is_uppercase()
            && previous.is_some_and(|prev| prev.is_lowercase() || prev.is_numeric());
        if starts_word && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
        current.extend(ch.to_lowercase());
        previous = Some(ch);
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
