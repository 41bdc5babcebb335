//! Rules for caller-supplied aliases and for paths that are not aliases.

use crate::error::AppError;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of a caller-supplied alias.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Compiled regex for alias characters.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Paths served by the service itself; an alias with one of these names could
/// never be reached through `GET /{alias}`.
const RESERVED_ALIASES: &[&str] = &["health", "url"];

/// Suffixes of static asset requests. Such paths are answered as not-found
/// instead of being looked up as aliases.
const STATIC_ASSET_SUFFIXES: &[&str] = &[
    ".css", ".js", ".png", ".jpg", ".ico", ".svg", ".map", ".webp", ".gif", ".txt",
];

/// Returns true if the path segment looks like a static asset request.
pub fn is_static_asset(alias: &str) -> bool {
    let lower = alias.to_ascii_lowercase();
    STATIC_ASSET_SUFFIXES
        .iter()
        .any(|suffix| lower.len() > suffix.len() && lower.ends_with(suffix))
}

/// Validates a caller-supplied alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Not a reserved route name
///
/// Aliases are case-sensitive and stored as given.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty()
        || alias.len() > MAX_ALIAS_LENGTH
        || !ALIAS_REGEX.is_match(alias)
        || RESERVED_ALIASES.contains(&alias)
    {
        return Err(AppError::bad_request("field Alias is not a valid alias"));
    }

    Ok(())
}
