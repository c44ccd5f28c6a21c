//! Normalization helpers shared by the filter, search and query layers
//!
//! Every helper here is total: malformed input degrades to a neutral value
//! instead of producing an error.

/// Trim and lower-case a value for case-insensitive comparison
pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Escape regex metacharacters so user input matches literally
///
/// The escaped form is valid for both the `regex` crate and the store's
/// PCRE dialect, so one escaping serves both backends.
///
/// # Example
/// ```
/// use retail_sales::core::normalize::escape_regex;
/// assert_eq!(escape_regex("a.b*c"), "a\\.b\\*c");
/// ```
pub fn escape_regex(value: &str) -> String {
    regex::escape(value)
}

/// Parse the leading integer of a string, returning `None` when there is none
///
/// Follows leading-integer semantics: surrounding whitespace is ignored, an
/// optional sign is accepted and parsing stops at the first non-digit, so
/// `"12abc"` yields `12` while `"abc"` yields `None`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse an integer, falling back to `fallback` when the input has none
pub fn coerce_int(value: &str, fallback: i64) -> i64 {
    parse_leading_int(value).unwrap_or(fallback)
}

/// Split a comma-separated parameter into trimmed, non-empty tokens
pub fn split_tokens(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when the string is a non-empty run of ASCII digits
pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
