//! Utility functions for input preparation and link checks.

/// URL schemes that can run script when followed
pub const UNSAFE_SCHEMES: &[&str] = &["javascript", "vbscript", "data"];

/// Normalize CRLF and lone CR line endings to LF
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Scheme of a URL, lowercased, if it has one
///
/// Whitespace and control characters are ignored the way browsers ignore
/// them when resolving a link.
pub fn url_scheme(url: &str) -> Option<String> {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    let (scheme, _) = cleaned.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic()
        || !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return None;
    }

    Some(scheme.to_ascii_lowercase())
}

/// Check if a link target is safe to put in an `href`
pub fn is_safe_url(url: &str) -> bool {
    match url_scheme(url) {
        Some(scheme) => !UNSAFE_SCHEMES.contains(&scheme.as_str()),
        None => true,
    }
}
