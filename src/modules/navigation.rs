// Pure navigation logic - no Tauri imports allowed.
// URL normalization for panel and setup input, plus blank-page detection.

use url::Url;

pub const BLANK_PAGE: &str = "about:blank";

const WEB_SCHEMES: [&str; 2] = ["http://", "https://"];

/// True if `input` already starts with `http://` or `https://` (any case).
pub fn has_web_scheme(input: &str) -> bool {
    WEB_SCHEMES.iter().any(|scheme| {
        input
            .get(..scheme.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Normalizes user input into a panel URL.
///
/// Trims surrounding whitespace and prefixes `https://` unless an http(s)
/// scheme is already present. Purely local string manipulation: the result
/// is not parsed, resolved or rewritten otherwise, so already-prefixed input
/// comes back unchanged and the function is idempotent.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || has_web_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// `about:` pages are neutral surface states, never real history entries.
pub fn is_blank_page(url: &str) -> bool {
    match Url::parse(url.trim()) {
        Ok(u) => u.scheme() == "about",
        Err(_) => false,
    }
}
