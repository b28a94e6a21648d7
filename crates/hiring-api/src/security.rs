//! Input handling for rendered pages and redirects.

/// Maximum length of a redirect target carried through the login form.
const MAX_REDIRECT_LENGTH: usize = 2048;

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// A redirect target is only followed when it stays on this site.
///
/// Accepts absolute paths; rejects scheme-relative (`//host`) and
/// backslash tricks browsers normalize into them.
pub fn is_local_redirect(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.starts_with("/\\")
        && target.len() <= MAX_REDIRECT_LENGTH
        && !target.chars().any(|c| c.is_control())
}

/// Sanitize a user-provided string for safe logging.
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control())
        .take(256)
        .collect()
}
