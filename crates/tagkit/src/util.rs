//! Shared utility functions for tag output.

/// Escape a value for use inside a double-quoted HTML attribute.
///
/// # Examples
///
/// ```
/// use tagkit::escape_attribute;
///
/// assert_eq!(escape_attribute(r#"a "b" & <c>"#), "a &quot;b&quot; &amp; &lt;c&gt;");
/// assert_eq!(escape_attribute("plain"), "plain");
/// ```
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Compare a markup token against a known directive token.
///
/// Element and attribute names are matched ASCII case-insensitively, the way
/// HTML treats them.
#[must_use]
pub(crate) fn token_eq(actual: &str, expected: &str) -> bool {
    actual.eq_ignore_ascii_case(expected)
}
