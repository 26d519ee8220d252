//! Text sanitization and HTML escaping.
//!
//! `sanitize_text` is applied to user-supplied plain-text values before
//! storage (form names, submission keys and values). The escape helpers
//! are for interpolating text into HTML output; skipping them would let
//! a hostile form design inject markup into public pages.

/// Sanitize a plain-text value: strip tags, drop control characters,
/// collapse whitespace runs and trim.
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    let mut last_was_space = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_control() || c.is_whitespace() => {
                if !last_was_space && !out.is_empty() {
                    out.push(' ');
                    last_was_space = true;
                }
            }
            c => {
                out.push(c);
                last_was_space = false;
            }
        }
    }
    out.trim_end().to_string()
}

/// Escape text for HTML element content.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape text for HTML attribute values.
pub fn escape_attr(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_tags() {
        assert_eq!(sanitize_text("<script>x</script>y"), "xy");
        assert_eq!(sanitize_text("hello <b>world</b>"), "hello world");
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(sanitize_text("  a\t\tb\n\nc  "), "a b c");
    }

    #[test]
    fn test_sanitize_drops_control_chars() {
        assert_eq!(sanitize_text("a\u{0}b\u{7}c"), "a b c");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_attr_newlines() {
        assert_eq!(escape_attr("a\nb"), "a&#10;b");
    }
}
