//! Output sanitizing
//!
//! The payload itself never escapes on write; callers pre-escape anything
//! that may be echoed into markup. The one exception is the currency code
//! on cart actions and conversions, which the buffer escapes itself
//! because its value flows straight into rendered HTML.

/// HTML-entity escape the five characters significant in markup,
/// single quotes included.
pub fn safe_output(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(safe_output("EUR"), "EUR");
        assert_eq!(safe_output("eur"), "eur");
        assert_eq!(safe_output(""), "");
    }

    #[test]
    fn test_markup_characters_are_escaped() {
        assert_eq!(
            safe_output(r#"<script>"x"&'y'</script>"#),
            "&lt;script&gt;&quot;x&quot;&amp;&#039;y&#039;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_ampersand_is_escaped_first_pass_only() {
        // Escaping is a single pass; pre-escaped input is escaped again.
        assert_eq!(safe_output("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_multibyte_text_passes_through() {
        assert_eq!(safe_output("日元 ¥"), "日元 ¥");
    }
}
