//! Minimal XML escaping for update messages.
//!
//! Update requests are small hand-built XML documents; the only thing that
//! needs care is escaping user-supplied text. The five predefined entities
//! cover both element content and attribute values.

/// Escape a string for use as XML character data or an attribute value.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text() {
        assert_eq!(escape("hi there!"), "hi there!");
    }

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(
            escape(r#"puts "ouch!" && <done>"#),
            "puts &quot;ouch!&quot; &amp;&amp; &lt;done&gt;"
        );
        assert_eq!(escape("it's"), "it&apos;s");
    }
}
