//! HTML helper functions

/// Escape text for use in HTML content or a quoted attribute
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Encode a value as a JavaScript string literal safe to inline in `<script>`
pub fn js_string(s: &str) -> String {
    // A JSON string is a valid JS literal; `</` must not close the script tag
    serde_json::Value::String(s.to_string())
        .to_string()
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_js_string() {
        assert_eq!(js_string(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(js_string("</script>"), r#""<\/script>""#);
    }
}
