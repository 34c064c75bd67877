//! Escaping for text spliced into the generated page.

/// Escapes `&`, `<`, `>` and `"` for HTML text and attribute values.
pub fn html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps record text in a double-quoted JavaScript literal.
///
/// Backslashes pass through unchanged: record text arrives with them
/// already doubled by the cleaner. Quotes, line breaks and `</` are escaped
/// so the literal cannot end early or close the surrounding script.
pub fn js_record_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut prev = '\0';
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '/' if prev == '<' => out.push_str("\\/"),
            _ => out.push(c),
        }
        prev = c;
    }
    out.push('"');
    out
}

/// JSON text safe to place inside a `<script>` element.
pub fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}
