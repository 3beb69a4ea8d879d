/// Escapes text for interpolation into HTML element content or attribute values.
///
/// Absent input renders as an empty string. Each character is mapped once,
/// so entities produced here are never escaped a second time.
pub fn escape_html(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let mut escaped = String::with_capacity(value.len() + value.len() / 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes multi-line text and keeps its line breaks visible in HTML.
pub fn escape_multiline(value: Option<&str>) -> String {
    escape_html(value)
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}
