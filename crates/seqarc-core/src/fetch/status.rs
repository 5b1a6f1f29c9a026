//! Status line parsing for error text.

/// Status text from an HTTP status line, e.g. `"HTTP/1.1 404 Not Found"` → `"404 Not Found"`.
///
/// Falls back to the bare code when the line is missing or malformed
/// (HTTP/2 responses carry no reason phrase).
pub fn reason_from_status_line(line: Option<&str>, code: u32) -> String {
    line.map(str::trim)
        .and_then(|l| l.split_once(char::is_whitespace))
        .map(|(_, rest)| rest.trim())
        .filter(|rest| rest.split_whitespace().next() == Some(code.to_string().as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}
