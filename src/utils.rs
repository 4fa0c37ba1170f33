use crate::types::LogLine;

/// Split a timestamped log line on its first whitespace character.
/// A line without whitespace is all timestamp and no text.
pub fn parse_log_line(line: &str) -> LogLine {
    match line.split_once(char::is_whitespace) {
        Some((timestamp, text)) => LogLine {
            timestamp: timestamp.to_string(),
            text: text.to_string(),
        },
        None => LogLine {
            timestamp: line.to_string(),
            text: String::new(),
        },
    }
}

/// Parse raw log output into lines, preserving order.
pub fn parse_log_output(raw: &str) -> Vec<LogLine> {
    raw.lines().map(parse_log_line).collect()
}

/// Render lines as `[<timestamp>] <text>`, newline separated.
pub fn render_text(lines: &[LogLine]) -> String {
    lines
        .iter()
        .map(|l| format!("[{}] {}", l.timestamp, l.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Requested tail size, falling back to `default` and never above `max`.
pub fn effective_tail_lines(requested: Option<i64>, default: i64, max: i64) -> i64 {
    requested.unwrap_or(default).min(max)
}

/// Check an `Authorization` header value against the configured token.
/// An empty token disables the check.
pub fn is_authorized(token: &str, header: Option<&str>) -> bool {
    if token.is_empty() {
        return true;
    }
    header.is_some_and(|h| h.strip_prefix("Bearer ") == Some(token))
}
