//! HTML rendering for the message list.
//!
//! Pure string construction, no I/O. Every untrusted field (author,
//! content, link) is escaped before insertion; rendering the same list
//! twice produces byte-identical output.

use chrono::{DateTime, Local, NaiveDateTime};
use pinboard_protocol::Message;

/// Escapes text for insertion into HTML, covering element content and
/// double- or single-quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Formats a wire timestamp for display.
///
/// The reference server emits Python `isoformat()` strings without a
/// zone; commits fetched from GitHub carry RFC 3339. Anything else is
/// displayed verbatim (the caller escapes it like every other field).
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return parsed.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    raw.to_string()
}

/// Renders the full replacement HTML for the message list.
///
/// An empty list renders exactly one placeholder element instead of
/// zero message blocks; the placeholder is information, not an error.
pub fn render_messages(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "<p class=\"empty\">No messages yet. Be the first to post!</p>".to_string();
    }

    let mut out = String::new();
    for message in messages {
        out.push_str("<div class=\"message\">\n");
        out.push_str(&format!(
            "  <div class=\"meta\"><span class=\"author\">{}</span> <span class=\"time\">{}</span></div>\n",
            escape_html(message.display_author()),
            escape_html(&format_timestamp(&message.timestamp)),
        ));
        out.push_str(&format!(
            "  <p class=\"content\">{}</p>\n",
            escape_html(&message.content)
        ));
        if let Some(url) = &message.github_url {
            out.push_str(&format!(
                "  <a class=\"commit-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">View on GitHub</a>\n",
                escape_html(url)
            ));
        }
        out.push_str("</div>\n");
    }
    out
}
