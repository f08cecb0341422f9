//! The message value as stored and served by the board.

use serde::{Deserialize, Serialize};

/// Display name substituted when a message carries no author.
pub const ANONYMOUS: &str = "Anonymous";

/// A single board message, immutable once fetched.
///
/// The client never mutates or reorders messages; the displayed order is
/// exactly the order the store returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Row id assigned by the store, if it exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// User-supplied text. Required and non-empty after trimming at
    /// submission time; arbitrary once stored.
    pub content: String,
    /// Display name; `None` renders as [`ANONYMOUS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Point in time the message was recorded, carried as the wire
    /// string (the reference server emits ISO-8601 without a zone).
    /// Used for display only, never for ordering.
    pub timestamp: String,
    /// Optional outbound link associated with the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

impl Message {
    /// Creates a message with the given content and timestamp.
    pub fn new(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            author: None,
            timestamp: timestamp.into(),
            github_url: None,
        }
    }

    /// Sets the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the outbound link.
    pub fn with_github_url(mut self, url: impl Into<String>) -> Self {
        self.github_url = Some(url.into());
        self
    }

    /// The name to display for this message, falling back to the
    /// [`ANONYMOUS`] sentinel when no author is present.
    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or(ANONYMOUS)
    }
}
