//! The rendered view owned by the controller.

use parking_lot::RwLock;
use std::time::Instant;

/// A transient error banner.
#[derive(Debug, Clone)]
pub struct Notice {
    /// The banner text.
    pub text: String,
    /// When the banner should disappear without user action.
    pub expires_at: Instant,
}

/// The single rendered surface the controller mutates: the message
/// area, the input field, and the notice stack.
///
/// The controller is the only writer; implementations only need interior
/// mutability, not external locking.
pub trait MessageView: Send + Sync {
    /// Replaces the entire message area with the given HTML.
    fn replace_messages(&self, html: &str);

    /// Clears the input field after a successful submission.
    fn clear_input(&self);

    /// Shows a notice that expires at the given instant. Notices stack;
    /// no deduplication.
    fn show_notice(&self, text: &str, expires_at: Instant);

    /// Removes notices whose expiry has passed.
    fn sweep_notices(&self, now: Instant);
}

/// An in-memory view for testing and for headless embedders.
#[derive(Default)]
pub struct MemoryView {
    rendered: RwLock<String>,
    input: RwLock<String>,
    notices: RwLock<Vec<Notice>>,
}

impl MemoryView {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current message-area HTML.
    pub fn rendered(&self) -> String {
        self.rendered.read().clone()
    }

    /// The current input field text.
    pub fn input(&self) -> String {
        self.input.read().clone()
    }

    /// Sets the input field, as a user typing would.
    pub fn set_input(&self, text: &str) {
        *self.input.write() = text.to_string();
    }

    /// The currently visible notices, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.read().clone()
    }
}

impl MessageView for MemoryView {
    fn replace_messages(&self, html: &str) {
        *self.rendered.write() = html.to_string();
    }

    fn clear_input(&self) {
        self.input.write().clear();
    }

    fn show_notice(&self, text: &str, expires_at: Instant) {
        self.notices.write().push(Notice {
            text: text.to_string(),
            expires_at,
        });
    }

    fn sweep_notices(&self, now: Instant) {
        self.notices.write().retain(|notice| notice.expires_at > now);
    }
}
