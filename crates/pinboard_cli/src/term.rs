//! Terminal adapter for the controller's view seam.

use parking_lot::RwLock;
use pinboard_sync::MessageView;
use std::time::Instant;

/// A view that prints the board to stdout and notices to stderr.
///
/// The watch loop re-renders the full board on every poll; to keep the
/// terminal readable this adapter only reprints when the rendering
/// actually changed. Printed notices cannot be retracted, so
/// `sweep_notices` is a no-op here.
#[derive(Default)]
pub struct TerminalView {
    last: RwLock<String>,
}

impl TerminalView {
    /// Creates a terminal view.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageView for TerminalView {
    fn replace_messages(&self, html: &str) {
        let mut last = self.last.write();
        if *last == html {
            return;
        }
        *last = html.to_string();
        println!("{html}");
    }

    fn clear_input(&self) {}

    fn show_notice(&self, text: &str, _expires_at: Instant) {
        eprintln!("! {text}");
    }

    fn sweep_notices(&self, _now: Instant) {}
}
