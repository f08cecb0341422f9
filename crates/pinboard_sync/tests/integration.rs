//! Integration tests: controller wired to an in-memory board server
//! through the HTTP store and the loopback client.

use pinboard_protocol::{Message, MessageList, PostMessage, PostOutcome};
use pinboard_sync::{
    HttpResponse, HttpStore, LoopbackClient, LoopbackServer, MemoryView, SyncConfig,
    SyncController, FETCH_FAILED_NOTICE,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A minimal in-memory message store service speaking the board's JSON
/// contract, newest message first like the reference server.
#[derive(Default)]
struct BoardServer {
    messages: Mutex<Vec<Message>>,
    unavailable: AtomicBool,
}

impl BoardServer {
    fn new() -> Self {
        Self::default()
    }

    fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl LoopbackServer for BoardServer {
    fn handle_get(&self, path: &str) -> HttpResponse {
        if self.unavailable.load(Ordering::SeqCst) {
            return HttpResponse::new(503, Vec::new());
        }
        if path != "/messages" {
            return HttpResponse::new(404, Vec::new());
        }
        let messages = self.messages.lock().unwrap();
        let mut ordered = messages.clone();
        ordered.reverse();
        let body = MessageList::new(ordered).to_json().unwrap();
        HttpResponse::new(200, body)
    }

    fn handle_post(&self, path: &str, body: &[u8]) -> HttpResponse {
        if self.unavailable.load(Ordering::SeqCst) {
            return HttpResponse::new(503, Vec::new());
        }
        if path != "/messages" {
            return HttpResponse::new(404, Vec::new());
        }
        let Ok(post) = PostMessage::from_json(body) else {
            return HttpResponse::new(400, Vec::new());
        };
        let mut messages = self.messages.lock().unwrap();
        let id = messages.len() as u64 + 1;
        let mut message = Message::new(post.message, "2024-01-01T12:00:00");
        message.id = Some(id);
        messages.push(message);
        HttpResponse::new(200, PostOutcome::success().to_json().unwrap())
    }
}

fn board_controller(
    server: &Arc<BoardServer>,
) -> SyncController<HttpStore<LoopbackClient<Arc<BoardServer>>>, MemoryView> {
    let client = LoopbackClient::new(Arc::clone(server));
    let store = HttpStore::new("http://board.local", client);
    SyncController::new(
        SyncConfig::new("http://board.local"),
        store,
        MemoryView::new(),
    )
}

#[test]
fn empty_board_renders_placeholder() {
    let server = Arc::new(BoardServer::new());
    let ctrl = board_controller(&server);

    let outcome = ctrl.refresh().unwrap();
    assert_eq!(outcome.fetched, 0);
    assert!(ctrl.view().rendered().contains("No messages yet"));
}

#[test]
fn post_then_fetch_shows_the_message() {
    let server = Arc::new(BoardServer::new());
    let ctrl = board_controller(&server);
    ctrl.view().set_input("hello from the tests");

    assert!(ctrl.submit("hello from the tests").unwrap());

    // Submit cleared the input and its follow-up refresh rendered the
    // new message without waiting for a timer tick.
    assert_eq!(ctrl.view().input(), "");
    assert!(ctrl.view().rendered().contains("hello from the tests"));
    assert!(ctrl.view().rendered().contains("Anonymous"));
}

#[test]
fn store_order_is_displayed_verbatim() {
    let server = Arc::new(BoardServer::new());
    let ctrl = board_controller(&server);

    ctrl.submit("first").unwrap();
    ctrl.submit("second").unwrap();

    // The server returns newest first; the client must not reorder.
    let rendered = ctrl.view().rendered();
    let second = rendered.find("second").unwrap();
    let first = rendered.find("first").unwrap();
    assert!(second < first);
}

#[test]
fn hostile_content_is_escaped_end_to_end() {
    let server = Arc::new(BoardServer::new());
    let ctrl = board_controller(&server);

    ctrl.submit("<script>alert(1)</script>").unwrap();

    let rendered = ctrl.view().rendered();
    assert!(rendered.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!rendered.contains("<script>"));
}

#[test]
fn outage_preserves_view_and_surfaces_notice() {
    let server = Arc::new(BoardServer::new());
    let ctrl = board_controller(&server);

    ctrl.submit("still here").unwrap();
    server.set_unavailable(true);

    assert!(ctrl.refresh().is_err());
    assert!(ctrl.view().rendered().contains("still here"));
    assert_eq!(ctrl.view().notices()[0].text, FETCH_FAILED_NOTICE);

    // Recovery is just the next refresh; no special handling.
    server.set_unavailable(false);
    ctrl.refresh().unwrap();
    assert!(ctrl.view().rendered().contains("still here"));
}

#[test]
fn outage_during_submit_keeps_draft() {
    let server = Arc::new(BoardServer::new());
    let ctrl = board_controller(&server);
    server.set_unavailable(true);
    ctrl.view().set_input("unsent draft");

    assert!(ctrl.submit("unsent draft").is_err());
    assert_eq!(ctrl.view().input(), "unsent draft");
    assert!(server.messages.lock().unwrap().is_empty());
}
