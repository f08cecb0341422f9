//! HTTP transport implementation.
//!
//! This module provides an HTTP-based store for the sync controller.
//! The actual HTTP client is abstracted via a trait to allow different
//! implementations (reqwest, ureq, a browser bridge, etc.).

use crate::error::{SyncError, SyncResult};
use crate::transport::MessageStore;
use pinboard_protocol::{Message, MessageList, PostMessage, PostOutcome};
use std::sync::Arc;

/// Status and body of an HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP transport. Errors
/// returned here mean the request could not complete at all; a completed
/// request with a failure status comes back as an [`HttpResponse`].
pub trait HttpClient: Send + Sync {
    /// Sends a GET request.
    fn get(&self, url: &str) -> Result<HttpResponse, String>;

    /// Sends a POST request with a JSON body.
    fn post(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, String>;
}

/// HTTP-based message store speaking the board's JSON contract:
/// `GET {base}/messages` and `POST {base}/messages`.
pub struct HttpStore<C: HttpClient> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> HttpStore<C> {
    /// Creates a store for the given base URL (e.g.
    /// `"http://localhost:8000"`).
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, client }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url)
    }
}

impl<C: HttpClient> MessageStore for HttpStore<C> {
    fn fetch(&self) -> SyncResult<Vec<Message>> {
        let response = self
            .client
            .get(&self.messages_url())
            .map_err(SyncError::transport)?;

        if !response.is_success() {
            return Err(SyncError::Http {
                status: response.status,
            });
        }

        let list = MessageList::from_json(&response.body)?;
        Ok(list.messages)
    }

    fn append(&self, text: &str) -> SyncResult<()> {
        let body = PostMessage::new(text).to_json()?;
        let response = self
            .client
            .post(&self.messages_url(), body)
            .map_err(SyncError::transport)?;

        if !response.is_success() {
            return Err(SyncError::Http {
                status: response.status,
            });
        }

        let outcome = PostOutcome::from_json(&response.body)?;
        if !outcome.is_success() {
            return Err(SyncError::Rejected(outcome.status));
        }

        Ok(())
    }
}

/// A loopback HTTP client that routes requests directly to an
/// in-process server.
///
/// Useful for testing without actual network overhead.
pub struct LoopbackClient<S: LoopbackServer> {
    server: S,
}

impl<S: LoopbackServer + Send + Sync> LoopbackClient<S> {
    /// Creates a new loopback client connected to the given server.
    pub fn new(server: S) -> Self {
        Self { server }
    }
}

/// Trait for servers that can handle loopback requests.
pub trait LoopbackServer {
    /// Handles a GET request for the given path.
    fn handle_get(&self, path: &str) -> HttpResponse;

    /// Handles a POST request for the given path.
    fn handle_post(&self, path: &str, body: &[u8]) -> HttpResponse;
}

/// Shared handles forward to the server, so one in-process server can
/// back several loopback clients.
impl<S: LoopbackServer> LoopbackServer for Arc<S> {
    fn handle_get(&self, path: &str) -> HttpResponse {
        self.as_ref().handle_get(path)
    }

    fn handle_post(&self, path: &str, body: &[u8]) -> HttpResponse {
        self.as_ref().handle_post(path, body)
    }
}

fn path_of(url: &str) -> &str {
    url.find("/messages").map(|i| &url[i..]).unwrap_or(url)
}

impl<S: LoopbackServer + Send + Sync> HttpClient for LoopbackClient<S> {
    fn get(&self, url: &str) -> Result<HttpResponse, String> {
        Ok(self.server.handle_get(path_of(url)))
    }

    fn post(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, String> {
        Ok(self.server.handle_post(path_of(url), &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct TestClient {
        get_response: Mutex<Option<HttpResponse>>,
        post_response: Mutex<Option<HttpResponse>>,
        last_post: Mutex<Option<(String, Vec<u8>)>>,
    }

    impl TestClient {
        fn new() -> Self {
            Self {
                get_response: Mutex::new(None),
                post_response: Mutex::new(None),
                last_post: Mutex::new(None),
            }
        }

        fn set_get(&self, response: HttpResponse) {
            *self.get_response.lock().unwrap() = Some(response);
        }

        fn set_post(&self, response: HttpResponse) {
            *self.post_response.lock().unwrap() = Some(response);
        }
    }

    impl HttpClient for TestClient {
        fn get(&self, _url: &str) -> Result<HttpResponse, String> {
            self.get_response
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| "no response set".into())
        }

        fn post(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, String> {
            *self.last_post.lock().unwrap() = Some((url.to_string(), body));
            self.post_response
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| "no response set".into())
        }
    }

    #[test]
    fn base_url_is_normalized() {
        let store = HttpStore::new("http://localhost:8000/", TestClient::new());
        assert_eq!(store.base_url(), "http://localhost:8000");
        assert_eq!(store.messages_url(), "http://localhost:8000/messages");
    }

    #[test]
    fn fetch_decodes_message_list() {
        let client = TestClient::new();
        client.set_get(HttpResponse::new(
            200,
            br#"{"messages": [{"content": "hi", "timestamp": "2024-01-01T00:00:00"}]}"#.to_vec(),
        ));
        let store = HttpStore::new("http://localhost:8000", client);

        let messages = store.fetch().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hi");
    }

    #[test]
    fn fetch_maps_status_to_error() {
        let client = TestClient::new();
        client.set_get(HttpResponse::new(500, Vec::new()));
        let store = HttpStore::new("http://localhost:8000", client);

        let result = store.fetch();
        assert!(matches!(result, Err(SyncError::Http { status: 500 })));
    }

    #[test]
    fn fetch_rejects_malformed_body() {
        let client = TestClient::new();
        client.set_get(HttpResponse::new(200, b"not json".to_vec()));
        let store = HttpStore::new("http://localhost:8000", client);

        assert!(matches!(store.fetch(), Err(SyncError::Protocol(_))));
    }

    #[test]
    fn append_posts_trimmed_text() {
        let client = TestClient::new();
        client.set_post(HttpResponse::new(
            200,
            br#"{"status": "success"}"#.to_vec(),
        ));
        let store = HttpStore::new("http://localhost:8000", client);

        store.append("hello board").unwrap();

        let (url, body) = store.client.last_post.lock().unwrap().clone().unwrap();
        assert_eq!(url, "http://localhost:8000/messages");
        assert_eq!(body, br#"{"message":"hello board"}"#.to_vec());
    }

    #[test]
    fn append_treats_non_success_status_field_as_rejection() {
        let client = TestClient::new();
        client.set_post(HttpResponse::new(200, br#"{"status": "error"}"#.to_vec()));
        let store = HttpStore::new("http://localhost:8000", client);

        let result = store.append("hello");
        assert!(matches!(result, Err(SyncError::Rejected(status)) if status == "error"));
    }

    #[test]
    fn loopback_serves_shared_server_handles() {
        struct CannedBoard;

        impl LoopbackServer for CannedBoard {
            fn handle_get(&self, path: &str) -> HttpResponse {
                assert_eq!(path, "/messages");
                HttpResponse::new(200, br#"{"messages": []}"#.to_vec())
            }

            fn handle_post(&self, _path: &str, _body: &[u8]) -> HttpResponse {
                HttpResponse::new(200, br#"{"status": "success"}"#.to_vec())
            }
        }

        // Two stores sharing one server through Arc handles.
        let server = Arc::new(CannedBoard);
        let first = HttpStore::new("http://board.local", LoopbackClient::new(Arc::clone(&server)));
        let second = HttpStore::new("http://board.local", LoopbackClient::new(server));

        assert!(first.fetch().unwrap().is_empty());
        second.append("hello").unwrap();
    }

    #[test]
    fn transport_failure_is_surfaced() {
        // No responses scripted: every call errors at the client level.
        let store = HttpStore::new("http://localhost:8000", TestClient::new());
        assert!(matches!(store.fetch(), Err(SyncError::Transport(_))));
        assert!(matches!(store.append("x"), Err(SyncError::Transport(_))));
    }
}
