//! Store abstraction for the sync controller.

use crate::error::{SyncError, SyncResult};
use pinboard_protocol::Message;
use std::sync::atomic::{AtomicU64, Ordering};

/// A message store handles the two board operations.
///
/// This trait abstracts the wire, allowing different implementations
/// (HTTP, loopback, mock for testing).
pub trait MessageStore: Send + Sync {
    /// Fetches the full current message list, in display order.
    fn fetch(&self) -> SyncResult<Vec<Message>>;

    /// Appends one message with the given trimmed, non-empty text.
    fn append(&self, text: &str) -> SyncResult<()>;
}

/// A mock store for testing.
///
/// Responses are scripted per call; fetch and append invocations are
/// counted so tests can assert on exactly how many requests a controller
/// operation produced.
#[derive(Default)]
pub struct MockStore {
    fetch_result: std::sync::Mutex<Option<SyncResult<Vec<Message>>>>,
    append_result: std::sync::Mutex<Option<SyncResult<()>>>,
    fetch_calls: AtomicU64,
    append_calls: AtomicU64,
    appended: std::sync::Mutex<Vec<String>>,
}

impl MockStore {
    /// Creates a new mock store that answers fetches with an empty list
    /// and accepts appends.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the result of the next (and every following) fetch.
    pub fn set_fetch_result(&self, result: SyncResult<Vec<Message>>) {
        *self.fetch_result.lock().unwrap() = Some(result);
    }

    /// Sets the result of the next (and every following) append.
    pub fn set_append_result(&self, result: SyncResult<()>) {
        *self.append_result.lock().unwrap() = Some(result);
    }

    /// Number of fetches performed so far.
    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of appends attempted so far.
    pub fn append_calls(&self) -> u64 {
        self.append_calls.load(Ordering::SeqCst)
    }

    /// Texts passed to successful or failed append calls, in order.
    pub fn appended(&self) -> Vec<String> {
        self.appended.lock().unwrap().clone()
    }
}

impl MessageStore for MockStore {
    fn fetch(&self) -> SyncResult<Vec<Message>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match &*self.fetch_result.lock().unwrap() {
            Some(Ok(messages)) => Ok(messages.clone()),
            Some(Err(err)) => Err(clone_error(err)),
            None => Ok(Vec::new()),
        }
    }

    fn append(&self, text: &str) -> SyncResult<()> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        self.appended.lock().unwrap().push(text.to_string());
        match &*self.append_result.lock().unwrap() {
            Some(Ok(())) => Ok(()),
            Some(Err(err)) => Err(clone_error(err)),
            None => Ok(()),
        }
    }
}

/// `SyncError` is not `Clone` (it can wrap source errors), so scripted
/// failures are re-created on each call.
fn clone_error(err: &SyncError) -> SyncError {
    match err {
        SyncError::Transport(message) => SyncError::Transport(message.clone()),
        SyncError::Http { status } => SyncError::Http { status: *status },
        SyncError::Protocol(inner) => SyncError::transport(inner.to_string()),
        SyncError::Rejected(status) => SyncError::Rejected(status.clone()),
        SyncError::ReadOnlyStore => SyncError::ReadOnlyStore,
        SyncError::InvalidRequest(message) => SyncError::InvalidRequest(message.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinboard_protocol::Message;

    #[test]
    fn mock_store_defaults() {
        let store = MockStore::new();
        assert_eq!(store.fetch().unwrap(), Vec::new());
        store.append("hello").unwrap();
        assert_eq!(store.fetch_calls(), 1);
        assert_eq!(store.append_calls(), 1);
        assert_eq!(store.appended(), vec!["hello".to_string()]);
    }

    #[test]
    fn mock_store_scripted_results() {
        let store = MockStore::new();
        store.set_fetch_result(Ok(vec![Message::new("hi", "2024-01-01T00:00:00")]));
        assert_eq!(store.fetch().unwrap().len(), 1);

        store.set_append_result(Err(SyncError::Http { status: 500 }));
        let result = store.append("oops");
        assert!(matches!(result, Err(SyncError::Http { status: 500 })));
    }
}
