//! Wire bodies for the two board endpoints.

use crate::message::Message;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for wire encoding and decoding.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors produced while encoding or decoding wire bodies.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The payload was not valid JSON or did not match the expected
    /// shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::Malformed(err.to_string())
    }
}

/// Response body of `GET /messages`.
///
/// Messages are ordered by the store; the client displays them
/// top-to-bottom exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageList {
    /// The full current message list.
    pub messages: Vec<Message>,
}

impl MessageList {
    /// Creates a list from the given messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Decodes a list from a JSON body.
    pub fn from_json(bytes: &[u8]) -> ProtocolResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encodes the list to a JSON body.
    pub fn to_json(&self) -> ProtocolResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Request body of `POST /messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessage {
    /// The trimmed, non-empty user text.
    pub message: String,
}

impl PostMessage {
    /// Creates a post body from already-trimmed text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Decodes a post body from JSON.
    pub fn from_json(bytes: &[u8]) -> ProtocolResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encodes the post body to JSON.
    pub fn to_json(&self) -> ProtocolResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Response body of `POST /messages`.
///
/// The reference server also returns `message` and `timestamp` fields;
/// only `status` carries meaning for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOutcome {
    /// `"success"` when the message was appended.
    pub status: String,
    /// Human-readable detail, ignored by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Server-side receipt time, ignored by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl PostOutcome {
    /// Creates a success outcome.
    pub fn success() -> Self {
        Self {
            status: "success".into(),
            message: None,
            timestamp: None,
        }
    }

    /// Creates a failure outcome with the given status.
    pub fn failure(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: None,
            timestamp: None,
        }
    }

    /// Whether the server accepted the message.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Decodes an outcome from a JSON body.
    pub fn from_json(bytes: &[u8]) -> ProtocolResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encodes the outcome to a JSON body.
    pub fn to_json(&self) -> ProtocolResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_list_roundtrip() {
        let list = MessageList::new(vec![
            Message::new("first", "2024-01-01T12:00:00").with_author("alice"),
            Message::new("second", "2024-01-01T12:01:00"),
        ]);
        let bytes = list.to_json().unwrap();
        let decoded = MessageList::from_json(&bytes).unwrap();
        assert_eq!(decoded, list);
    }

    #[test]
    fn empty_list_decodes() {
        let decoded = MessageList::from_json(br#"{"messages": []}"#).unwrap();
        assert!(decoded.messages.is_empty());
    }

    #[test]
    fn post_body_shape() {
        let body = PostMessage::new("hello board");
        let json = String::from_utf8(body.to_json().unwrap()).unwrap();
        assert_eq!(json, r#"{"message":"hello board"}"#);
    }

    #[test]
    fn outcome_success_predicate() {
        // Full shape emitted by the reference server.
        let bytes = br#"{
            "status": "success",
            "message": "Message received",
            "timestamp": "2024-01-01T12:00:00.000001"
        }"#;
        let outcome = PostOutcome::from_json(bytes).unwrap();
        assert!(outcome.is_success());

        let outcome = PostOutcome::failure("error");
        assert!(!outcome.is_success());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let result = MessageList::from_json(b"not json");
        assert!(matches!(result, Err(ProtocolError::Malformed(_))));

        // Valid JSON, wrong shape.
        let result = PostOutcome::from_json(br#"{"messages": []}"#);
        assert!(result.is_err());
    }
}
