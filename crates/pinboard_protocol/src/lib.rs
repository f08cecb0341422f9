//! # Pinboard Protocol
//!
//! Message model and JSON wire types for the pinboard message board.
//!
//! This crate provides:
//! - [`Message`] as returned by the message store
//! - Wire bodies for the two REST endpoints (`GET /messages`,
//!   `POST /messages`)
//! - JSON encoding/decoding with [`ProtocolError`] on malformed payloads
//!
//! This is a pure data crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod wire;

pub use message::{Message, ANONYMOUS};
pub use wire::{MessageList, PostMessage, PostOutcome, ProtocolError, ProtocolResult};
