//! # Pinboard Sync
//!
//! Polling sync controller for the pinboard message board client.
//!
//! This crate provides:
//! - Sync controller (idle → fetching → rendered per refresh cycle)
//! - Optimistic submission with input preservation on failure
//! - HTML rendering with escaping of all untrusted fields
//! - Transient, auto-expiring error notices
//! - HTTP transport abstraction with mock and loopback test doubles
//!
//! ## Architecture
//!
//! The controller implements a **fetch-and-replace** model:
//! 1. Fetch the full message list from the store (store is authoritative)
//! 2. Render it wholesale into the view, replacing the previous rendering
//! 3. Repeat on a fixed interval, plus once immediately after each
//!    successful submission
//!
//! The local list is a cache, never merged or patched incrementally.
//!
//! ## Key Invariants
//!
//! - The store is authoritative; the client never reorders messages
//! - Every rendered field is HTML-escaped, including link hrefs
//! - A failed request never wipes the previous rendering and never
//!   stops the polling schedule
//! - Empty submissions are silently ignored without a network call

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod github;
mod html;
mod http;
mod state;
mod transport;
mod view;

pub use config::{RenderPolicy, SyncConfig};
pub use error::{SyncError, SyncResult};
pub use github::{CommitFeed, GITHUB_API};
pub use html::{escape_html, format_timestamp, render_messages};
pub use http::{HttpClient, HttpResponse, HttpStore, LoopbackClient, LoopbackServer};
pub use state::{
    RefreshOutcome, SyncController, SyncPhase, SyncStats, FETCH_FAILED_NOTICE, SEND_FAILED_NOTICE,
};
pub use transport::{MessageStore, MockStore};
pub use view::{MemoryView, MessageView, Notice};
