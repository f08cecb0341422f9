//! Sync controller state machine.

use crate::config::{RenderPolicy, SyncConfig};
use crate::error::SyncResult;
use crate::html::render_messages;
use crate::transport::MessageStore;
use crate::view::MessageView;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Notice shown when the message list could not be fetched.
pub const FETCH_FAILED_NOTICE: &str = "Failed to fetch messages. Please refresh the page.";

/// Notice shown when a submission failed.
pub const SEND_FAILED_NOTICE: &str = "Failed to send message. Please try again.";

/// Granularity of the poll wait; cancellation and notice expiry are
/// checked this often between refreshes.
const SWEEP_SLICE: Duration = Duration::from_millis(250);

/// The current phase of the controller.
///
/// Refresh and submit cycles are independent and may interleave; the
/// phase is informational and never gates an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing in flight.
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// A submission is in flight.
    Submitting,
    /// The last refresh completed and the view holds its snapshot.
    Rendered,
}

/// Statistics about controller operations.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Refreshes that fetched and rendered successfully.
    pub refreshes_completed: u64,
    /// Messages accepted by the store.
    pub messages_submitted: u64,
    /// Fetches that failed.
    pub fetch_failures: u64,
    /// Submissions that failed.
    pub submit_failures: u64,
    /// Time of the last successful refresh. Informational only; fetches
    /// are never conditional on it.
    pub last_refresh_time: Option<Instant>,
    /// Last error message.
    pub last_error: Option<String>,
}

/// Result of a single refresh invocation.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// Number of messages the store returned.
    pub fetched: usize,
    /// Whether this invocation's snapshot was rendered. False only when
    /// [`RenderPolicy::LastIssuedWins`] discarded a stale response.
    pub rendered: bool,
    /// Generation assigned to this invocation.
    pub generation: u64,
}

/// The sync controller keeps a rendered view eventually consistent with
/// a remote, append-only message log.
///
/// The store and the view are injected; the controller holds no other
/// state than its cache bookkeeping. Operations are synchronous and the
/// controller is `Send + Sync`, so [`SyncController::run`] is intended
/// for a dedicated thread while other threads call
/// [`SyncController::submit`].
pub struct SyncController<S: MessageStore, V: MessageView> {
    config: SyncConfig,
    store: Arc<S>,
    view: Arc<V>,
    phase: RwLock<SyncPhase>,
    stats: RwLock<SyncStats>,
    /// Generation handed to the most recently issued refresh.
    issued: AtomicU64,
    cancelled: AtomicBool,
}

impl<S: MessageStore, V: MessageView> SyncController<S, V> {
    /// Creates a new controller.
    pub fn new(config: SyncConfig, store: S, view: V) -> Self {
        Self {
            config,
            store: Arc::new(store),
            view: Arc::new(view),
            phase: RwLock::new(SyncPhase::Idle),
            stats: RwLock::new(SyncStats::default()),
            issued: AtomicU64::new(0),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Gets the current phase.
    pub fn phase(&self) -> SyncPhase {
        *self.phase.read()
    }

    /// Gets the current stats.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// The view this controller renders into.
    pub fn view(&self) -> &V {
        self.view.as_ref()
    }

    /// Stops the poll loop.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the poll loop has been stopped.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn set_phase(&self, phase: SyncPhase) {
        *self.phase.write() = phase;
    }

    fn show_notice(&self, text: &str) {
        self.view
            .show_notice(text, Instant::now() + self.config.notice_ttl);
    }

    /// Submits user text to the store.
    ///
    /// Text is trimmed first; if nothing remains the call is a silent
    /// no-op with zero requests and zero notices, and `Ok(false)` is
    /// returned. On acceptance the view input is cleared and a refresh
    /// is triggered immediately so the new message appears without
    /// waiting for the next tick. On failure the input is left intact,
    /// a transient notice is shown, and the error is returned; there is
    /// no automatic retry.
    pub fn submit(&self, text: &str) -> SyncResult<bool> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!("ignoring empty submission");
            return Ok(false);
        }

        self.set_phase(SyncPhase::Submitting);
        match self.store.append(trimmed) {
            Ok(()) => {
                self.view.clear_input();
                self.stats.write().messages_submitted += 1;
                self.set_phase(SyncPhase::Idle);
                tracing::debug!(len = trimmed.len(), "message accepted");
                // The refresh surfaces its own failure; a fetch problem
                // right after a successful submit is not a submit error.
                if let Err(err) = self.refresh() {
                    tracing::debug!(error = %err, "post-submit refresh failed");
                }
                Ok(true)
            }
            Err(err) => {
                let mut stats = self.stats.write();
                stats.submit_failures += 1;
                stats.last_error = Some(err.to_string());
                drop(stats);
                self.set_phase(SyncPhase::Idle);
                self.show_notice(SEND_FAILED_NOTICE);
                tracing::warn!(error = %err, "submission failed");
                Err(err)
            }
        }
    }

    /// Fetches the full message list and replaces the rendered view
    /// with it.
    ///
    /// On failure the previous rendering is left untouched and a
    /// transient notice is shown. Safe to call at arbitrary intervals
    /// or concurrently with the timer; overlapping invocations resolve
    /// per the configured [`RenderPolicy`].
    pub fn refresh(&self) -> SyncResult<RefreshOutcome> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.complete_refresh(generation)
    }

    fn complete_refresh(&self, generation: u64) -> SyncResult<RefreshOutcome> {
        self.set_phase(SyncPhase::Fetching);
        match self.store.fetch() {
            Ok(messages) => {
                let stale = self.config.render_policy == RenderPolicy::LastIssuedWins
                    && generation != self.issued.load(Ordering::SeqCst);
                if stale {
                    tracing::debug!(generation, "discarding stale refresh");
                    self.set_phase(SyncPhase::Rendered);
                    return Ok(RefreshOutcome {
                        fetched: messages.len(),
                        rendered: false,
                        generation,
                    });
                }

                self.view.replace_messages(&render_messages(&messages));
                let mut stats = self.stats.write();
                stats.refreshes_completed += 1;
                stats.last_refresh_time = Some(Instant::now());
                stats.last_error = None;
                drop(stats);
                self.set_phase(SyncPhase::Rendered);
                tracing::debug!(count = messages.len(), generation, "view refreshed");
                Ok(RefreshOutcome {
                    fetched: messages.len(),
                    rendered: true,
                    generation,
                })
            }
            Err(err) => {
                let mut stats = self.stats.write();
                stats.fetch_failures += 1;
                stats.last_error = Some(err.to_string());
                drop(stats);
                self.set_phase(SyncPhase::Idle);
                self.show_notice(FETCH_FAILED_NOTICE);
                tracing::warn!(error = %err, generation, "fetch failed");
                Err(err)
            }
        }
    }

    /// Runs the polling schedule until [`SyncController::cancel`] is
    /// called: one immediate refresh, then one per poll interval,
    /// indefinitely. A failed refresh does not change the schedule; no
    /// backoff, no jitter. Expired notices are swept between polls.
    pub fn run(&self) {
        tracing::info!(interval = ?self.config.poll_interval, "poll loop started");
        while !self.is_cancelled() {
            let _ = self.refresh();
            self.wait(self.config.poll_interval);
        }
        tracing::info!("poll loop stopped");
    }

    /// Sleeps for the given duration in slices, checking cancellation
    /// and sweeping expired notices each slice.
    fn wait(&self, total: Duration) {
        let deadline = Instant::now() + total;
        loop {
            if self.is_cancelled() {
                return;
            }
            let now = Instant::now();
            self.view.sweep_notices(now);
            if now >= deadline {
                return;
            }
            std::thread::sleep((deadline - now).min(SWEEP_SLICE));
        }
    }
}
