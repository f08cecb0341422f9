//! Configuration for the sync controller.

use std::time::Duration;

/// How overlapping refreshes resolve their race on the rendered view.
///
/// A timer-triggered refresh and a post-submit refresh may be in flight
/// at the same time; this policy decides which one's snapshot the view
/// ends up showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    /// Whichever response arrives last overwrites the view. This is the
    /// behavior of the original client.
    #[default]
    LastCompletedWins,
    /// Only the most recently issued refresh may render; responses to
    /// older refreshes are discarded.
    LastIssuedWins,
}

/// Configuration for the sync controller.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the message store service.
    pub server_url: String,
    /// Fixed period between automatic refreshes.
    pub poll_interval: Duration,
    /// How long an error notice stays visible before auto-removal.
    pub notice_ttl: Duration,
    /// Request timeout hint for transports that honor one.
    pub timeout: Duration,
    /// Race resolution for overlapping refreshes.
    pub render_policy: RenderPolicy,
}

impl SyncConfig {
    /// Creates a configuration for the given server URL with the
    /// default 30-second poll interval and 5-second notice lifetime.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            poll_interval: Duration::from_secs(30),
            notice_ttl: Duration::from_secs(5),
            timeout: Duration::from_secs(30),
            render_policy: RenderPolicy::default(),
        }
    }

    /// Sets the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the notice lifetime.
    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the render policy for overlapping refreshes.
    pub fn with_render_policy(mut self, policy: RenderPolicy) -> Self {
        self.render_policy = policy;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = SyncConfig::new("http://localhost:8000")
            .with_poll_interval(Duration::from_secs(10))
            .with_notice_ttl(Duration::from_secs(2))
            .with_render_policy(RenderPolicy::LastIssuedWins);

        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.notice_ttl, Duration::from_secs(2));
        assert_eq!(config.render_policy, RenderPolicy::LastIssuedWins);
    }

    #[test]
    fn defaults_match_the_original_client() {
        let config = SyncConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.notice_ttl, Duration::from_secs(5));
        assert_eq!(config.render_policy, RenderPolicy::LastCompletedWins);
    }
}
