//! A read-only message store backed by the GitHub commits API.
//!
//! Maps each commit of a repository to a board message: commit message
//! becomes content, the commit author becomes the author, and the
//! commit's `html_url` becomes the outbound link. Lets the poll loop
//! watch a commit log the same way it watches a board.
//!
//! Authentication is the HTTP client's concern: a client built with a
//! token attaches its `Authorization` header itself.

use crate::error::{SyncError, SyncResult};
use crate::http::HttpClient;
use crate::transport::MessageStore;
use pinboard_protocol::Message;
use serde::Deserialize;

/// Default GitHub API base URL.
pub const GITHUB_API: &str = "https://api.github.com";

/// A read-only [`MessageStore`] over `GET /repos/{owner}/{repo}/commits`.
pub struct CommitFeed<C: HttpClient> {
    api_base: String,
    owner: String,
    repo: String,
    per_page: u32,
    client: C,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    html_url: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    name: Option<String>,
    date: Option<String>,
}

impl<C: HttpClient> CommitFeed<C> {
    /// Creates a feed for `owner/repo` against the public GitHub API.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, client: C) -> Self {
        Self {
            api_base: GITHUB_API.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            per_page: 30,
            client,
        }
    }

    /// Overrides the API base URL (GitHub Enterprise, test servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets how many commits a fetch requests. The API caps pages at
    /// 100 entries.
    pub fn with_per_page(mut self, per_page: u32) -> SyncResult<Self> {
        if per_page == 0 || per_page > 100 {
            return Err(SyncError::InvalidRequest(format!(
                "per_page must be between 1 and 100, got {per_page}"
            )));
        }
        self.per_page = per_page;
        Ok(self)
    }

    fn commits_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/commits?per_page={}",
            self.api_base, self.owner, self.repo, self.per_page
        )
    }
}

impl<C: HttpClient> MessageStore for CommitFeed<C> {
    fn fetch(&self) -> SyncResult<Vec<Message>> {
        let response = self
            .client
            .get(&self.commits_url())
            .map_err(SyncError::transport)?;

        if !response.is_success() {
            return Err(SyncError::Http {
                status: response.status,
            });
        }

        let entries: Vec<CommitEntry> = serde_json::from_slice(&response.body)
            .map_err(|e| SyncError::transport(format!("malformed commits payload: {e}")))?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                let author = entry.commit.author;
                let mut message = Message::new(
                    entry.commit.message,
                    author
                        .as_ref()
                        .and_then(|a| a.date.clone())
                        .unwrap_or_default(),
                )
                .with_github_url(entry.html_url);
                if let Some(name) = author.and_then(|a| a.name) {
                    message = message.with_author(name);
                }
                message
            })
            .collect())
    }

    fn append(&self, _text: &str) -> SyncResult<()> {
        Err(SyncError::ReadOnlyStore)
    }
}
