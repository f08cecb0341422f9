//! Concrete HTTP client over `reqwest::blocking`.

use pinboard_sync::{HttpClient, HttpResponse};
use std::time::Duration;

/// [`HttpClient`] implementation backed by a blocking reqwest client.
///
/// When a token is configured it is attached to every request as
/// `Authorization: token <value>`, which is what the GitHub commits API
/// expects; the board endpoints ignore the header.
pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
    token: Option<String>,
}

impl ReqwestClient {
    /// Builds a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pinboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { inner, token: None })
    }

    /// Attaches an authorization token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<HttpResponse, String> {
        let request = match &self.token {
            Some(token) => request.header("Authorization", format!("token {token}")),
            None => request,
        };
        let response = request.send().map_err(|e| {
            tracing::warn!(error = %e, "request failed");
            e.to_string()
        })?;
        let status = response.status().as_u16();
        if status >= 400 {
            tracing::debug!(status, "server answered with a failure status");
        }
        let body = response.bytes().map_err(|e| {
            tracing::warn!(error = %e, "reading response body failed");
            e.to_string()
        })?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, String> {
        self.send(self.inner.get(url))
    }

    fn post(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse, String> {
        self.send(
            self.inner
                .post(url)
                .header("Content-Type", "application/json")
                .body(body),
        )
    }
}
