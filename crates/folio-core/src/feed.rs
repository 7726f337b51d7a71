use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, USER_AGENT};

use crate::error::UpdateError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_RELEASE_REPO: &str = "folio-reader/folio";
pub const DEFAULT_RELEASES_PER_PAGE: u32 = 20;

const GITHUB_JSON: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));
const BODY_SNIPPET_CHARS: usize = 160;

/// Source of the raw release index.
#[async_trait]
pub trait ReleaseFeed: Send + Sync {
    /// Fetch the release index body, unparsed. An empty body is returned as
    /// is; judging it is the checker's job.
    async fn fetch_index(&self) -> Result<String, UpdateError>;
}

/// Endpoint listing the most recent releases of `repo`.
#[must_use]
pub fn release_index_url(api_base_url: &str, repo: &str, per_page: u32) -> String {
    format!(
        "{}/repos/{}/releases?page=1&per_page={per_page}",
        api_base_url.trim_end_matches('/'),
        repo.trim_matches('/')
    )
}

/// [`ReleaseFeed`] backed by the GitHub releases API.
#[derive(Debug, Clone)]
pub struct GitHubReleaseFeed {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl GitHubReleaseFeed {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|token| !token.trim().is_empty());
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReleaseFeed for GitHubReleaseFeed {
    async fn fetch_index(&self) -> Result<String, UpdateError> {
        debug!("Fetching release index from {}", self.url);

        let mut request = self
            .client
            .get(&self.url)
            .header(ACCEPT, GITHUB_JSON)
            .header(USER_AGENT, CLIENT_USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(UpdateError::fetch_failed_from)?;

        let status = response.status();
        if !status.is_success() {
            let body_snippet = response
                .text()
                .await
                .ok()
                .map(|body| response_snippet(&body, BODY_SNIPPET_CHARS))
                .unwrap_or_default();
            return Err(UpdateError::fetch_failed(format!(
                "HTTP {status}{body_snippet}"
            )));
        }

        response
            .text()
            .await
            .map_err(UpdateError::fetch_failed_from)
    }
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.trim().chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}
