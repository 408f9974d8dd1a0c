//! GitHub REST API search gateway.
//!
//! Implements [`SearchGateway`] over `GET /search/repositories`. A single
//! [`reqwest::Client`] is created lazily and reused across requests; its
//! connection pool is the long-lived session. [`GitHubClient::close`]
//! releases it, and the next search creates a fresh one.
//!
//! Each search is one attempt with the configured total timeout. There is
//! no retry.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;

use github_repos_core::gateway::SearchGateway;
use github_repos_core::models::RepositoryRecord;
use github_repos_core::query::SearchRequest;

use crate::config::GitHubConfig;

const USER_AGENT: &str = concat!("github-repos-bot/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Body of a repository search response. Only `items` is used.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<RepositoryRecord>,
}

pub struct GitHubClient {
    config: GitHubConfig,
    token: Option<String>,
    session: Mutex<Option<reqwest::Client>>,
}

impl GitHubClient {
    /// Create a client. No connection is opened until the first search.
    pub fn new(config: &GitHubConfig) -> Self {
        Self {
            token: config.token(),
            config: config.clone(),
            session: Mutex::new(None),
        }
    }

    /// Return the shared session, creating it if there is none.
    fn session(&self) -> Result<reqwest::Client> {
        let mut guard = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(ref client) = *guard {
            return Ok(client.clone());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        tracing::debug!(base_url = %self.config.base_url, "GitHub session created");

        *guard = Some(client.clone());
        Ok(client)
    }

    /// Release the session. Safe to call more than once.
    pub fn close(&self) {
        let mut guard = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.take().is_some() {
            tracing::info!("GitHub session closed");
        }
    }

    /// Whether a session is currently held.
    pub fn is_open(&self) -> bool {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    fn search_url(&self) -> String {
        format!(
            "{}/search/repositories",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn query_params(&self, request: &SearchRequest) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(ref sort) = request.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(ref order) = request.order {
            params.push(("order", order.clone()));
        }
        params.push(("q", request.q.clone()));
        if let Some(per_page) = self.config.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        params
    }
}

#[async_trait]
impl SearchGateway for GitHubClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RepositoryRecord>> {
        let client = self.session()?;

        let mut builder = client
            .get(self.search_url())
            .header("Accept", ACCEPT)
            .query(&self.query_params(request));
        if let Some(ref token) = self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder
            .send()
            .await
            .context("GitHub search request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("GitHub API error {}: {}", status, body_text);
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("Invalid GitHub search response")?;

        tracing::debug!(q = %request.q, count = body.items.len(), "GitHub search completed");
        Ok(body.items)
    }
}

impl Drop for GitHubClient {
    fn drop(&mut self) {
        self.close();
    }
}
