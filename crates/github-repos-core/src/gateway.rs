//! Search backend abstraction.
//!
//! The [`SearchGateway`] trait is the seam between the pure pipeline and
//! the network. The application crate implements it over the GitHub REST
//! API; [`StaticGateway`] serves canned records for tests and offline use.

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::RepositoryRecord;
use crate::query::SearchRequest;

/// Executes a repository search.
///
/// Implementations make a single attempt per call. Failures (network,
/// non-2xx status, undecodable body) are returned as errors; the caller
/// decides what to show the user.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RepositoryRecord>>;
}

/// In-memory gateway returning the same records for every request, or
/// failing every request.
pub struct StaticGateway {
    records: Vec<RepositoryRecord>,
    failure: Option<String>,
}

impl StaticGateway {
    pub fn new(records: Vec<RepositoryRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// A gateway whose every search fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl SearchGateway for StaticGateway {
    async fn search(&self, _request: &SearchRequest) -> Result<Vec<RepositoryRecord>> {
        if let Some(ref message) = self.failure {
            bail!("{}", message);
        }
        Ok(self.records.clone())
    }
}
