//! Repository records as returned by the GitHub search API.
//!
//! Field names follow this crate's vocabulary; `serde` renames map them to
//! the wire names (`html_url`, `stargazers_count`, `forks_count`). Fields
//! the API sends that are not listed here are ignored.

use serde::{Deserialize, Serialize};

use crate::truncate::truncate_description;

/// A single repository from a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(rename = "html_url")]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "stargazers_count")]
    pub star_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "forks_count")]
    pub fork_count: u64,
    pub owner: Owner,
    #[serde(default)]
    pub license: Option<License>,
}

/// The user or organization owning a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: u64,
    pub login: String,
    #[serde(rename = "html_url")]
    pub profile_url: String,
    pub avatar_url: String,
}

/// License summary. `url` is absent for licenses GitHub cannot identify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl RepositoryRecord {
    /// Returns a copy whose description is shortened with
    /// [`truncate_description`]. `self` is left untouched, so the same
    /// record can be rendered for several outputs.
    pub fn with_truncated_description(&self, max_length: usize) -> Self {
        Self {
            description: self
                .description
                .as_deref()
                .map(|d| truncate_description(d, max_length)),
            ..self.clone()
        }
    }
}
