//! Per-request reply policy.
//!
//! Wraps the core pipeline for one incoming query and decides what the user
//! sees: the rendered results, or one of the fixed notices below. Used by
//! both the CLI and the HTTP front end.
//!
//! | Situation | Notice | Inline id | Cache (s) |
//! |-----------|--------|-----------|-----------|
//! | query longer than 256 chars | [`QUERY_TOO_LONG`] | `query_too_long` | 86400 |
//! | gateway error | [`SEARCH_FAILED`] | `failed_to_search_repositories` | 300 |
//! | zero results | [`NOTHING_FOUND`] | `no_repositories_found` | 60 |
//!
//! Blank queries get no reply at all (`None`).

use serde::Serialize;

use github_repos_core::gateway::SearchGateway;
use github_repos_core::models::RepositoryRecord;
use github_repos_core::query::{parse_query, SearchQuery};
use github_repos_core::render::{
    render_inline, render_repositories, InlineAnswer, ParseMode, MAX_DESCRIPTION_LENGTH,
};

/// Longest query accepted, in characters.
pub const MAX_QUERY_LENGTH: usize = 256;

pub const QUERY_TOO_LONG: &str = "Query is too long. Max length is 256 symbols :(";
pub const SEARCH_FAILED: &str = "Failed to search repositories :(";
pub const NOTHING_FOUND: &str = "No repositories found :(";

const QUERY_TOO_LONG_CACHE_TIME: u32 = 86400;
const SEARCH_FAILED_CACHE_TIME: u32 = 300;
const NOTHING_FOUND_CACHE_TIME: u32 = 60;

/// A direct reply to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageReply {
    pub text: String,
    pub parse_mode: ParseMode,
    pub disable_web_page_preview: bool,
}

impl MessageReply {
    fn notice(text: &str) -> Self {
        Self {
            text: text.to_string(),
            parse_mode: ParseMode::Plain,
            disable_web_page_preview: true,
        }
    }
}

/// True when the query contains something other than whitespace.
pub fn has_text(query: &str) -> bool {
    !query.trim().is_empty()
}

enum Outcome {
    TooLong,
    Failed,
    NothingFound,
    Found(Vec<RepositoryRecord>),
}

async fn run_search(gateway: &dyn SearchGateway, raw: &str) -> Outcome {
    if raw.chars().count() > MAX_QUERY_LENGTH {
        tracing::info!(query_len = raw.chars().count(), "Query rejected as too long");
        return Outcome::TooLong;
    }

    let query: SearchQuery = parse_query(raw);
    let request = query.to_request();
    tracing::info!(
        query = raw,
        text = %query.text,
        filters = ?query.filters,
        "Searching repositories"
    );

    match gateway.search(&request).await {
        Ok(records) if records.is_empty() => {
            tracing::info!(query = raw, q = %request.q, "No repositories found");
            Outcome::NothingFound
        }
        Ok(records) => Outcome::Found(records),
        Err(e) => {
            tracing::warn!(
                query = raw,
                q = %request.q,
                error = %format!("{:#}", e),
                "Failed to search repositories"
            );
            Outcome::Failed
        }
    }
}

/// Answer a query with a single message.
///
/// Results are rendered as HTML within the 4096-character budget. Link
/// previews are disabled when more than one repository is shown.
pub async fn answer_message(gateway: &dyn SearchGateway, raw: &str) -> Option<MessageReply> {
    if !has_text(raw) {
        return None;
    }

    let reply = match run_search(gateway, raw).await {
        Outcome::TooLong => MessageReply::notice(QUERY_TOO_LONG),
        Outcome::Failed => MessageReply::notice(SEARCH_FAILED),
        Outcome::NothingFound => MessageReply::notice(NOTHING_FOUND),
        Outcome::Found(records) => MessageReply {
            text: render_repositories(&records, MAX_DESCRIPTION_LENGTH),
            parse_mode: ParseMode::Html,
            disable_web_page_preview: records.len() > 1,
        },
    };
    Some(reply)
}

/// Answer a query with a list of inline results.
pub async fn answer_inline(gateway: &dyn SearchGateway, raw: &str) -> Option<InlineAnswer> {
    if !has_text(raw) {
        return None;
    }

    let answer = match run_search(gateway, raw).await {
        Outcome::TooLong => {
            InlineAnswer::notice("query_too_long", QUERY_TOO_LONG, QUERY_TOO_LONG_CACHE_TIME)
        }
        Outcome::Failed => InlineAnswer::notice(
            "failed_to_search_repositories",
            SEARCH_FAILED,
            SEARCH_FAILED_CACHE_TIME,
        ),
        Outcome::NothingFound => InlineAnswer::notice(
            "no_repositories_found",
            NOTHING_FOUND,
            NOTHING_FOUND_CACHE_TIME,
        ),
        Outcome::Found(records) => render_inline(&records, MAX_DESCRIPTION_LENGTH),
    };
    Some(answer)
}
