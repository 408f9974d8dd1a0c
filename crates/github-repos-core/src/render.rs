//! HTML rendering of repository records.
//!
//! Two output shapes are produced:
//!
//! - **Direct reply** ([`render_repositories`]): one message holding as many
//!   whole repository blocks as fit in [`MAX_MESSAGE_LENGTH`] characters.
//! - **Inline answer** ([`render_inline`]): up to [`MAX_INLINE_RESULTS`]
//!   independent units, one per repository.
//!
//! Every dynamic value goes through [`escape_html`] before it is placed in
//! the markup, URLs included.

use serde::Serialize;

use crate::models::RepositoryRecord;

/// Hard ceiling of a single chat message, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Maximum number of units in one inline answer.
pub const MAX_INLINE_RESULTS: usize = 50;

/// Description length used by both reply modes.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// How long clients may cache a successful inline answer, in seconds.
pub const INLINE_CACHE_TIME: u32 = 60;

/// Markup dialect of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    Html,
    Plain,
}

/// One self-contained inline result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineResult {
    pub id: String,
    pub title: String,
    pub message_text: String,
    pub parse_mode: ParseMode,
    pub disable_web_page_preview: bool,
    /// Truncated description shown under the title; plain text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
}

/// A full inline answer with its delivery metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineAnswer {
    pub results: Vec<InlineResult>,
    pub cache_time: u32,
    pub is_personal: bool,
}

impl InlineAnswer {
    /// A single plain-text article, used for notices such as "no results".
    pub fn notice(id: &str, text: &str, cache_time: u32) -> Self {
        Self {
            results: vec![InlineResult {
                id: id.to_string(),
                title: text.to_string(),
                message_text: text.to_string(),
                parse_mode: ParseMode::Plain,
                disable_web_page_preview: true,
                description: None,
                thumb_url: None,
            }],
            cache_time,
            is_personal: false,
        }
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for HTML text and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_opt(value: Option<&str>) -> String {
    value.map(escape_html).unwrap_or_default()
}

/// Render one repository block, terminated by a blank line.
///
/// Absent language, license and description render as empty fields.
pub fn render_repository(repository: &RepositoryRecord) -> String {
    let owner = &repository.owner;
    let license = repository.license.as_ref();

    format!(
        "<a href='{url}'>{name}</a>\n\
         Language: <b>{language}</b>\n\
         Owner: <a href='{owner_url}'>{owner_login}</a>\n\
         Stars: <b>{stars}</b>\n\
         Forks: <b>{forks}</b>\n\
         License: <a href='{license_url}'><i>{license_name}</i></a>\n\
         Description: <i>{description}</i>\n\n",
        url = escape_html(&repository.url),
        name = escape_html(&repository.name),
        language = escape_opt(repository.language.as_deref()),
        owner_url = escape_html(&owner.profile_url),
        owner_login = escape_html(&owner.login),
        stars = repository.star_count,
        forks = repository.fork_count,
        license_url = escape_opt(license.and_then(|l| l.url.as_deref())),
        license_name = escape_opt(license.map(|l| l.name.as_str())),
        description = escape_opt(repository.description.as_deref()),
    )
}

/// Render repositories into one message of at most [`MAX_MESSAGE_LENGTH`]
/// characters.
///
/// Records are taken in order; each description is truncated to
/// `max_description_length` on a copy. Rendering stops at the first block
/// that would overflow the budget, so blocks are never split. An empty
/// slice renders as an empty string.
pub fn render_repositories(
    repositories: &[RepositoryRecord],
    max_description_length: usize,
) -> String {
    let mut text = String::new();
    let mut text_len = 0;

    for repository in repositories {
        let block = render_repository(&repository.with_truncated_description(max_description_length));
        let block_len = block.chars().count();
        if text_len + block_len > MAX_MESSAGE_LENGTH {
            break;
        }
        text.push_str(&block);
        text_len += block_len;
    }

    text
}

/// Render up to [`MAX_INLINE_RESULTS`] repositories as independent inline
/// units.
///
/// There is no shared budget; a unit whose own text exceeds
/// [`MAX_MESSAGE_LENGTH`] is left out.
pub fn render_inline(repositories: &[RepositoryRecord], max_description_length: usize) -> InlineAnswer {
    let results = repositories
        .iter()
        .take(MAX_INLINE_RESULTS)
        .filter_map(|repository| {
            let repository = repository.with_truncated_description(max_description_length);
            let message_text = render_repository(&repository);
            if message_text.chars().count() > MAX_MESSAGE_LENGTH {
                return None;
            }
            Some(InlineResult {
                id: repository.id.to_string(),
                title: repository.full_name,
                message_text,
                parse_mode: ParseMode::Html,
                disable_web_page_preview: false,
                description: repository.description,
                thumb_url: Some(repository.owner.avatar_url),
            })
        })
        .collect();

    InlineAnswer {
        results,
        cache_time: INLINE_CACHE_TIME,
        is_personal: false,
    }
}
