//! Introduction and source-code texts.

use github_repos_core::render::escape_html;

const SEARCH_DOCS_URL: &str =
    "https://docs.github.com/en/search-github/searching-on-github/searching-for-repositories";

const SOURCE_URL: &str = "https://github.com/Desiders/github_repos_bot";

/// HTML help message greeting `first_name` and listing the supported
/// qualifiers with example queries.
pub fn introduction_text(first_name: &str) -> String {
    format!(
        "Hello, {first_name}!\n\n\
         I'm helps you find the repositories!\n\n\
         <a href='{docs}'>Search pattern</a>\n\
         args (main, other see by link):\n\
         \t- <b>user:&lt;username&gt;</b>\n\
         \t- <b>language:&lt;language&gt;</b>\n\
         \t- <b>order:asc|desc</b>\n\
         \t- <b>sort:stars|forks|updated</b>\n\
         \t- <b>&lt;text&gt; in:name|description|topics|readme</b>\n\
         \t- <b>forks|stars|followers|size|topics:&lt;condition&gt;</b>\n\n\
         Examples:\n\
         1. <code>get_anime_bot user:Desiders</code>\n\
         2. <code>anime sort:stars order:desc language:Python</code>\n\
         3. <code>sort:stars order:desc language:Rust</code>\n\
         4. <code>fast in:description</code>\n\
         5. <code>popular in:description order:asc sort:stars</code>\n\
         6. <code>language:Rust stars:1000..2000 forks:&lt;=100 order:desc sort:forks</code>\n\
         7. <code>python baby</code>",
        first_name = escape_html(first_name),
        docs = escape_html(SEARCH_DOCS_URL),
    )
}

/// Plain-text notice pointing at the source repository.
pub fn source_text() -> String {
    format!("Bot has open source code!\n\nSource: {}", SOURCE_URL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use github_repos_core::query::parse_query;

    #[test]
    fn test_name_is_escaped() {
        let text = introduction_text("<b>Eve</b>");
        assert!(text.starts_with("Hello, &lt;b&gt;Eve&lt;/b&gt;!"));
    }

    #[test]
    fn test_lists_examples() {
        let text = introduction_text("Ann");
        assert!(text.contains("<code>python baby</code>"));
        assert!(text.contains(SEARCH_DOCS_URL));
    }

    #[test]
    fn test_example_queries_parse() {
        // example 6 as the user would type it
        let query = parse_query("language:Rust stars:1000..2000 forks:<=100 order:desc sort:forks");
        assert_eq!(query.filters.len(), 5);
        assert!(query.text.is_empty());
    }

    #[test]
    fn test_source_text() {
        assert!(source_text().ends_with(SOURCE_URL));
    }
}
