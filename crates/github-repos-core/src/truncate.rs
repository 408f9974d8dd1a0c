//! Sentence-aware description truncation.
//!
//! # Algorithm
//!
//! 1. If the text fits in `max_length` characters, return it as is.
//! 2. Take the first `max_length + 1` characters (the truncation window).
//! 3. Walk the window backwards and stop at the first `.`, `!` or `?`.
//! 4. Return everything before that terminator followed by [`ELLIPSIS`].
//! 5. With no terminator in the window, return the text unchanged.
//!
//! Step 5 can leave a description longer than `max_length`; the caller's
//! hard limits (the 4096 message budget) still apply downstream.
//!
//! Lengths are counted in `char`s, not bytes.
//!
//! # Example
//!
//! ```rust
//! use github_repos_core::truncate::truncate_description;
//!
//! assert_eq!(truncate_description("Bye! Hi! This is a long description.", 10), "Bye! Hi...");
//! assert_eq!(truncate_description("short", 10), "short");
//! ```

/// Appended to a description that was cut.
pub const ELLIPSIS: &str = "...";

const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Shorten `text` to roughly `max_length` characters, ending on a sentence
/// terminator.
///
/// The result is never longer than `text`: if the cut plus [`ELLIPSIS`]
/// would not be shorter, `text` is returned unchanged. Applying the
/// function twice gives the same result as applying it once.
pub fn truncate_description(text: &str, max_length: usize) -> String {
    let length = text.chars().count();
    if length <= max_length {
        return text.to_string();
    }

    let window: Vec<char> = text.chars().take(max_length + 1).collect();
    let Some(cut) = window.iter().rposition(|c| TERMINATORS.contains(c)) else {
        return text.to_string();
    };

    if cut + ELLIPSIS.len() > length {
        return text.to_string();
    }

    let mut truncated: String = window[..cut].iter().collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_unchanged() {
        assert_eq!(truncate_description("Hello", 10), "Hello");
        assert_eq!(truncate_description("0123456789", 10), "0123456789");
        assert_eq!(truncate_description("", 0), "");
    }

    #[test]
    fn test_no_terminator_in_window_returns_input() {
        // window is "Hello world"; the '!' sits just outside it
        assert_eq!(truncate_description("Hello world!", 10), "Hello world!");
        let long = "a".repeat(500);
        assert_eq!(truncate_description(&long, 200), long);
    }

    #[test]
    fn test_cuts_before_terminator() {
        assert_eq!(
            truncate_description("Hello world! This is a long description.", 12),
            "Hello world..."
        );
        assert_eq!(
            truncate_description("Bye! This is a long description.", 10),
            "Bye..."
        );
    }

    #[test]
    fn test_nearest_terminator_wins() {
        // '?' is nearer the end than '.', so it is used even though '.'
        // comes first in the terminator list
        assert_eq!(
            truncate_description("One. Two? Three four five six", 12),
            "One. Two..."
        );
        assert_eq!(
            truncate_description("Bye! Hi! This is a long description.", 10),
            "Bye! Hi..."
        );
    }

    #[test]
    fn test_terminator_at_window_end() {
        // window is "abcdefghij." (11 chars), cut lands on index 10
        let text = "abcdefghij.klmnop";
        assert_eq!(truncate_description(text, 10), "abcdefghij...");
    }

    #[test]
    fn test_never_longer_than_input() {
        // cutting at index 3 would give "abc..." (6 chars) for a 5 char input
        assert_eq!(truncate_description("abc.d", 4), "abc.d");
    }

    #[test]
    fn test_result_ends_with_ellipsis_when_cut() {
        let text = "Fast web framework. Built on tokio and hyper, with many many extras.";
        let out = truncate_description(text, 30);
        assert_eq!(out, "Fast web framework...");
        assert!(out.ends_with(ELLIPSIS));
        assert!(out.chars().count() <= text.chars().count());
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Hello world! This is a long description.",
            "abcdefghij.klmnop",
            "abcdefgh.jklmnop",
            "abcdefghi.klmnop",
            "abc.d",
            "no terminators here at all, just words",
            "Short.",
        ];
        for s in samples {
            for m in [0, 3, 4, 8, 9, 10, 12, 200] {
                let once = truncate_description(s, m);
                let twice = truncate_description(&once, m);
                assert_eq!(once, twice, "input {:?}, max {}", s, m);
            }
        }
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let text = "Привет мир. Это длинное описание";
        assert_eq!(truncate_description(text, 12), "Привет мир...");
    }
}
