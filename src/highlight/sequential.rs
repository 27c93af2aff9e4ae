// src/highlight/sequential.rs
//! Legacy substitution: each keyword, longest first, is wrapped in the
//! *current* text, which already contains the markers inserted for the
//! keywords before it. Shorter keywords inside a highlighted phrase get
//! wrapped again, and keywords that occur in the markers themselves
//! corrupt them. Kept for output compatibility with older clients.

use super::keywords;

pub fn annotate<S: AsRef<str>>(text: &str, keywords: &[S], open: &str, close: &str) -> String {
    keywords::compile(keywords)
        .iter()
        .fold(text.to_string(), |acc, pattern| pattern.wrap_all(&acc, open, close))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: &str = "<mark>";
    const CLOSE: &str = "</mark>";

    #[test]
    fn test_nests_substring_keywords() {
        let out = annotate("Patient has diabetes mellitus.", &["diabetes", "diabetes mellitus"], OPEN, CLOSE);
        assert_eq!(out, "Patient has <mark><mark>diabetes</mark> mellitus</mark>.");
    }

    #[test]
    fn test_keyword_inside_marker_corrupts_markup() {
        let out = annotate("fever mark", &["mark", "fever"], OPEN, CLOSE);
        assert_eq!(out, "<<mark>mark</mark>>fever</<mark>mark</mark>> <mark>mark</mark>");
    }

    #[test]
    fn test_rerun_double_wraps() {
        let once = annotate("Fever", &["fever"], OPEN, CLOSE);
        let twice = annotate(&once, &["fever"], OPEN, CLOSE);
        assert_eq!(once, "<mark>Fever</mark>");
        assert_eq!(twice, "<mark><mark>Fever</mark></mark>");
    }

    #[test]
    fn test_empty_keywords_leave_text() {
        let keywords: [&str; 0] = [];
        assert_eq!(annotate("a <b> & c", &keywords, OPEN, CLOSE), "a <b> & c");
    }
}
