// src/highlight/keywords.rs
use std::collections::HashSet;
use std::ops::Range;

use regex::Regex;

/// Word characters for boundary checks: a match may not touch one of these
/// on either side.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Trims keywords, drops empty ones, removes case-insensitive duplicates
/// (first spelling wins) and orders the rest longest first. The sort is
/// stable, so equal-length keywords keep the backend's order.
pub fn prepare<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut prepared: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_lowercase()))
        .map(|k| k.to_string())
        .collect();

    prepared.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    prepared
}

/// Compiles the prepared keyword list, longest first.
pub fn compile<S: AsRef<str>>(keywords: &[S]) -> Vec<KeywordPattern> {
    prepare(keywords)
        .iter()
        .filter_map(|k| KeywordPattern::new(k))
        .collect()
}

/// A single keyword compiled to a case-insensitive literal pattern.
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    keyword: String,
    regex: Regex,
}

impl KeywordPattern {
    /// Every word of the keyword is escaped; the gaps between words match
    /// any whitespace run, so "chest pain" also finds "chest\n pain".
    pub fn new(keyword: &str) -> Option<Self> {
        let words: Vec<String> = keyword.split_whitespace().map(regex::escape).collect();
        if words.is_empty() {
            return None;
        }

        let pattern = format!(r"(?i){}", words.join(r"\s+"));
        match Regex::new(&pattern) {
            Ok(regex) => Some(KeywordPattern { keyword: keyword.to_string(), regex }),
            Err(e) => {
                tracing::warn!(keyword, error = %e, "skipping keyword that does not compile");
                None
            }
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Byte ranges of all whole-word occurrences, left to right, non-overlapping.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        let mut start = 0;

        while let Some(m) = self.regex.find_at(text, start) {
            if is_whole_word(text, m.start(), m.end()) {
                found.push(m.range());
                start = m.end();
            } else {
                // Rejected: retry one character later, an overlapping
                // occurrence may still sit on word boundaries.
                start = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            }
            if start >= text.len() {
                break;
            }
        }

        found
    }

    /// Wraps every whole-word occurrence in `open`/`close`.
    pub fn wrap_all(&self, text: &str, open: &str, close: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for range in self.find_all(text) {
            out.push_str(&text[last..range.start]);
            out.push_str(open);
            out.push_str(&text[range.clone()]);
            out.push_str(close);
            last = range.end;
        }
        out.push_str(&text[last..]);
        out
    }
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_dedups_and_sorts() {
        let prepared = prepare(&["flu", " Diabetes ", "", "diabetes mellitus", "DIABETES", "  "]);
        assert_eq!(prepared, vec!["diabetes mellitus", "Diabetes", "flu"]);
    }

    #[test]
    fn test_prepare_counts_chars_not_bytes() {
        // "ménière" is 7 chars but 8 bytes, same length as "measles"
        let prepared = prepare(&["measles", "ménière"]);
        assert_eq!(prepared, vec!["measles", "ménière"]);
    }

    #[test]
    fn test_escapes_pattern_syntax() {
        let pattern = KeywordPattern::new("C. diff (toxin)").unwrap();
        assert_eq!(pattern.find_all("C. diff (toxin) found"), vec![0..15]);
        assert!(pattern.find_all("Cx diff (toxin)").is_empty());
    }

    #[test]
    fn test_retries_after_rejected_match() {
        let pattern = KeywordPattern::new("aa").unwrap();
        // first candidate at 0 touches 'a' on the right; the one at 4 is whole
        assert_eq!(pattern.find_all("aaa aa"), vec![4..6]);
    }

    #[test]
    fn test_flexible_whitespace() {
        let pattern = KeywordPattern::new("chest pain").unwrap();
        assert_eq!(pattern.find_all("severe Chest\n  pain"), vec![7..19]);
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        let pattern = KeywordPattern::new("asthma").unwrap();
        assert_eq!(pattern.find_all("(asthma), asthma_x"), vec![1..7]);
    }

    #[test]
    fn test_wrap_all() {
        let pattern = KeywordPattern::new("fever").unwrap();
        assert_eq!(pattern.wrap_all("Fever and fever.", "<", ">"), "<Fever> and <fever>.");
    }
}
