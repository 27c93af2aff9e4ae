// src/highlight/mod.rs
//! Keyword highlighting for extracted document text.
//!
//! Matching is case-insensitive and whole-word, keywords are tried longest
//! first, and the result is a list of [`Span`]s rather than a markup string,
//! so the rendering layer decides how a match looks.

use std::collections::HashSet;
use std::ops::{Range, RangeInclusive};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::HighlightConfig;

pub mod keywords;
pub mod sequential;

pub use keywords::KeywordPattern;

// Private-use planes; sequential markup is carried into spans with two
// code points from here that the input does not contain.
const PRIVATE_USE: [RangeInclusive<u32>; 3] = [0xE000..=0xF8FF, 0xF0000..=0xFFFFD, 0x100000..=0x10FFFD];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Match every keyword against the original text; longer keywords claim
    /// their range first and overlapping shorter matches are dropped.
    #[default]
    Merged,
    /// Substitute keyword by keyword over the accumulating markup.
    Sequential,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub is_match: bool,
}

impl Span {
    fn new(text: &str, is_match: bool) -> Self {
        Span { text: text.to_string(), is_match }
    }
}

/// Highlighted document text. Concatenating the spans yields the text the
/// highlighter was given, after whitespace normalization when enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightedText {
    spans: Vec<Span>,
}

impl HighlightedText {
    /// `ranges` must be sorted and non-overlapping.
    fn from_ranges(text: &str, ranges: &[Range<usize>]) -> Self {
        let mut spans = Vec::with_capacity(ranges.len() * 2 + 1);
        let mut last = 0;
        for range in ranges {
            if range.start > last {
                spans.push(Span::new(&text[last..range.start], false));
            }
            spans.push(Span::new(&text[range.clone()], true));
            last = range.end;
        }
        if last < text.len() {
            spans.push(Span::new(&text[last..], false));
        }
        HighlightedText { spans }
    }

    /// Reads text marked with the `open`/`close` pair. Nested markers
    /// collapse into a single matched span.
    fn from_sentinels(marked: &str, open: char, close: char) -> Self {
        let mut spans: Vec<Span> = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;

        for c in marked.chars() {
            match c {
                c if c == open => {
                    flush(&mut current, depth > 0, &mut spans);
                    depth += 1;
                }
                c if c == close => {
                    flush(&mut current, depth > 0, &mut spans);
                    depth = depth.saturating_sub(1);
                }
                _ => current.push(c),
            }
        }
        flush(&mut current, depth > 0, &mut spans);

        HighlightedText { spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Matched fragments in document order, as they appear in the text.
    pub fn matches(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().filter(|s| s.is_match).map(|s| s.text.as_str())
    }

    pub fn match_count(&self) -> usize {
        self.spans.iter().filter(|s| s.is_match).count()
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Wraps every matched span in `open`/`close`; unmatched text is copied
    /// byte for byte.
    pub fn to_marked(&self, open: &str, close: &str) -> String {
        let mut out = String::new();
        for span in &self.spans {
            if span.is_match {
                out.push_str(open);
                out.push_str(&span.text);
                out.push_str(close);
            } else {
                out.push_str(&span.text);
            }
        }
        out
    }
}

fn flush(current: &mut String, is_match: bool, spans: &mut Vec<Span>) {
    if current.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.is_match == is_match => last.text.push_str(current),
        _ => spans.push(Span { text: current.clone(), is_match }),
    }
    current.clear();
}

fn is_private_use(c: &char) -> bool {
    PRIVATE_USE.iter().any(|r| r.contains(&(*c as u32)))
}

/// Two private-use characters found in neither the text nor the keywords.
fn free_sentinels<S: AsRef<str>>(text: &str, keywords: &[S]) -> Option<(char, char)> {
    let used: HashSet<char> = text
        .chars()
        .chain(keywords.iter().flat_map(|k| k.as_ref().chars()))
        .filter(is_private_use)
        .collect();
    let mut free = PRIVATE_USE
        .iter()
        .flat_map(|r| r.clone())
        .filter_map(char::from_u32)
        .filter(|c| !used.contains(c));
    Some((free.next()?, free.next()?))
}

/// Highlights with the merged strategy.
pub fn highlight<S: AsRef<str>>(text: &str, keywords: &[S]) -> HighlightedText {
    let mut claimed: Vec<Range<usize>> = Vec::new();

    for pattern in keywords::compile(keywords) {
        for range in pattern.find_all(text) {
            let free = claimed.iter().all(|c| range.end <= c.start || range.start >= c.end);
            if free {
                claimed.push(range);
            }
        }
    }

    claimed.sort_by_key(|r| r.start);
    HighlightedText::from_ranges(text, &claimed)
}

/// Collapses every whitespace run to one space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Configured highlighter used by the screens and the CLI.
#[derive(Debug, Clone)]
pub struct Highlighter {
    strategy: Strategy,
    normalize: bool,
    open_marker: String,
    close_marker: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::from_config(&HighlightConfig::default())
    }
}

impl Highlighter {
    pub fn from_config(config: &HighlightConfig) -> Self {
        Highlighter {
            strategy: config.strategy,
            normalize: config.normalize_whitespace,
            open_marker: config.open_marker.clone(),
            close_marker: config.close_marker.clone(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn highlight<S: AsRef<str>>(&self, text: &str, keywords: &[S]) -> HighlightedText {
        let text = self.prepare_text(text);
        match self.strategy {
            Strategy::Merged => highlight(&text, keywords),
            Strategy::Sequential => match free_sentinels(&text, keywords) {
                Some((open, close)) => {
                    let marked = sequential::annotate(&text, keywords, &open.to_string(), &close.to_string());
                    HighlightedText::from_sentinels(&marked, open, close)
                }
                None => {
                    tracing::warn!("no free private-use pair for sequential markup, using merged spans");
                    highlight(&text, keywords)
                }
            },
        }
    }

    /// Plain-text rendering with the configured markers. The sequential
    /// strategy reproduces legacy output exactly, nested markers included.
    pub fn render_marked<S: AsRef<str>>(&self, text: &str, keywords: &[S]) -> String {
        match self.strategy {
            Strategy::Merged => self
                .highlight(text, keywords)
                .to_marked(&self.open_marker, &self.close_marker),
            Strategy::Sequential => sequential::annotate(
                &self.prepare_text(text),
                keywords,
                &self.open_marker,
                &self.close_marker,
            ),
        }
    }

    fn prepare_text(&self, text: &str) -> String {
        if self.normalize {
            normalize_whitespace(text)
        } else {
            text.to_string()
        }
    }
}
