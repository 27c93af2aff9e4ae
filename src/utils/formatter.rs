// src/utils/formatter.rs
use colored::Colorize;
use reqwest::Url;
use serde::Serialize;

use crate::highlight::HighlightedText;

pub fn format_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}

/// The backend labels specializations "Cardiologist - Heart care"; tables
/// show only the part before the first " - ".
pub fn specialist_name(specialization: &str) -> &str {
    let name = specialization.split(" - ").next().unwrap_or("").trim();
    if name.is_empty() {
        "Unknown"
    } else {
        name
    }
}

/// Maps search link for a street address.
pub fn maps_search_url(address: &str) -> String {
    match Url::parse_with_params("https://www.google.com/maps/search/", &[("api", "1"), ("query", address)]) {
        Ok(url) => url.to_string(),
        Err(_) => "https://www.google.com/maps/search/".to_string(),
    }
}

/// Truncates to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Highlighted text for a terminal: matches on a yellow background.
pub fn render_colored(text: &HighlightedText) -> String {
    text.spans()
        .iter()
        .map(|span| {
            if span.is_match {
                span.text.black().on_yellow().bold().to_string()
            } else {
                span.text.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::highlight;

    #[test]
    fn test_format_json() {
        let value = serde_json::json!({"name": "test", "value": 123});
        let result = format_json(&value).unwrap();
        assert!(result.contains('\n'));
        assert!(result.contains("\"value\": 123"));
    }

    #[test]
    fn test_specialist_name() {
        assert_eq!(specialist_name("Cardiologist - Heart care"), "Cardiologist");
        assert_eq!(specialist_name("Dermatologist"), "Dermatologist");
        assert_eq!(specialist_name(""), "Unknown");
    }

    #[test]
    fn test_maps_search_url_encodes_address() {
        let url = maps_search_url("12 Main St, Pune & Co");
        assert!(url.starts_with("https://www.google.com/maps/search/?api=1&query="));
        assert!(!url.contains(' '));
        assert!(url.contains("%26"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Ruby Hall Clinic", 8), "Ruby Ha…");
    }

    #[test]
    fn test_render_colored_only_touches_matches() {
        let text = highlight("mild fever today", &["fever"]);
        let expected = format!("mild {} today", "fever".black().on_yellow().bold());
        assert_eq!(render_colored(&text), expected);
    }
}
