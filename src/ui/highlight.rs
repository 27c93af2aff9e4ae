// src/ui/highlight.rs
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span as TextSpan};

use crate::highlight::HighlightedText;

pub fn match_style() -> Style {
    Style::default().bg(Color::Yellow).fg(Color::Black).add_modifier(Modifier::BOLD)
}

/// Splits highlighted text into terminal lines. A match that crosses a line
/// break keeps its style on both sides.
pub fn highlighted_lines(text: &HighlightedText, matched: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<TextSpan<'static>> = Vec::new();

    for span in text.spans() {
        let style = if span.is_match { matched } else { Style::default() };
        let mut parts = span.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                current.push(TextSpan::styled(part.trim_end_matches('\r').to_string(), style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::highlight;

    fn flat(line: &Line) -> Vec<(String, bool)> {
        line.spans.iter().map(|s| (s.content.to_string(), s.style == match_style())).collect()
    }

    #[test]
    fn test_lines_keep_match_style() {
        let text = highlight("Diagnosis:\nacute asthma noted", &["asthma"]);
        let lines = highlighted_lines(&text, match_style());
        assert_eq!(lines.len(), 2);
        assert_eq!(flat(&lines[0]), vec![("Diagnosis:".to_string(), false)]);
        assert_eq!(
            flat(&lines[1]),
            vec![("acute ".to_string(), false), ("asthma".to_string(), true), (" noted".to_string(), false)]
        );
    }

    #[test]
    fn test_match_across_line_break() {
        let text = highlight("type 2\ndiabetes", &["type 2 diabetes"]);
        let lines = highlighted_lines(&text, match_style());
        assert_eq!(flat(&lines[0]), vec![("type 2".to_string(), true)]);
        assert_eq!(flat(&lines[1]), vec![("diabetes".to_string(), true)]);
    }

    #[test]
    fn test_empty_text_is_one_blank_line() {
        let lines = highlighted_lines(&HighlightedText::default(), match_style());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans.is_empty());
    }
}
