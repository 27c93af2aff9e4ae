// src/ui/extraction.rs
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::highlight::{highlighted_lines, match_style};
use super::notice_line;
use crate::app::extraction::{ExtractionScreen, Pane};
use crate::app::state::ScreenState;

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

pub fn draw(f: &mut Frame, screen: &ExtractionScreen, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    draw_picker(f, screen, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(5), Constraint::Length(8)])
        .split(columns[1]);

    let file = match (&screen.file, screen.focus, screen.picker.selected()) {
        (_, Pane::Picker, Some(entry)) => entry.describe(),
        (Some(path), _, _) => format!("File: {}", path.display()),
        _ => "No file selected".to_string(),
    };
    let status = match screen.request.state() {
        ScreenState::Submitting => Line::from(Span::styled("Processing...", Style::default().fg(Color::Yellow))),
        ScreenState::Failed(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
        _ => notice_line(screen.notice.as_deref()),
    };
    f.render_widget(Paragraph::new(vec![Line::from(file), status]), right[0]);

    let document = Block::default()
        .borders(Borders::ALL)
        .title(" Document ")
        .border_style(border_style(screen.focus == Pane::Document));
    let conditions = Block::default().borders(Borders::ALL).title(" Identified Medical Conditions ");

    match screen.request.result() {
        Some(extraction) => {
            let lines = highlighted_lines(&extraction.highlighted, match_style());
            f.render_widget(
                Paragraph::new(lines).block(document).wrap(Wrap { trim: false }).scroll((screen.scroll, 0)),
                right[1],
            );
            if extraction.keywords.is_empty() {
                f.render_widget(
                    Paragraph::new("No medical conditions identified in the document.").block(conditions),
                    right[2],
                );
            } else {
                let items: Vec<ListItem> =
                    extraction.keywords.iter().map(|k| ListItem::new(format!("• {}", k))).collect();
                f.render_widget(List::new(items).block(conditions), right[2]);
            }
        }
        None => {
            let hint = "Pick a PDF on the left, then press 'u' to upload it.";
            f.render_widget(Paragraph::new(hint).block(document), right[1]);
            f.render_widget(conditions, right[2]);
        }
    }
}

fn draw_picker(f: &mut Frame, screen: &ExtractionScreen, area: Rect) {
    let picker = &screen.picker;
    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|entry| {
            let label = if entry.is_dir { format!("{}/", entry.name) } else { entry.name.clone() };
            let style = if entry.is_dir { Style::default().fg(Color::Blue) } else { Style::default() };
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();

    let title = match &screen.filter {
        Some(filter) => format!(" {} /{}▏ ", picker.current_path.display(), filter.as_str()),
        None => format!(" {} ", picker.current_path.display()),
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style(screen.focus == Pane::Picker)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    if !picker.entries.is_empty() {
        state.select(Some(picker.selected_index()));
    }
    f.render_stateful_widget(list, area, &mut state);
}
