// src/ui/mod.rs
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};
use crate::editor::InputBuffer;

pub mod extraction;
pub mod highlight;
pub mod hospitals;
pub mod intake;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
        .split(f.size());

    let titles: Vec<Line> = std::iter::once(Screen::Home)
        .chain(Screen::MENU)
        .map(|s| Line::from(s.title()))
        .collect();
    let selected = match app.screen {
        Screen::Home => 0,
        Screen::Extraction => 1,
        Screen::Hospitals => 2,
        Screen::Intake => 3,
    };
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Healthcare Assistant "))
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    match app.screen {
        Screen::Home => draw_home(f, app, chunks[1]),
        Screen::Extraction => extraction::draw(f, &app.extraction, chunks[1]),
        Screen::Hospitals => hospitals::draw(f, &app.hospitals, &app.backend_url, chunks[1]),
        Screen::Intake => intake::draw(f, &app.intake, chunks[1]),
    }

    let help = match app.screen {
        Screen::Home => "↑/↓ select  Enter open  1-3 jump  q quit",
        Screen::Extraction => "Tab pane  Enter pick  ⌫ up  / filter  . hidden  o sort  u upload  Esc back",
        Screen::Hospitals => "Tab field  Enter search  F2 nearby  F3 city  ↑/↓ row  Esc back",
        Screen::Intake => "↑/↓ field  Enter edit/toggle  F5 submit  PgUp/PgDn summary  Esc back",
    };
    let busy = if app.is_busy() { " [working]" } else { "" };
    f.render_widget(
        Paragraph::new(format!("{}{}  Ctrl+C quit", help, busy)).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn draw_home(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = Screen::MENU
        .iter()
        .enumerate()
        .map(|(i, screen)| ListItem::new(format!("{}. {}", i + 1, screen.title())))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(" Backend: {} ", app.backend_url)))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.home_selected));
    f.render_stateful_widget(list, area, &mut state);
}

/// `label: value` with a cursor when focused.
pub(crate) fn input_line(label: &str, buffer: &InputBuffer, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled(format!("{:<28}", label), label_style)];
    if focused {
        let (before, after): (String, String) = {
            let text = buffer.as_str();
            let split = text.char_indices().nth(buffer.cursor()).map(|(i, _)| i).unwrap_or(text.len());
            (text[..split].to_string(), text[split..].to_string())
        };
        spans.push(Span::raw(before));
        spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(after));
    } else {
        spans.push(Span::raw(buffer.as_str().to_string()));
    }
    Line::from(spans)
}

pub(crate) fn notice_line(notice: Option<&str>) -> Line<'static> {
    match notice {
        Some(msg) => Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Red))),
        None => Line::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_line_cursor() {
        let mut buffer = InputBuffer::from_text("Pune");
        buffer.move_cursor(-2);
        let line = input_line("City", &buffer, true);
        let parts: Vec<&str> = line.spans.iter().skip(1).map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["Pu", "▏", "ne"]);
    }
}
