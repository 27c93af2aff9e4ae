// src/ui/intake.rs
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::notice_line;
use crate::app::intake::IntakeScreen;
use crate::app::state::ScreenState;
use crate::intake::{FieldId, FieldKind};

/// Form rows with section headings interleaved. Returns the rows and the
/// row index of the selected field.
pub fn form_rows(screen: &IntakeScreen) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut selected_row = 0;
    let mut section = "";

    for (i, field) in FieldId::ALL.iter().copied().enumerate() {
        if field.section() != section {
            section = field.section();
            lines.push(Line::from(Span::styled(
                section.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
        }

        let selected = i == screen.selected;
        let value = match (&screen.editing, selected) {
            (Some(buffer), true) => format!("{}▏", buffer.as_str()),
            _ => screen.form.value(field),
        };
        let value = match (value.is_empty(), field.placeholder()) {
            (true, Some(hint)) => Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray)),
            _ => Span::raw(value),
        };
        let marker = if field.is_required() { "*" } else { " " };
        let choice = if field.kind() == FieldKind::Choice { " ⇆" } else { "" };
        let label_style = if selected {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        if selected {
            selected_row = lines.len();
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<30}", marker, field.label()), label_style),
            value,
            Span::styled(choice.to_string(), Style::default().fg(Color::DarkGray)),
        ]));
    }
    (lines, selected_row)
}

pub fn draw(f: &mut Frame, screen: &IntakeScreen, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let (rows, selected_row) = form_rows(screen);
    // keep the selected row on screen
    let visible = columns[0].height.saturating_sub(2) as usize;
    let offset = selected_row.saturating_sub(visible.saturating_sub(1)) as u16;
    f.render_widget(
        Paragraph::new(rows)
            .block(Block::default().borders(Borders::ALL).title(" Patient Intake Form "))
            .scroll((offset, 0)),
        columns[0],
    );

    let summary_block = Block::default().borders(Borders::ALL).title(" Summary ");
    let summary = match screen.request.state() {
        ScreenState::Idle => Paragraph::new(vec![
            notice_line(screen.notice.as_deref()),
            Line::from("Fill in the form and press F5 to submit."),
        ]),
        ScreenState::Submitting => {
            Paragraph::new(Span::styled("Submitting...", Style::default().fg(Color::Yellow)))
        }
        ScreenState::Failed(msg) => Paragraph::new(vec![
            Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
            notice_line(screen.notice.as_deref()),
        ]),
        ScreenState::Success(text) => Paragraph::new(text.clone()).scroll((screen.summary_scroll, 0)),
    };
    f.render_widget(summary.block(summary_block).wrap(Wrap { trim: false }), columns[1]);
}
