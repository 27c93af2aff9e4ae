// src/ui/hospitals.rs
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{input_line, notice_line};
use crate::api::Place;
use crate::app::hospitals::{HospitalField, HospitalScreen};
use crate::app::state::ScreenState;
use crate::utils::formatter::{maps_search_url, specialist_name, truncate};

pub const COLUMNS: [&str; 4] = ["Name", "Specialization", "Rating", "Address"];

/// Table cells for one place, in [`COLUMNS`] order.
pub fn place_cells(place: &Place) -> [String; 4] {
    [
        place.name.clone(),
        specialist_name(&place.specialization).to_string(),
        place.rating.to_string(),
        place.address.clone(),
    ]
}

pub fn draw(f: &mut Frame, screen: &HospitalScreen, backend_url: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Length(1), Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let inputs: Vec<Line> = HospitalField::ALL
        .iter()
        .map(|&field| input_line(field.label(), screen.input(field), screen.focus == field))
        .collect();
    f.render_widget(
        Paragraph::new(inputs).block(Block::default().borders(Borders::ALL).title(" Search ")),
        chunks[0],
    );

    let status = match screen.request.state() {
        ScreenState::Submitting => Line::from(Span::styled("Searching...", Style::default().fg(Color::Yellow))),
        ScreenState::Failed(msg) => Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
        ScreenState::Success(search) => {
            let mut text = format!("{} result(s)", search.places.len());
            if let Some(query) = &screen.last_query {
                text.push_str(&format!(" {}", query));
            }
            if let Some(message) = &search.message {
                text.push_str(&format!(" | {}", message));
            }
            Line::from(text)
        }
        ScreenState::Idle => notice_line(screen.notice.as_deref()),
    };
    f.render_widget(Paragraph::new(status), chunks[1]);

    let places = screen.places();
    if matches!(screen.request.state(), ScreenState::Success(_)) && places.is_empty() {
        f.render_widget(
            Paragraph::new("No hospitals found.").block(Block::default().borders(Borders::ALL).title(" Results ")),
            chunks[2],
        );
    } else {
        let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c)))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = places.iter().map(|p| Row::new(place_cells(p).map(Cell::from))).collect();
        let widths = [Constraint::Percentage(28), Constraint::Percentage(22), Constraint::Length(6), Constraint::Min(20)];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(" Results "))
            .highlight_style(Style::default().bg(Color::DarkGray));
        let mut state = TableState::default();
        if !places.is_empty() {
            state.select(Some(screen.selected));
        }
        f.render_stateful_widget(table, chunks[2], &mut state);
    }

    let mut links = Vec::new();
    if let Some(place) = screen.selected_place() {
        links.push(Line::from(format!("Maps: {}", truncate(&maps_search_url(&place.address), 120))));
    }
    let map = screen
        .request
        .result()
        .and_then(|s| s.map_url.clone())
        .unwrap_or_else(|| format!("{}/static/map.html", backend_url));
    links.push(Line::from(Span::styled(format!("Map view: {}", map), Style::default().fg(Color::Cyan))));
    f.render_widget(Paragraph::new(links).block(Block::default().borders(Borders::TOP)), chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Rating;

    #[test]
    fn test_place_cells() {
        let place = Place {
            name: "City Care".into(),
            specialization: "Cardiologist - Heart care".into(),
            rating: Rating::Score(4.26),
            address: "12 MG Road".into(),
            lat: None,
            lng: None,
        };
        assert_eq!(place_cells(&place), ["City Care", "Cardiologist", "4.3", "12 MG Road"].map(String::from));
    }

    #[test]
    fn test_place_cells_without_rating() {
        let place: Place = serde_json::from_str(r#"{"name": "Clinic", "rating": "N/A"}"#).unwrap();
        assert_eq!(place_cells(&place), ["Clinic", "Unknown", "N/A", "Unknown"].map(String::from));
    }
}
