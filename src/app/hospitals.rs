// src/app/hospitals.rs
use crossterm::event::{KeyCode, KeyEvent};

use super::state::{Request, Ticket};
use super::{edit_input, Action, Job};
use crate::api::query::{parse_coordinate, parse_symptoms, HospitalQuery};
use crate::api::{HospitalSearch, Place};
use crate::config::Location;
use crate::editor::InputBuffer;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HospitalField {
    Symptoms,
    City,
    Latitude,
    Longitude,
}

impl HospitalField {
    pub const ALL: [HospitalField; 4] =
        [HospitalField::Symptoms, HospitalField::City, HospitalField::Latitude, HospitalField::Longitude];

    pub fn label(self) -> &'static str {
        match self {
            HospitalField::Symptoms => "Symptoms (comma separated)",
            HospitalField::City => "City",
            HospitalField::Latitude => "Latitude",
            HospitalField::Longitude => "Longitude",
        }
    }

    fn next(self) -> Self {
        match self {
            HospitalField::Symptoms => HospitalField::City,
            HospitalField::City => HospitalField::Latitude,
            HospitalField::Latitude => HospitalField::Longitude,
            HospitalField::Longitude => HospitalField::Symptoms,
        }
    }
}

pub struct HospitalScreen {
    pub symptoms: InputBuffer,
    pub city: InputBuffer,
    pub latitude: InputBuffer,
    pub longitude: InputBuffer,
    pub focus: HospitalField,
    pub request: Request<HospitalSearch>,
    /// Human description of the query behind the current result.
    pub last_query: Option<String>,
    pub selected: usize,
    pub notice: Option<String>,
}

impl HospitalScreen {
    pub fn new(default_location: Option<Location>) -> Self {
        let (latitude, longitude) = match default_location {
            Some(loc) => (
                InputBuffer::from_text(&loc.latitude.to_string()),
                InputBuffer::from_text(&loc.longitude.to_string()),
            ),
            None => (InputBuffer::new(), InputBuffer::new()),
        };
        HospitalScreen {
            symptoms: InputBuffer::new(),
            city: InputBuffer::new(),
            latitude,
            longitude,
            focus: HospitalField::Symptoms,
            request: Request::new(),
            last_query: None,
            selected: 0,
            notice: None,
        }
    }

    pub fn input(&self, field: HospitalField) -> &InputBuffer {
        match field {
            HospitalField::Symptoms => &self.symptoms,
            HospitalField::City => &self.city,
            HospitalField::Latitude => &self.latitude,
            HospitalField::Longitude => &self.longitude,
        }
    }

    fn input_mut(&mut self, field: HospitalField) -> &mut InputBuffer {
        match field {
            HospitalField::Symptoms => &mut self.symptoms,
            HospitalField::City => &mut self.city,
            HospitalField::Latitude => &mut self.latitude,
            HospitalField::Longitude => &mut self.longitude,
        }
    }

    pub fn nearby_query(&self) -> Result<HospitalQuery> {
        let latitude = parse_coordinate(self.latitude.as_str(), "latitude")?;
        let longitude = parse_coordinate(self.longitude.as_str(), "longitude")?;
        HospitalQuery::nearby(latitude, longitude, parse_symptoms(self.symptoms.as_str()))
    }

    pub fn city_query(&self) -> Result<HospitalQuery> {
        HospitalQuery::city(self.city.as_str(), parse_symptoms(self.symptoms.as_str()))
    }

    fn submit(&mut self, query: Result<HospitalQuery>) -> Action {
        let query = match query {
            Ok(query) => query,
            Err(e) => {
                self.notice = Some(e.to_string());
                return Action::None;
            }
        };
        match self.request.begin() {
            Some(ticket) => {
                self.notice = None;
                self.selected = 0;
                self.last_query = Some(query.describe());
                Action::Submit(Job::Hospitals { ticket, query })
            }
            None => Action::None,
        }
    }

    pub fn complete(&mut self, ticket: Ticket, outcome: std::result::Result<HospitalSearch, String>) {
        let outcome = outcome.map_err(|e| format!("Failed to fetch hospitals: {}", e));
        self.request.complete(ticket, outcome);
    }

    pub fn places(&self) -> &[Place] {
        self.request.result().map(|s| s.places.as_slice()).unwrap_or(&[])
    }

    pub fn selected_place(&self) -> Option<&Place> {
        self.places().get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::Back,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                Action::None
            }
            KeyCode::F(2) => {
                let query = self.nearby_query();
                self.submit(query)
            }
            KeyCode::F(3) => {
                let query = self.city_query();
                self.submit(query)
            }
            KeyCode::Enter => {
                let query = if self.focus == HospitalField::City { self.city_query() } else { self.nearby_query() };
                self.submit(query)
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if self.selected + 1 < self.places().len() {
                    self.selected += 1;
                }
                Action::None
            }
            _ => {
                let focus = self.focus;
                edit_input(self.input_mut(focus), key);
                Action::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Rating;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut HospitalScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn place(name: &str) -> Place {
        Place {
            name: name.into(),
            specialization: "General Physician".into(),
            rating: Rating::Score(4.0),
            address: "Main St".into(),
            lat: None,
            lng: None,
        }
    }

    #[test]
    fn test_default_location_prefills() {
        let screen = HospitalScreen::new(Some(Location { latitude: 18.52, longitude: 73.85 }));
        assert_eq!(screen.latitude.as_str(), "18.52");
        assert_eq!(screen.longitude.as_str(), "73.85");
    }

    #[test]
    fn test_city_search_from_city_field() {
        let mut screen = HospitalScreen::new(None);
        type_text(&mut screen, "fever, cough");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "Pune");

        let Action::Submit(Job::Hospitals { query, .. }) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected a search job");
        };
        assert_eq!(query, HospitalQuery::city("Pune", vec!["fever".into(), "cough".into()]).unwrap());
        assert_eq!(screen.last_query.as_deref(), Some("in Pune"));
    }

    #[test]
    fn test_nearby_requires_coordinates() {
        let mut screen = HospitalScreen::new(None);
        type_text(&mut screen, "fever");
        assert_eq!(screen.handle_key(key(KeyCode::F(2))), Action::None);
        assert!(screen.notice.as_deref().unwrap().contains("latitude"));
        assert!(!screen.request.is_busy());
    }

    #[test]
    fn test_missing_symptoms_notice() {
        let mut screen = HospitalScreen::new(None);
        screen.city = InputBuffer::from_text("Pune");
        assert_eq!(screen.handle_key(key(KeyCode::F(3))), Action::None);
        assert_eq!(screen.notice.as_deref(), Some("Please enter at least one symptom"));
    }

    #[test]
    fn test_results_and_selection() {
        let mut screen = HospitalScreen::new(Some(Location { latitude: 1.0, longitude: 2.0 }));
        type_text(&mut screen, "rash");
        let Action::Submit(Job::Hospitals { ticket, .. }) = screen.handle_key(key(KeyCode::F(2))) else {
            panic!("expected a search job");
        };
        let search = HospitalSearch { places: vec![place("A"), place("B")], ..HospitalSearch::default() };
        screen.complete(ticket, Ok(search));

        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Down));
        assert_eq!(screen.selected_place().unwrap().name, "B");
        screen.handle_key(key(KeyCode::Up));
        assert_eq!(screen.selected_place().unwrap().name, "A");
    }
}
