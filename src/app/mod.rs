// src/app/mod.rs
//! Application state: one struct per screen plus the jobs they hand to the
//! runtime. Nothing here touches the terminal or the network directly.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::api::{ApiClient, ExtractionResult, HospitalQuery, HospitalSearch};
use crate::config::AppConfig;
use crate::editor::InputBuffer;
use crate::highlight::Highlighter;
use crate::intake::PatientIntake;

pub mod extraction;
pub mod hospitals;
pub mod intake;
pub mod state;

use extraction::ExtractionScreen;
use hospitals::HospitalScreen;
use intake::IntakeScreen;
use state::Ticket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Extraction,
    Hospitals,
    Intake,
}

impl Screen {
    pub const MENU: [Screen; 3] = [Screen::Extraction, Screen::Hospitals, Screen::Intake];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Extraction => "Medical Report Extraction",
            Screen::Hospitals => "Hospital Finder",
            Screen::Intake => "Patient Intake",
        }
    }
}

/// Backend work requested by a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Extract { ticket: Ticket, path: PathBuf },
    Hospitals { ticket: Ticket, query: HospitalQuery },
    Summary { ticket: Ticket, form: PatientIntake },
}

impl Job {
    pub async fn run(self, client: ApiClient) -> BackendEvent {
        match self {
            Job::Extract { ticket, path } => {
                let outcome = client.extract_diseases(&path).await;
                BackendEvent::Extracted { ticket, outcome: log_outcome("extract", outcome) }
            }
            Job::Hospitals { ticket, query } => {
                let outcome = client.search_hospitals(&query).await;
                BackendEvent::Hospitals { ticket, outcome: log_outcome("hospitals", outcome) }
            }
            Job::Summary { ticket, form } => {
                let outcome = client.generate_summary(&form).await;
                BackendEvent::Summary { ticket, outcome: log_outcome("summary", outcome) }
            }
        }
    }
}

fn log_outcome<T>(job: &str, outcome: crate::Result<T>) -> Result<T, String> {
    outcome.map_err(|e| {
        tracing::error!(job, error = %e, "backend request failed");
        e.to_string()
    })
}

/// Completion of a [`Job`], sent from the worker task back to the UI loop.
#[derive(Debug)]
pub enum BackendEvent {
    Extracted { ticket: Ticket, outcome: Result<ExtractionResult, String> },
    Hospitals { ticket: Ticket, outcome: Result<HospitalSearch, String> },
    Summary { ticket: Ticket, outcome: Result<String, String> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Back,
    Submit(Job),
}

pub struct App {
    pub screen: Screen,
    pub home_selected: usize,
    pub extraction: ExtractionScreen,
    pub hospitals: HospitalScreen,
    pub intake: IntakeScreen,
    pub highlighter: Highlighter,
    pub backend_url: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let start_dir = config
            .start_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        App {
            screen: Screen::Home,
            home_selected: 0,
            extraction: ExtractionScreen::new(start_dir),
            hospitals: HospitalScreen::new(config.default_location),
            intake: IntakeScreen::new(),
            highlighter: Highlighter::from_config(&config.highlight),
            backend_url: config.backend_url.clone(),
            should_quit: false,
        }
    }

    /// Routes a key to the active screen. Returns a job when the screen
    /// submitted something.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Job> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        let action = match self.screen {
            Screen::Home => {
                self.handle_home_key(key);
                Action::None
            }
            Screen::Extraction => self.extraction.handle_key(key),
            Screen::Hospitals => self.hospitals.handle_key(key),
            Screen::Intake => self.intake.handle_key(key),
        };

        match action {
            Action::None => None,
            Action::Back => {
                self.screen = Screen::Home;
                None
            }
            Action::Submit(job) => Some(job),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.home_selected = self.home_selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.home_selected = (self.home_selected + 1).min(Screen::MENU.len() - 1)
            }
            KeyCode::Enter => self.screen = Screen::MENU[self.home_selected],
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.home_selected = index;
                self.screen = Screen::MENU[index];
            }
            _ => {}
        }
    }

    /// Applies a finished job to the screen that issued it.
    pub fn apply(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Extracted { ticket, outcome } => {
                self.extraction.complete(ticket, outcome, &self.highlighter)
            }
            BackendEvent::Hospitals { ticket, outcome } => self.hospitals.complete(ticket, outcome),
            BackendEvent::Summary { ticket, outcome } => self.intake.complete(ticket, outcome),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.extraction.request.is_busy() || self.hospitals.request.is_busy() || self.intake.request.is_busy()
    }
}

/// Shared line-editing keys for single-line inputs.
pub(crate) fn edit_input(buffer: &mut InputBuffer, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => buffer.insert_char(c),
        KeyCode::Backspace => buffer.delete_char(),
        KeyCode::Delete => buffer.delete_forward(),
        KeyCode::Left => buffer.move_cursor(-1),
        KeyCode::Right => buffer.move_cursor(1),
        KeyCode::Home => buffer.move_home(),
        KeyCode::End => buffer.move_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Location;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let dir = std::env::temp_dir();
        let config = AppConfig {
            start_dir: Some(dir),
            default_location: Some(Location { latitude: 18.5, longitude: 73.8 }),
            ..AppConfig::default()
        };
        App::new(&config)
    }

    #[test]
    fn test_home_navigation() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.screen, Screen::Hospitals);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Home);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Intake);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.screen = Screen::Intake;
        // 'q' is text input outside the home menu
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = app();
        let mut release = key(KeyCode::Char('1'));
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_job_round_trip_through_apply() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('2')));
        for c in "fever".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let Some(Job::Hospitals { ticket, .. }) = app.handle_key(key(KeyCode::Enter)) else {
            panic!("expected a hospital search");
        };
        assert!(app.is_busy());

        app.apply(BackendEvent::Hospitals { ticket, outcome: Err("connection refused".into()) });
        assert!(!app.is_busy());
        assert_eq!(app.hospitals.request.error(), Some("Failed to fetch hospitals: connection refused"));
    }

    #[test]
    fn test_edit_input_keys() {
        let mut buffer = InputBuffer::from_text("fevr");
        edit_input(&mut buffer, key(KeyCode::Left));
        edit_input(&mut buffer, key(KeyCode::Char('e')));
        assert_eq!(buffer.as_str(), "fever");
        edit_input(&mut buffer, key(KeyCode::Home));
        edit_input(&mut buffer, key(KeyCode::Delete));
        assert_eq!(buffer.as_str(), "ever");
    }
}
