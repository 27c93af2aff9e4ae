// src/app/extraction.rs
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};

use super::state::{Request, Ticket};
use super::{edit_input, Action, Job};
use crate::api::query::validate_upload;
use crate::api::ExtractionResult;
use crate::editor::InputBuffer;
use crate::filesystem::dir::Activation;
use crate::filesystem::DirNavigator;
use crate::highlight::{HighlightedText, Highlighter};

/// An extraction result together with its highlighted rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub result: ExtractionResult,
    pub highlighted: HighlightedText,
    pub keywords: Vec<String>,
}

impl Extraction {
    pub fn new(result: ExtractionResult, highlighter: &Highlighter) -> Self {
        let highlighted = highlighter.highlight(&result.source_text, &result.keywords);
        let keywords = result.distinct_keywords();
        Extraction { result, highlighted, keywords }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Picker,
    Document,
}

pub struct ExtractionScreen {
    pub picker: DirNavigator,
    pub file: Option<PathBuf>,
    pub request: Request<Extraction>,
    pub focus: Pane,
    pub scroll: u16,
    pub notice: Option<String>,
    /// Name filter being typed in the picker, if any.
    pub filter: Option<InputBuffer>,
}

impl ExtractionScreen {
    pub fn new(start_dir: PathBuf) -> Self {
        ExtractionScreen {
            picker: DirNavigator::new(start_dir),
            file: None,
            request: Request::new(),
            focus: Pane::Picker,
            scroll: 0,
            notice: None,
            filter: None,
        }
    }

    /// Choosing a new file discards the previous result.
    pub fn select_file(&mut self, path: PathBuf) {
        tracing::info!(file = %path.display(), "selected document");
        self.file = Some(path);
        self.request.reset();
        self.scroll = 0;
        self.notice = None;
    }

    pub fn submit(&mut self) -> Action {
        let Some(file) = self.file.clone() else {
            self.notice = Some("Please select a PDF file".to_string());
            return Action::None;
        };
        if let Err(e) = validate_upload(&file) {
            self.notice = Some(e.to_string());
            return Action::None;
        }
        match self.request.begin() {
            Some(ticket) => {
                self.notice = None;
                self.scroll = 0;
                Action::Submit(Job::Extract { ticket, path: file })
            }
            None => Action::None,
        }
    }

    pub fn complete(&mut self, ticket: Ticket, outcome: Result<ExtractionResult, String>, highlighter: &Highlighter) {
        let outcome = outcome
            .map(|result| Extraction::new(result, highlighter))
            .map_err(|e| format!("Error processing PDF: {}", e));
        if self.request.complete(ticket, outcome) && self.request.result().is_some() {
            self.focus = Pane::Document;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if let Some(filter) = self.filter.as_mut() {
            match key.code {
                KeyCode::Esc => {
                    self.filter = None;
                    self.picker.search("");
                }
                KeyCode::Enter => self.filter = None,
                _ => {
                    edit_input(filter, key);
                    let query = filter.as_str().to_string();
                    self.picker.search(&query);
                }
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Esc => return Action::Back,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Pane::Picker => Pane::Document,
                    Pane::Document => Pane::Picker,
                };
                return Action::None;
            }
            KeyCode::Char('u') | KeyCode::F(5) => return self.submit(),
            _ => {}
        }

        match self.focus {
            Pane::Picker => self.handle_picker_key(key),
            Pane::Document => self.handle_document_key(key),
        }
        Action::None
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.picker.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.picker.move_selection(1),
            KeyCode::PageUp => self.picker.move_selection(-10),
            KeyCode::PageDown => self.picker.move_selection(10),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.picker.navigate_up(),
            KeyCode::Char('.') => self.picker.toggle_hidden(),
            KeyCode::Char('o') => self.picker.cycle_sort(),
            KeyCode::Char('/') => self.filter = Some(InputBuffer::new()),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                if let Activation::PickedFile(path) = self.picker.activate() {
                    self.select_file(path);
                }
            }
            _ => {}
        }
    }

    fn handle_document_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn result() -> ExtractionResult {
        ExtractionResult {
            source_text: "History of asthma and type 2 diabetes.".into(),
            keywords: vec!["Asthma".into(), "diabetes".into(), "type 2 diabetes".into()],
        }
    }

    #[test]
    fn test_submit_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut screen = ExtractionScreen::new(dir.path().to_path_buf());
        assert_eq!(screen.handle_key(key(KeyCode::Char('u'))), Action::None);
        assert_eq!(screen.notice.as_deref(), Some("Please select a PDF file"));
    }

    #[test]
    fn test_pick_submit_complete() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("labs.pdf");
        std::fs::write(&pdf, b"%PDF").unwrap();
        let mut screen = ExtractionScreen::new(dir.path().to_path_buf());

        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.file.as_deref(), Some(pdf.as_path()));

        let Action::Submit(Job::Extract { ticket, path }) = screen.handle_key(key(KeyCode::Char('u'))) else {
            panic!("expected an upload job");
        };
        assert_eq!(path, pdf);
        // second submit while in flight is ignored
        assert_eq!(screen.handle_key(key(KeyCode::Char('u'))), Action::None);

        screen.complete(ticket, Ok(result()), &Highlighter::default());
        let extraction = screen.request.result().unwrap();
        assert_eq!(extraction.highlighted.matches().collect::<Vec<_>>(), vec!["asthma", "type 2 diabetes"]);
        assert_eq!(extraction.keywords, vec!["Asthma", "diabetes", "type 2 diabetes"]);
        assert_eq!(screen.focus, Pane::Document);
    }

    #[test]
    fn test_filter_narrows_picker() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("labs.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("xray.pdf"), b"%PDF").unwrap();
        let mut screen = ExtractionScreen::new(dir.path().to_path_buf());
        assert_eq!(screen.picker.entries.len(), 2);

        screen.handle_key(key(KeyCode::Char('/')));
        for c in "xr".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(screen.picker.entries.len(), 1);
        assert_eq!(screen.picker.entries[0].name, "xray.pdf");

        // 'u' is filter text here, not upload
        assert_eq!(screen.handle_key(key(KeyCode::Char('u'))), Action::None);
        screen.handle_key(key(KeyCode::Esc));
        assert!(screen.filter.is_none());
        assert_eq!(screen.picker.entries.len(), 2);
    }

    #[test]
    fn test_new_file_discards_result() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("labs.pdf");
        std::fs::write(&pdf, b"%PDF").unwrap();
        let mut screen = ExtractionScreen::new(dir.path().to_path_buf());
        screen.select_file(pdf.clone());
        let Action::Submit(Job::Extract { ticket, .. }) = screen.submit() else { panic!() };
        screen.complete(ticket, Ok(result()), &Highlighter::default());
        assert!(screen.request.result().is_some());

        screen.select_file(pdf);
        assert!(screen.request.result().is_none());
    }

    #[test]
    fn test_failure_message() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("labs.pdf");
        std::fs::write(&pdf, b"%PDF").unwrap();
        let mut screen = ExtractionScreen::new(dir.path().to_path_buf());
        screen.select_file(pdf);
        let Action::Submit(Job::Extract { ticket, .. }) = screen.submit() else { panic!() };
        screen.complete(ticket, Err("server responded with 500: boom".into()), &Highlighter::default());
        assert_eq!(screen.request.error(), Some("Error processing PDF: server responded with 500: boom"));
    }
}
