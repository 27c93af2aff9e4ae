// src/app/intake.rs
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{Request, Ticket};
use super::{edit_input, Action, Job};
use crate::editor::InputBuffer;
use crate::intake::{FieldId, FieldKind, PatientIntake};

pub struct IntakeScreen {
    pub form: PatientIntake,
    pub selected: usize,
    /// Buffer for the text field being edited, if any.
    pub editing: Option<InputBuffer>,
    pub request: Request<String>,
    pub notice: Option<String>,
    pub summary_scroll: u16,
}

impl Default for IntakeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeScreen {
    pub fn new() -> Self {
        IntakeScreen {
            form: PatientIntake::default(),
            selected: 0,
            editing: None,
            request: Request::new(),
            notice: None,
            summary_scroll: 0,
        }
    }

    pub fn selected_field(&self) -> FieldId {
        FieldId::ALL[self.selected.min(FieldId::ALL.len() - 1)]
    }

    fn submit(&mut self) -> Action {
        if let Err(e) = self.form.validate() {
            self.notice = Some(e.to_string());
            return Action::None;
        }
        match self.request.begin() {
            Some(ticket) => {
                self.notice = None;
                self.summary_scroll = 0;
                Action::Submit(Job::Summary { ticket, form: self.form.clone() })
            }
            None => Action::None,
        }
    }

    pub fn complete(&mut self, ticket: Ticket, outcome: Result<String, String>) {
        let outcome = outcome.map_err(|e| format!("Error submitting form: {}", e));
        self.request.complete(ticket, outcome);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.editing.is_some() {
            self.handle_editing_key(key);
            return Action::None;
        }

        let submit = key.code == KeyCode::F(5)
            || (key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL));
        if submit {
            return self.submit();
        }

        match key.code {
            KeyCode::Esc => return Action::Back,
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected = (self.selected + 1).min(FieldId::ALL.len() - 1)
            }
            KeyCode::PageUp => self.summary_scroll = self.summary_scroll.saturating_sub(5),
            KeyCode::PageDown => self.summary_scroll = self.summary_scroll.saturating_add(5),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let field = self.selected_field();
                match field.kind() {
                    FieldKind::Choice => self.form.cycle(field),
                    FieldKind::Text => {
                        let current = self.form.value(field);
                        self.editing = Some(InputBuffer::from_text(&current));
                    }
                }
            }
            _ => {}
        }
        Action::None
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Tab => {
                let field = self.selected_field();
                if let (Some(mut buffer), Some(slot)) = (self.editing.take(), self.form.text_mut(field)) {
                    *slot = buffer.take();
                }
                if key.code == KeyCode::Tab {
                    self.selected = (self.selected + 1).min(FieldId::ALL.len() - 1);
                }
            }
            KeyCode::Esc => self.editing = None,
            _ => {
                if let Some(buffer) = self.editing.as_mut() {
                    edit_input(buffer, key);
                }
            }
        }
    }
}
