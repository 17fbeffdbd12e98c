//! # Login Form
//!
//! Gate shown until a user is signed in. Backed by the mock authenticator,
//! so any non-empty credentials get through; the form still validates
//! emptiness locally to give the error path a face.
//!
//! Tab / Up / Down move focus; Enter on the mode row switches between
//! sign-in and registration, Enter anywhere else submits.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// What the form asks the event loop to do.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginEvent {
    Login { email: String, password: String },
    Register { email: String, password: String, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SignIn,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
    Name,
    SwitchMode,
}

pub struct LoginForm {
    mode: Mode,
    email: String,
    password: String,
    name: String,
    focus: Field,
    error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            mode: Mode::SignIn,
            email: String::new(),
            password: String::new(),
            name: String::new(),
            focus: Field::Email,
            error: None,
        }
    }

    /// Show an authentication error inline.
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn fields(&self) -> Vec<Field> {
        match self.mode {
            Mode::SignIn => vec![Field::Email, Field::Password, Field::SwitchMode],
            Mode::Register => vec![Field::Email, Field::Password, Field::Name, Field::SwitchMode],
        }
    }

    fn focus_next(&mut self, backwards: bool) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if backwards {
            (current + fields.len() - 1) % fields.len()
        } else {
            (current + 1) % fields.len()
        };
        self.focus = fields[next];
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            Field::Name => Some(&mut self.name),
            Field::SwitchMode => None,
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::SignIn => Mode::Register,
            Mode::Register => Mode::SignIn,
        };
        self.focus = Field::Email;
        self.error = None;
    }

    fn attempt(&self) -> LoginEvent {
        match self.mode {
            Mode::SignIn => LoginEvent::Login {
                email: self.email.clone(),
                password: self.password.clone(),
            },
            Mode::Register => LoginEvent::Register {
                email: self.email.clone(),
                password: self.password.clone(),
                name: self.name.clone(),
            },
        }
    }

    fn field_line(&self, label: &str, value: &str, field: Field, mask: bool) -> Line<'static> {
        let shown = if mask {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let style = if self.focus == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(vec![
            Span::styled(format!("{label:<10}"), style),
            Span::styled(shown, style),
            Span::styled(if self.focus == field { "▏" } else { "" }, style),
        ])
    }
}

impl Component for LoginForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.mode {
            Mode::SignIn => " Sign in to Banter ",
            Mode::Register => " Create your Banter account ",
        };
        let switch_label = match self.mode {
            Mode::SignIn => "→ New here? Create an account",
            Mode::Register => "→ Already registered? Sign in",
        };

        let mut lines = vec![
            Line::raw(""),
            self.field_line("Email", &self.email, Field::Email, false),
            self.field_line("Password", &self.password, Field::Password, true),
        ];
        if self.mode == Mode::Register {
            lines.push(self.field_line("Name", &self.name, Field::Name, false));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            switch_label,
            if self.focus == Field::SwitchMode {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ));
        if let Some(err) = &self.error {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                err.clone(),
                Style::default().fg(Color::Red),
            ));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Tab moves · Enter confirms",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ));

        let height = lines.len() as u16 + 2;
        let [centered] = Layout::horizontal([Constraint::Length(44)])
            .flex(Flex::Center)
            .areas(area);
        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(centered);

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(title)
            .title_alignment(Alignment::Center);

        frame.render_widget(Clear, centered);
        frame.render_widget(Paragraph::new(lines).block(block), centered);
    }
}

impl EventHandler for LoginForm {
    type Event = LoginEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Tab | TuiEvent::CursorDown => {
                self.focus_next(false);
                None
            }
            TuiEvent::CursorUp => {
                self.focus_next(true);
                None
            }
            TuiEvent::InputChar(c) if *c != '\n' => {
                self.error = None;
                if let Some(buffer) = self.focused_buffer() {
                    buffer.push(*c);
                }
                None
            }
            TuiEvent::Paste(text) => {
                if let Some(buffer) = self.focused_buffer() {
                    buffer.push_str(text);
                }
                None
            }
            TuiEvent::Backspace => {
                if let Some(buffer) = self.focused_buffer() {
                    buffer.pop();
                }
                None
            }
            TuiEvent::Submit => {
                if self.focus == Field::SwitchMode {
                    self.toggle_mode();
                    None
                } else {
                    Some(self.attempt())
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(form: &mut LoginForm, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_login_attempt_carries_fields() {
        let mut form = LoginForm::new();
        type_text(&mut form, "jo@example.com");
        form.handle_event(&TuiEvent::Tab);
        type_text(&mut form, "hunter2");

        match form.handle_event(&TuiEvent::Submit) {
            Some(LoginEvent::Login { email, password }) => {
                assert_eq!(email, "jo@example.com");
                assert_eq!(password, "hunter2");
            }
            other => panic!("Expected Login event, got {:?}", other),
        }
    }

    #[test]
    fn test_tab_wraps_focus() {
        let mut form = LoginForm::new();
        // SignIn mode has 3 focus stops
        form.handle_event(&TuiEvent::Tab);
        form.handle_event(&TuiEvent::Tab);
        form.handle_event(&TuiEvent::Tab);
        assert_eq!(form.focus, Field::Email);
    }

    #[test]
    fn test_switch_mode_row_toggles() {
        let mut form = LoginForm::new();
        form.handle_event(&TuiEvent::Tab); // password
        form.handle_event(&TuiEvent::Tab); // switch row
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        assert_eq!(form.mode, Mode::Register);

        form.handle_event(&TuiEvent::Tab); // password
        form.handle_event(&TuiEvent::Tab); // name
        form.handle_event(&TuiEvent::Tab); // switch row
        form.handle_event(&TuiEvent::Submit);
        assert_eq!(form.mode, Mode::SignIn);
    }

    #[test]
    fn test_register_attempt_includes_name() {
        let mut form = LoginForm::new();
        form.handle_event(&TuiEvent::Tab);
        form.handle_event(&TuiEvent::Tab);
        form.handle_event(&TuiEvent::Submit); // switch to register
        type_text(&mut form, "jo@example.com");
        form.handle_event(&TuiEvent::Tab);
        type_text(&mut form, "pw");
        form.handle_event(&TuiEvent::Tab);
        type_text(&mut form, "Jo");

        match form.handle_event(&TuiEvent::Submit) {
            Some(LoginEvent::Register { name, .. }) => assert_eq!(name, "Jo"),
            other => panic!("Expected Register event, got {:?}", other),
        }
    }

    #[test]
    fn test_typing_clears_error() {
        let mut form = LoginForm::new();
        form.set_error("all fields are required".to_string());
        form.handle_event(&TuiEvent::InputChar('a'));
        assert!(form.error.is_none());
    }
}
