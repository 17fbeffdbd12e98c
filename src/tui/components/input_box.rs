//! # InputBox Component
//!
//! The draft editor: captures text, handles editing keys, recalls input
//! history, and submits on Enter.
//!
//! ## History recall
//!
//! Up/Down emit history events only when the draft is empty or is an
//! unedited recall (tracked by the `recalled` flag). Any direct edit clears
//! the flag and reports `ContentChanged`, which the event loop turns into a
//! history-cursor reset; browsing always restarts from the live draft after
//! an edit.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Tallest the editor grows before clipping (content lines, borders extra).
const MAX_VISIBLE_LINES: u16 = 5;

/// High-level events emitted by the InputBox.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the draft (Enter).
    Submit(String),
    /// User edited the draft directly.
    ContentChanged,
    /// Browse toward older history entries (Up on an empty/recalled draft).
    HistoryOlder,
    /// Browse back toward the live draft (Down on an empty/recalled draft).
    HistoryNewer,
    /// Draft cleared with Esc.
    Cleared,
}

/// Draft editor with history recall.
///
/// # Props
///
/// - `disabled`: render dimmed while a generation is in flight
/// - `history_pos`: browse position shown in the title while recalling
///
/// # State
///
/// - `buffer`: the draft text
/// - `cursor`: byte offset into `buffer`
/// - `recalled`: the buffer holds an unedited history recall
pub struct InputBox {
    pub buffer: String,
    pub disabled: bool,
    pub history_pos: Option<(usize, usize)>,
    cursor: usize,
    recalled: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            history_pos: None,
            cursor: 0,
            recalled: false,
        }
    }

    /// Install text recalled from history; the cursor goes to the end and
    /// the draft counts as unedited until the user types.
    pub fn set_recalled(&mut self, text: String) {
        self.cursor = text.len();
        self.recalled = !text.is_empty();
        self.buffer = text;
    }

    /// Required height for the current draft (content lines + borders).
    pub fn calculate_height(&self) -> u16 {
        let lines = (self.buffer.split('\n').count() as u16).clamp(1, MAX_VISIBLE_LINES);
        lines + 2
    }

    fn history_eligible(&self) -> bool {
        self.buffer.is_empty() || self.recalled
    }

    fn edited(&mut self) -> Option<InputEvent> {
        self.recalled = false;
        Some(InputEvent::ContentChanged)
    }

    fn prev_char_boundary(&self, pos: usize) -> usize {
        self.buffer[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self, pos: usize) -> usize {
        self.buffer[pos..]
            .chars()
            .next()
            .map(|c| pos + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// (row, col) of the cursor in display cells.
    fn cursor_rowcol(&self) -> (u16, u16) {
        let before = &self.buffer[..self.cursor];
        let row = before.matches('\n').count() as u16;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before[line_start..].width() as u16;
        (row, col)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.history_pos {
            Some((pos, total)) => format!("Input (history {}/{})", pos + 1, total),
            None => String::from("Input"),
        };

        let style = if self.disabled {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(style)
            .title(title);

        let input = Paragraph::new(self.buffer.as_str()).block(block).style(style);
        frame.render_widget(input, area);

        if !self.disabled {
            let (row, col) = self.cursor_rowcol();
            let x = (area.x + 1 + col).min(area.x + area.width.saturating_sub(2));
            let y = (area.y + 1 + row).min(area.y + area.height.saturating_sub(2));
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.edited()
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                self.edited()
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_char_boundary(self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    self.edited()
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_char_boundary(self.cursor);
                    self.buffer.drain(self.cursor..next);
                    self.edited()
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = self.prev_char_boundary(self.cursor);
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.next_char_boundary(self.cursor);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            TuiEvent::CursorUp => self.history_eligible().then_some(InputEvent::HistoryOlder),
            TuiEvent::CursorDown => self.history_eligible().then_some(InputEvent::HistoryNewer),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    None
                } else {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor = 0;
                    self.recalled = false;
                    Some(InputEvent::Submit(text))
                }
            }
            TuiEvent::Escape => {
                self.buffer.clear();
                self.cursor = 0;
                self.recalled = false;
                Some(InputEvent::Cleared)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_input_box_new() {
        let input = InputBox::new();
        assert!(input.buffer.is_empty());
        assert!(!input.disabled);
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = InputBox::new();

        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('a')),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::InputChar('é'));
        input.handle_event(&TuiEvent::InputChar('x'));
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "x");
    }

    #[test]
    fn test_submit_takes_buffer() {
        let mut input = InputBox::new();
        input.buffer = "hello".to_string();

        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "hello"),
            other => panic!("Expected Submit event, got {:?}", other),
        }
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_submit_rejects_whitespace_draft() {
        let mut input = InputBox::new();
        input.buffer = "   ".to_string();
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_history_on_empty_draft() {
        let mut input = InputBox::new();
        assert_eq!(
            input.handle_event(&TuiEvent::CursorUp),
            Some(InputEvent::HistoryOlder)
        );
        assert_eq!(
            input.handle_event(&TuiEvent::CursorDown),
            Some(InputEvent::HistoryNewer)
        );
    }

    #[test]
    fn test_history_continues_on_unedited_recall() {
        let mut input = InputBox::new();
        input.set_recalled("previous message".to_string());
        assert_eq!(
            input.handle_event(&TuiEvent::CursorUp),
            Some(InputEvent::HistoryOlder)
        );
    }

    #[test]
    fn test_history_blocked_after_edit() {
        let mut input = InputBox::new();
        input.set_recalled("previous".to_string());
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.handle_event(&TuiEvent::CursorUp), None);
    }

    #[test]
    fn test_escape_clears_draft() {
        let mut input = InputBox::new();
        input.set_recalled("recalled".to_string());
        assert_eq!(
            input.handle_event(&TuiEvent::Escape),
            Some(InputEvent::Cleared)
        );
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_calculate_height_follows_newlines() {
        let mut input = InputBox::new();
        assert_eq!(input.calculate_height(), 3);
        input.buffer = "a\nb\nc".to_string();
        assert_eq!(input.calculate_height(), 5);
        input.buffer = "\n".repeat(20);
        assert_eq!(input.calculate_height(), MAX_VISIBLE_LINES + 2);
    }

    #[test]
    fn test_render_shows_history_position() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut input = InputBox::new();
        input.history_pos = Some((1, 5));

        terminal
            .draw(|f| {
                input.render(f, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("history 2/5"));
    }
}
