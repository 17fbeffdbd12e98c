//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Lay out message cells by predicted height (no render-then-measure)
//! - Stick to the bottom while new content arrives, detach on manual scroll
//! - Show the empty-conversation placeholder before the first message
//!
//! `MessageList` is a transient component (created each frame) wrapping
//! `&mut MessageListState` (persistent scroll state) and the message slice
//! (props), aligning with Ratatui's `StatefulWidget` pattern.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::chat::Message;
use crate::core::state::Theme;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageCell;
use crate::tui::event::TuiEvent;
use crate::tui::typing::Typewriter;

/// Scroll state for the message list. Persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content.
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames).
    pub viewport_height: u16,
    /// Total content height from the last layout pass.
    content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            content_height: 0,
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll if a manual scroll has reached the bottom.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

/// EventHandler lives on `MessageListState` rather than `MessageList`:
/// scrolling needs the persistent state, and `MessageList` is recreated
/// each frame with fresh props.
impl EventHandler for MessageListState {
    type Event = (); // scroll is handled internally, nothing bubbles up

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            _ => None,
        }
    }
}

/// Scrollable conversation view. Created fresh each frame.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub typewriter: &'a Typewriter,
    pub spinner_frame: usize,
    pub theme: Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        typewriter: &'a Typewriter,
        spinner_frame: usize,
        theme: Theme,
    ) -> Self {
        Self {
            state,
            messages,
            typewriter,
            spinner_frame,
            theme,
        }
    }

    fn render_empty_state(&self, frame: &mut Frame, area: Rect) {
        let lines = [
            "",
            "Start a conversation",
            "",
            "Ask me anything. Enter sends, Up/Down browse your input history.",
        ];
        let center = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(lines.len() as u16) / 2,
            width: area.width,
            height: (lines.len() as u16).min(area.height),
        };
        let paragraph = Paragraph::new(lines.join("\n"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
        frame.render_widget(paragraph, center);
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.messages.is_empty() {
            self.render_empty_state(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Layout: predicted height per message + prefix offsets
        let heights: Vec<u16> = self
            .messages
            .iter()
            .map(|m| MessageCell::calculate_height(m, content_width))
            .collect();
        let total_height: u16 = heights.iter().sum();

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;

        // 2. Scroll bookkeeping
        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        } else {
            self.state.clamp_scroll();
        }

        // 3. Render every cell into the scroll view canvas
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, height) in self.messages.iter().zip(&heights) {
            let cell_area = Rect {
                x: 0,
                y: y_offset,
                width: content_width,
                height: *height,
            };
            let cell = MessageCell::new(
                message,
                self.typewriter.visible_chars(message.id),
                self.spinner_frame,
                self.theme,
            );
            scroll_view.render_widget(cell, cell_area);
            y_offset = y_offset.saturating_add(*height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::ChatLog;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn draw(log: &ChatLog, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = MessageListState::new();
        let typewriter = Typewriter::new();

        terminal
            .draw(|f| {
                let mut list =
                    MessageList::new(&mut state, log.messages(), &typewriter, 0, Theme::Dark);
                list.render(f, f.area());
            })
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_empty_state_placeholder() {
        let log = ChatLog::new();
        let text = draw(&log, 80, 12);
        assert!(text.contains("Start a conversation"));
    }

    #[test]
    fn test_renders_messages() {
        let mut log = ChatLog::new();
        log.push_user("Hello there");
        log.push_bot("General greeting");
        let text = draw(&log, 80, 12);
        assert!(text.contains("Hello there"));
        assert!(text.contains("General greeting"));
        assert!(text.contains("you ·"));
        assert!(text.contains("banter ·"));
    }

    #[test]
    fn test_renders_thinking_indicator() {
        let mut log = ChatLog::new();
        log.push_user("Hi");
        log.push_placeholder();
        let text = draw(&log, 80, 12);
        assert!(text.contains("Thinking..."));
    }

    #[test]
    fn test_scroll_up_detaches_from_bottom() {
        let mut state = MessageListState::new();
        state.viewport_height = 10;
        state.content_height = 50;
        state.scroll_state.set_offset(Position { x: 0, y: 40 });

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        assert_eq!(state.scroll_state.offset().y, 39);
    }

    #[test]
    fn test_scroll_down_repins_at_bottom() {
        let mut state = MessageListState::new();
        state.viewport_height = 10;
        state.content_height = 50;
        state.stick_to_bottom = false;
        state.scroll_state.set_offset(Position { x: 0, y: 39 });

        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.scroll_state.offset().y, 40);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_down_mid_content_stays_detached() {
        let mut state = MessageListState::new();
        state.viewport_height = 10;
        state.content_height = 50;
        state.stick_to_bottom = false;
        state.scroll_state.set_offset(Position { x: 0, y: 5 });

        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.scroll_state.offset().y, 6);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_unrelated_event_ignored() {
        let mut state = MessageListState::new();
        let offset = state.scroll_state.offset();
        state.handle_event(&TuiEvent::Submit);
        assert_eq!(state.scroll_state.offset(), offset);
    }
}
