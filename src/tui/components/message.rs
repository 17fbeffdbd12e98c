use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use chrono::{DateTime, Local};

use crate::core::chat::{Message as ChatMessage, Sender};
use crate::core::state::Theme;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Spinner frames for the in-flight placeholder.
const SPINNER_FRAMES: [&str; 4] = ["⠋", "⠙", "⠸", "⠴"];

/// A stateless component that renders a single chat message.
///
/// `MessageCell` is a transient component: created fresh each frame with the
/// data it needs. The reveal limit comes from the parent's `Typewriter`; a
/// loading message ignores it and shows the thinking indicator instead.
#[derive(Clone, Copy)]
pub struct MessageCell<'a> {
    pub message: &'a ChatMessage,
    /// `Some(n)` limits the displayed content to the first `n` characters
    /// (mid-reveal); `None` displays everything.
    pub revealed: Option<usize>,
    /// Current spinner frame index for the loading indicator.
    pub spinner_frame: usize,
    pub theme: Theme,
}

impl<'a> MessageCell<'a> {
    pub fn new(
        message: &'a ChatMessage,
        revealed: Option<usize>,
        spinner_frame: usize,
        theme: Theme,
    ) -> Self {
        Self {
            message,
            revealed,
            spinner_frame,
            theme,
        }
    }

    /// Predict the rendered height for this message at `width` without
    /// rendering it, so the parent list can lay out scroll positions.
    /// The wrapping options must match Ratatui's `Paragraph` default for a
    /// 1:1 mapping between calculated and actual height.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row
            return 1;
        }

        if message.is_loading {
            // Spinner + "Thinking..." is always a single line
            return 1 + VERTICAL_OVERHEAD;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn sender_style(&self) -> Style {
        match (self.message.sender, self.theme) {
            (Sender::User, Theme::Dark) => Style::default().fg(Color::Green),
            (Sender::User, Theme::Light) => Style::default().fg(Color::Rgb(0, 110, 0)),
            (Sender::Bot, Theme::Dark) => Style::default().fg(Color::Blue),
            (Sender::Bot, Theme::Light) => Style::default().fg(Color::Rgb(0, 60, 160)),
        }
    }

    fn title(&self) -> String {
        let local: DateTime<Local> = self.message.timestamp.into();
        let role = match self.message.sender {
            Sender::User => "you",
            Sender::Bot => "banter",
        };
        format!("{} · {}", role, local.format("%H:%M"))
    }

    /// The content string to display, honoring the reveal limit.
    fn display_content(&self) -> String {
        let content = self.message.content.trim();
        match self.revealed {
            Some(n) => content.chars().take(n).collect(),
            None => content.to_string(),
        }
    }
}

impl<'a> Widget for MessageCell<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.sender_style();
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.title())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        if self.message.is_loading {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let indicator = Paragraph::new(format!("{spinner} Thinking..."))
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            indicator.render(inner_area, buf);
            return;
        }

        let paragraph = Paragraph::new(self.display_content())
            .style(style)
            .wrap(Wrap { trim: true });
        paragraph.render(inner_area, buf);
    }
}

/// `MessageCell` is stateless, so the `&mut self` required by the trait is a
/// no-op; rendering is delegated to the [`Widget`] implementation.
impl<'a> Component for MessageCell<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
