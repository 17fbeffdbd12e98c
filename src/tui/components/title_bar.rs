//! Single-line header: app name, signed-in user, model, and the status text
//! from the core (which doubles as the generating indicator).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::component::Component;

pub struct TitleBar<'a> {
    pub app: &'a App,
}

impl<'a> TitleBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let accent = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);

        let mut spans = vec![
            Span::styled(" banter ", accent),
            Span::styled(self.app.model_name.clone(), dim),
        ];
        if let Some(user) = &self.app.user {
            spans.push(Span::styled(" │ ", dim));
            spans.push(Span::styled(user.name.clone(), Style::default().fg(Color::Gray)));
        }
        spans.push(Span::styled(" │ ", dim));
        let status_style = if self.app.is_generating {
            Style::default().fg(Color::Yellow)
        } else {
            dim
        };
        spans.push(Span::styled(self.app.status_message.clone(), status_style));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
