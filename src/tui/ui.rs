//! Frame layout: title bar on top, conversation in the middle, input editor
//! and a key-hint line at the bottom. While no user is signed in the login
//! form replaces the conversation area.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

const KEY_HINTS: &str = " Enter send · ↑↓ history · ^E/^T export · ^N new chat · ^X clear history · ^D theme · ^O sign out · ^C quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    if let Some(login) = &mut tui.login {
        let layout = Layout::vertical([Length(1), Min(0)]);
        let [title_area, main_area] = layout.areas(frame.area());
        TitleBar::new(app).render(frame, title_area);
        login.render(frame, main_area);
        return;
    }

    let input_height = tui.input_box.calculate_height();
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height), Length(1)]);
    let [title_area, main_area, input_area, hint_area] = layout.areas(frame.area());

    TitleBar::new(app).render(frame, title_area);

    MessageList::new(
        &mut tui.message_list,
        app.chat.messages(),
        &tui.typewriter,
        spinner_frame,
        app.theme,
    )
    .render(frame, main_area);

    tui.input_box.render(frame, input_area);

    draw_hints(frame, hint_area);
}

fn draw_hints(frame: &mut Frame, area: Rect) {
    let hints = Paragraph::new(KEY_HINTS)
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM));
    frame.render_widget(hints, area);
}
