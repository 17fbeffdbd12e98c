//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm; the core
//! never touches a widget, and the widgets never mutate core state; every
//! change goes through `update()` and the returned effects are performed
//! here.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (generation in flight, typing reveal running): draws
//!   every ~80ms for smooth animation.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous
//! redraws.

pub mod component;
pub mod components;
pub mod event;
pub mod typing;
mod ui;

use std::io::stdout;
use std::path::Path;
use std::sync::{Arc, mpsc};
use std::time::Instant;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::auth::{Authenticator, MockAuthenticator, TokenStore};
use crate::core::chat::MessageId;
use crate::core::config::ResolvedConfig;
use crate::core::export;
use crate::core::history::HistoryDirection;
use crate::core::state::App;
use crate::inference::{GeminiProvider, TextProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, LoginEvent, LoginForm, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::typing::Typewriter;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub typewriter: Typewriter,
    /// Login form overlay (None = signed in).
    pub login: Option<LoginForm>,
}

impl TuiState {
    pub fn new(signed_in: bool) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            typewriter: Typewriter::new(),
            login: (!signed_in).then(LoginForm::new),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable the Kitty keyboard protocol unconditionally; terminals that
        // don't support it ignore the escape harmlessly
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the text provider from the resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn TextProvider> {
    Arc::new(GeminiProvider::new(
        config.gemini_api_key.clone().unwrap_or_default(),
        config.model_name.clone(),
        Some(config.gemini_base_url.clone()),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, &config);

    let authenticator = MockAuthenticator;
    let token_store = TokenStore::default_location();

    // A stored token restores the session and skips the login form
    if let Some(store) = &token_store
        && let Some(token) = store.load()
        && let Some(user) = authenticator.restore(&token)
    {
        info!("Restored session for {}", user.email);
        app.user = Some(user);
    }

    let mut tui = TuiState::new(app.user.is_some());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background generation tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        let now = Instant::now();

        // Sync InputBox props with App state
        tui.input_box.disabled = app.is_generating;
        tui.input_box.history_pos = app
            .history
            .cursor()
            .map(|i| (i, app.history.len()));

        // Drive the typing reveal off the latest bot message
        tui.typewriter.sync(
            app.chat
                .latest_bot()
                .map(|m| (m.id, m.content.as_str(), m.is_loading)),
            now,
        );
        if tui.typewriter.advance(now) {
            needs_redraw = true;
        }

        let animating = app.is_generating || tui.typewriter.is_animating();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 8.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Login gate: while the form is up it owns every event
            if let Some(form) = &mut tui.login {
                if let Some(login_event) = form.handle_event(&event) {
                    let result = match &login_event {
                        LoginEvent::Login { email, password } => {
                            authenticator.login(email, password)
                        }
                        LoginEvent::Register { email, password, name } => {
                            authenticator.register(email, password, name)
                        }
                    };
                    match result {
                        Ok(session) => {
                            if let Some(store) = &token_store {
                                store.save(&session.token);
                            }
                            update(&mut app, Action::LoggedIn(session.user));
                            tui.login = None;
                        }
                        Err(e) => form.set_error(e.to_string()),
                    }
                }
                continue;
            }

            // Scroll events always go to the message list
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.message_list.handle_event(&event);
                continue;
            }

            // Global chords
            let chord_action = match event {
                TuiEvent::NewChat => Some(Action::ClearMessages),
                TuiEvent::ClearHistory => Some(Action::ClearHistory),
                TuiEvent::ExportJson => Some(Action::Export(export::ExportFormat::Json)),
                TuiEvent::ExportText => Some(Action::Export(export::ExportFormat::Text)),
                TuiEvent::ToggleTheme => Some(Action::ToggleTheme),
                TuiEvent::Logout => Some(Action::Logout),
                _ => None,
            };
            if let Some(action) = chord_action {
                let effect = update(&mut app, action);
                perform_effect(effect, &mut app, &mut tui, &token_store, &tx, &mut should_quit);
                continue;
            }

            // The input is disabled while a generation is outstanding; the
            // core would reject the submit anyway, but swallowing Enter here
            // keeps the draft from being consumed
            if matches!(event, TuiEvent::Submit) && app.is_generating {
                app.status_message = String::from("Still generating; hang on");
                continue;
            }

            // Everything else belongs to the input box
            if let Some(input_event) = tui.input_box.handle_event(&event) {
                let action = match input_event {
                    InputEvent::Submit(text) => Some(Action::Submit(text)),
                    InputEvent::ContentChanged | InputEvent::Cleared => {
                        // Direct edits end history browsing
                        app.history.cursor().is_some().then_some(Action::ResetHistoryCursor)
                    }
                    InputEvent::HistoryOlder => {
                        Some(Action::NavigateHistory(HistoryDirection::Older))
                    }
                    InputEvent::HistoryNewer => {
                        Some(Action::NavigateHistory(HistoryDirection::Newer))
                    }
                };
                if let Some(action) = action {
                    let effect = update(&mut app, action);
                    perform_effect(effect, &mut app, &mut tui, &token_store, &tx, &mut should_quit);
                }
            }
        }

        // Handle background task actions (generation outcomes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            perform_effect(effect, &mut app, &mut tui, &token_store, &tx, &mut should_quit);
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Perform the side effect the reducer asked for.
fn perform_effect(
    effect: Effect,
    app: &mut App,
    tui: &mut TuiState,
    token_store: &Option<TokenStore>,
    tx: &mpsc::Sender<Action>,
    should_quit: &mut bool,
) {
    match effect {
        Effect::None => {}
        Effect::SpawnGeneration { prompt, placeholder } => {
            spawn_generation(app.provider.clone(), prompt, placeholder, tx.clone());
        }
        Effect::FillInput(text) => {
            tui.input_box.set_recalled(text);
        }
        Effect::Export(format) => {
            match export::write_export(app.chat.messages(), format, Path::new(".")) {
                Ok(path) => {
                    app.status_message = format!("Exported to {}", path.display());
                }
                Err(e) => {
                    warn!("Export failed: {e}");
                    app.status_message = format!("Export failed: {e}");
                }
            }
        }
        Effect::ClearToken => {
            if let Some(store) = token_store {
                store.clear();
            }
            tui.login = Some(LoginForm::new());
            tui.input_box = InputBox::new();
            tui.message_list = MessageListState::new();
        }
        Effect::Quit => {
            *should_quit = true;
        }
    }
}

/// Run the generation call on a background task; exactly one terminal action
/// comes back over the channel. There is no abort path; the call either
/// resolves or rejects on its own.
fn spawn_generation(
    provider: Arc<dyn TextProvider>,
    prompt: String,
    placeholder: MessageId,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning generation request ({} chars)", prompt.len());
    tokio::spawn(async move {
        let action = match provider.generate(&prompt).await {
            Ok(text) => Action::GenerationSucceeded {
                id: placeholder,
                text,
            },
            Err(e) => Action::GenerationFailed {
                id: placeholder,
                error: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send generation outcome: receiver dropped");
        }
    });
}
