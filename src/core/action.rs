//! # Actions
//!
//! Everything that can happen in Banter becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! Generation finishes? That's `Action::GenerationSucceeded`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the side effect (if any) the caller must perform.
//! I/O never happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: drive a whole conversation through
//! `update()` and assert on the resulting `App`.

use log::{debug, warn};

use crate::core::auth::User;
use crate::core::chat::MessageId;
use crate::core::export::ExportFormat;
use crate::core::history::HistoryDirection;
use crate::core::state::App;

/// Fixed reply substituted for a discarded placeholder when generation fails.
pub const GENERATION_ERROR_REPLY: &str =
    "Sorry, I encountered an error. Please ensure your API key is correct and try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted the input buffer.
    Submit(String),
    /// Background generation task finished with a response.
    GenerationSucceeded { id: MessageId, text: String },
    /// Background generation task failed.
    GenerationFailed { id: MessageId, error: String },
    /// Browse the input history (Up/Down from an empty or recalled draft).
    NavigateHistory(HistoryDirection),
    /// User edited the draft directly; back to the live draft.
    ResetHistoryCursor,
    /// "New chat": drop the conversation, keep the input history.
    ClearMessages,
    /// Drop the input history, keep the conversation.
    ClearHistory,
    Export(ExportFormat),
    ToggleTheme,
    LoggedIn(User),
    Logout,
    Quit,
}

/// Side effects `update()` asks the caller to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Spawn the generation call for `prompt`; report back against
    /// `placeholder`.
    SpawnGeneration { prompt: String, placeholder: MessageId },
    /// Install recalled history text into the input box.
    FillInput(String),
    /// Write the transcript to disk.
    Export(ExportFormat),
    /// Remove the persisted auth token.
    ClearToken,
    Quit,
}

/// The single mutation point for [`App`].
pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit(app, text),

        Action::GenerationSucceeded { id, text } => {
            debug!("Generation succeeded ({} chars)", text.len());
            app.chat.resolve(id, text);
            app.is_generating = false;
            app.status_message = String::from("Ready");
            Effect::None
        }

        Action::GenerationFailed { id, error } => {
            warn!("Generation failed: {error}");
            // Only substitute the apology if the placeholder is still there;
            // a completion racing a "new chat" must not pollute the fresh log.
            let placeholder_present = app.chat.placeholder_id() == Some(id);
            app.chat.discard(id);
            if placeholder_present {
                app.chat.push_bot(GENERATION_ERROR_REPLY);
            }
            app.is_generating = false;
            app.status_message = String::from("Generation failed");
            Effect::None
        }

        Action::NavigateHistory(direction) => {
            let text = app.history.navigate(direction);
            Effect::FillInput(text)
        }

        Action::ResetHistoryCursor => {
            app.history.reset_cursor();
            Effect::None
        }

        Action::ClearMessages => {
            app.chat.clear();
            app.status_message = String::from("New chat");
            Effect::None
        }

        Action::ClearHistory => {
            app.history.clear();
            app.status_message = String::from("Input history cleared");
            Effect::None
        }

        Action::Export(format) => {
            if app.chat.is_empty() {
                app.status_message = String::from("Nothing to export");
                Effect::None
            } else {
                Effect::Export(format)
            }
        }

        Action::ToggleTheme => {
            app.theme = app.theme.toggle();
            app.status_message = format!("Theme: {}", app.theme.label());
            Effect::None
        }

        Action::LoggedIn(user) => {
            app.status_message = format!("Signed in as {}", user.name);
            app.user = Some(user);
            Effect::None
        }

        Action::Logout => {
            app.user = None;
            app.chat.clear();
            app.history.clear();
            app.is_generating = false;
            app.status_message = String::from("Signed out");
            Effect::ClearToken
        }

        Action::Quit => Effect::Quit,
    }
}

/// The send protocol: Idle → Sending → (Success | Failure) → Idle.
fn submit(app: &mut App, text: String) -> Effect {
    if text.trim().is_empty() {
        return Effect::None;
    }
    // Sending is an explicit state: an overlapping submit is rejected here,
    // not just suppressed by the input box being disabled.
    if app.is_generating {
        debug!("Submit rejected: generation already in flight");
        app.status_message = String::from("Still generating; hang on");
        return Effect::None;
    }

    app.chat.push_user(text.clone());
    app.history.record(&text);
    app.history.reset_cursor();
    let placeholder = app.chat.push_placeholder();
    app.is_generating = true;
    app.status_message = String::from("Generating...");

    Effect::SpawnGeneration {
        prompt: text,
        placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::Sender;
    use crate::core::history::HistoryDirection::{Newer, Older};
    use crate::test_support::test_app;

    /// Run a submit and return the placeholder id from the effect.
    fn submit_ok(app: &mut App, text: &str) -> MessageId {
        match update(app, Action::Submit(text.to_string())) {
            Effect::SpawnGeneration { placeholder, .. } => placeholder,
            other => panic!("Expected SpawnGeneration, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_appends_user_and_placeholder() {
        let mut app = test_app();
        let placeholder = submit_ok(&mut app, "Hello");

        assert_eq!(app.chat.len(), 2);
        assert_eq!(app.chat.messages()[0].sender, Sender::User);
        assert_eq!(app.chat.messages()[0].content, "Hello");
        assert!(app.chat.messages()[1].is_loading);
        assert_eq!(app.chat.messages()[1].id, placeholder);
        assert!(app.is_generating);
        assert_eq!(app.history.entries(), ["Hello"]);
        assert_eq!(app.history.cursor(), None);
    }

    #[test]
    fn test_submit_rejects_whitespace() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("   \n ".to_string()));
        assert_eq!(effect, Effect::None);
        assert!(app.chat.is_empty());
        assert!(!app.is_generating);
    }

    #[test]
    fn test_submit_rejected_while_generating() {
        let mut app = test_app();
        submit_ok(&mut app, "first");
        let effect = update(&mut app, Action::Submit("second".to_string()));
        assert_eq!(effect, Effect::None);
        // Nothing appended, still exactly one placeholder
        assert_eq!(app.chat.len(), 2);
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_submit_resets_history_cursor() {
        let mut app = test_app();
        app.history.record("older entry");
        update(&mut app, Action::NavigateHistory(Older));
        assert_eq!(app.history.cursor(), Some(0));
        submit_ok(&mut app, "fresh message");
        assert_eq!(app.history.cursor(), None);
    }

    #[test]
    fn test_successful_generation_resolves_placeholder() {
        let mut app = test_app();
        let id = submit_ok(&mut app, "Hello");
        update(
            &mut app,
            Action::GenerationSucceeded {
                id,
                text: "Hi there".to_string(),
            },
        );

        assert_eq!(app.chat.len(), 2);
        let bot = &app.chat.messages()[1];
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.content, "Hi there");
        assert!(!bot.is_loading);
        assert!(!app.is_generating);
    }

    #[test]
    fn test_failed_generation_substitutes_error_reply() {
        let mut app = test_app();
        let id = submit_ok(&mut app, "Hello");
        update(
            &mut app,
            Action::GenerationFailed {
                id,
                error: "boom".to_string(),
            },
        );

        // Placeholder gone, apology in its place
        assert_eq!(app.chat.len(), 2);
        let bot = &app.chat.messages()[1];
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.content, GENERATION_ERROR_REPLY);
        assert!(!bot.is_loading);
        assert!(!app.is_generating);
        assert_eq!(app.chat.placeholder_id(), None);
    }

    #[test]
    fn test_stale_failure_after_clear_appends_nothing() {
        let mut app = test_app();
        let id = submit_ok(&mut app, "Hello");
        update(&mut app, Action::ClearMessages);
        update(
            &mut app,
            Action::GenerationFailed {
                id,
                error: "late".to_string(),
            },
        );
        assert!(app.chat.is_empty());
        assert!(!app.is_generating);
    }

    #[test]
    fn test_navigate_history_fills_input() {
        let mut app = test_app();
        app.history.record("b");
        app.history.record("a");

        assert_eq!(
            update(&mut app, Action::NavigateHistory(Older)),
            Effect::FillInput("a".to_string())
        );
        assert_eq!(
            update(&mut app, Action::NavigateHistory(Older)),
            Effect::FillInput("b".to_string())
        );
        assert_eq!(
            update(&mut app, Action::NavigateHistory(Newer)),
            Effect::FillInput("a".to_string())
        );
    }

    #[test]
    fn test_clear_messages_keeps_history() {
        let mut app = test_app();
        let id = submit_ok(&mut app, "Hello");
        update(&mut app, Action::GenerationSucceeded { id, text: "Hi".into() });
        update(&mut app, Action::ClearMessages);
        assert!(app.chat.is_empty());
        assert_eq!(app.history.entries(), ["Hello"]);
    }

    #[test]
    fn test_clear_history_keeps_messages() {
        let mut app = test_app();
        let id = submit_ok(&mut app, "Hello");
        update(&mut app, Action::GenerationSucceeded { id, text: "Hi".into() });
        update(&mut app, Action::ClearHistory);
        assert_eq!(app.chat.len(), 2);
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_export_requires_messages() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Export(ExportFormat::Json)), Effect::None);
        submit_ok(&mut app, "Hello");
        assert_eq!(
            update(&mut app, Action::Export(ExportFormat::Json)),
            Effect::Export(ExportFormat::Json)
        );
    }

    #[test]
    fn test_logout_clears_session_state() {
        let mut app = test_app();
        app.user = Some(User {
            id: "1".into(),
            email: "jo@example.com".into(),
            name: "jo".into(),
        });
        submit_ok(&mut app, "Hello");

        let effect = update(&mut app, Action::Logout);
        assert_eq!(effect, Effect::ClearToken);
        assert!(app.user.is_none());
        assert!(app.chat.is_empty());
        assert!(app.history.is_empty());
        assert!(!app.is_generating);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
