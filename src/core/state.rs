//! # Application State
//!
//! Core business state for Banter. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn TextProvider>  // generative-text backend
//! ├── chat: ChatLog                    // conversation turns
//! ├── history: InputHistory            // past inputs + browse cursor
//! ├── user: Option<User>               // signed-in user (None = login gate)
//! ├── theme: Theme                     // light/dark palette
//! ├── model_name: String               // current model
//! ├── status_message: String           // status bar text
//! └── is_generating: bool              // a send is in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::auth::User;
use crate::core::chat::ChatLog;
use crate::core::config::ResolvedConfig;
use crate::core::history::InputHistory;
use crate::inference::TextProvider;

/// Color palette selector. Held here (not in the TUI) so it rides through
/// the same action pipeline as everything else instead of living in a
/// process-wide global.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

pub struct App {
    pub provider: Arc<dyn TextProvider>,
    pub chat: ChatLog,
    pub history: InputHistory,
    /// None while the login form is showing.
    pub user: Option<User>,
    pub theme: Theme,
    pub model_name: String,
    pub status_message: String,
    pub is_generating: bool,
}

impl App {
    pub fn new(provider: Arc<dyn TextProvider>, model_name: String) -> Self {
        Self {
            provider,
            chat: ChatLog::new(),
            history: InputHistory::new(),
            user: None,
            theme: Theme::default(),
            model_name,
            status_message: String::from("Welcome to Banter!"),
            is_generating: false,
        }
    }

    pub fn from_config(provider: Arc<dyn TextProvider>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(provider, config.model_name.clone());
        app.theme = config.theme;
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Banter!");
        assert!(!app.is_generating);
        assert!(app.user.is_none());
        assert!(app.chat.is_empty());
        assert!(app.history.is_empty());
        assert_eq!(app.model_name, "test-model");
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
    }
}
