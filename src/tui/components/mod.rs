//! Reusable TUI components.
//!
//! Each component follows the props/state split described in
//! [`crate::tui::component`]: persistent state lives in `TuiState`, per-frame
//! props are passed in at construction.

pub mod input_box;
pub mod login;
pub mod message;
pub mod message_list;
pub mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use login::{LoginEvent, LoginForm};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
