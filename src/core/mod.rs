//! # Core Application Logic
//!
//! This module contains Banter's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Inference  │      │  Export /  │
//!     │  Adapter   │      │ (Gemini)   │      │  Auth I/O  │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum — everything that can happen in the app
//! - [`chat`]: The conversation log and its placeholder lifecycle
//! - [`history`]: The bounded input-history ring
//! - [`export`]: Transcript rendering (JSON / plain text)
//! - [`auth`]: Mock authentication and the persisted token
//! - [`config`]: TOML config with layered overrides

pub mod action;
pub mod auth;
pub mod chat;
pub mod config;
pub mod export;
pub mod history;
pub mod state;
