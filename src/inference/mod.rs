//! # Inference
//!
//! The text-generation seam: a [`TextProvider`] trait the core talks to,
//! and the concrete Gemini client behind it.

mod provider;
mod providers;

pub use provider::{ProviderError, TextProvider};
pub use providers::GeminiProvider;
