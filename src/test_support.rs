//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::inference::{ProviderError, TextProvider};

/// A provider that always answers with the same canned text.
pub struct StaticProvider(pub &'static str);

#[async_trait]
impl TextProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Ok(self.0.to_string())
    }
}

/// Creates a test App backed by a [`StaticProvider`].
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StaticProvider("canned reply")), "test-model".to_string())
}
