//! The text-generation seam between the engine and any concrete model.

use async_trait::async_trait;

use crate::error::Result;

/// Marker prefix for degraded adapter output.
///
/// When a provider call fails, [`TextGenerator::generate_or_fallback`]
/// returns the error wrapped in this tag instead of propagating. Callers
/// that validate the output will reject it; callers that display it show
/// the user a visibly-broken string rather than crashing.
pub const FALLBACK_TAG: &str = "[llm error";

/// A single-capability text generator: prompt in, response out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate, degrading any failure into a tagged diagnostic string.
    async fn generate_or_fallback(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("text generation failed: {}", e);
                format!("{}: {}]", FALLBACK_TAG, e)
            }
        }
    }
}
