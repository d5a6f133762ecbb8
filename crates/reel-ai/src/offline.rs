//! Deterministic rule-based generator for keyless runs and tests.
//!
//! The conversation engine only ever asks a model to do two things:
//! normalize a quoted user message into a field value, or restate a backend
//! error in plain language. Both are simple enough that keyword rules give
//! usable answers, which keeps `--offline` mode and the test suite free of
//! network calls.

use async_trait::async_trait;

use crate::{error::Result, generate::TextGenerator};

/// Rule-based stand-in for a live model.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGenerator;

impl OfflineGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Pull the first double-quoted span out of a prompt.
    fn quoted(prompt: &str) -> Option<&str> {
        let start = prompt.find('"')? + 1;
        let end = prompt[start..].find('"')? + start;
        Some(&prompt[start..end])
    }

    fn normalize_objective(text: &str) -> String {
        let lower = text.to_lowercase();
        if ["convers", "sale", "purchase", "buy", "order"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            return "Conversions".to_string();
        }
        if ["traffic", "click", "visit", "view"]
            .iter()
            .any(|kw| lower.contains(kw))
        {
            return "Traffic".to_string();
        }
        text.trim().to_string()
    }

    fn respond(prompt: &str) -> String {
        // Objective normalization mentions both literal options
        if prompt.contains("'Traffic' or 'Conversions'") {
            return Self::quoted(prompt)
                .map(Self::normalize_objective)
                .unwrap_or_default();
        }

        // Ads error explanations carry Code/Message lines
        if prompt.contains("Code:") && prompt.contains("Message:") {
            let message = prompt
                .lines()
                .find_map(|l| l.strip_prefix("Message: "))
                .unwrap_or("an unknown error");
            return format!("The ads platform rejected the submission: {}", message);
        }

        // Other error explanations quote the raw error string
        if prompt.contains("error") {
            if let Some(err) = Self::quoted(prompt) {
                return format!("That didn't work: {}", err);
            }
        }

        // Field extraction: echo the quoted user text
        Self::quoted(prompt)
            .map(|q| q.trim().to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(Self::respond(prompt))
    }
}
