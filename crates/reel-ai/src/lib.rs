//! reel-ai: text-generation adapter for the reel agent
//!
//! This crate provides the single capability the conversation engine needs
//! from a language model: prompt text in, response text out. The live
//! implementation talks to Google Gemini; an offline rule-based generator
//! covers tests and keyless demo runs.

pub mod error;
pub mod generate;
pub mod offline;
pub mod providers;

pub use error::{Error, Result};
pub use generate::TextGenerator;
pub use offline::OfflineGenerator;
pub use providers::google::GoogleProvider;
