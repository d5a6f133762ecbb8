//! reel-agent: step-driven conversation engine
//!
//! This crate owns the conversation state machine that walks a user through
//! building an ad campaign: a fixed sequence of steps, each with its own
//! validation and transition rules, plus the submission sequence against
//! the platform backends. The language model is used in exactly two places:
//! normalizing free-text answers into field values, and restating backend
//! errors as friendly prose.

pub mod engine;
pub mod prompts;
pub mod state;
pub mod validate;

pub use engine::{Engine, EngineConfig};
pub use state::{CampaignFields, MusicSelection, SessionState, Step};
