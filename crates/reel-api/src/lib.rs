//! reel-api: mocked advertising-platform backends
//!
//! Deterministic (or seeded-random) stand-ins for the OAuth, music, and ads
//! services of an advertising platform. Every hardcoded behavior lives in
//! [`MockApiConfig`], and every service sits behind an async trait, so a
//! real client can replace a mock without touching the conversation engine.

pub mod ads;
pub mod config;
pub mod error;
pub mod music;
pub mod oauth;
pub mod types;

pub use ads::{AdsApi, MockAds};
pub use config::MockApiConfig;
pub use error::{ApiError, ErrorKind};
pub use music::{MockMusic, MusicApi};
pub use oauth::{MockOauth, OauthApi};
pub use types::{AdPayload, AdReceipt, Creative, Objective};
