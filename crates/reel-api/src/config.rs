//! Mock backend configuration

use std::ops::Range;
use std::time::Duration;

/// Constants driving the mock backends.
///
/// The defaults reproduce the canonical mock platform: one accepted
/// credential pair, one issued token, a geo-blocked campaign prefix, and a
/// ~30% music validation failure rate.
#[derive(Debug, Clone)]
pub struct MockApiConfig {
    /// The only client id `authorize` accepts
    pub client_id: String,
    /// The only client secret `authorize` accepts
    pub client_secret: String,
    /// Token issued on successful authorization, and the only token the ads
    /// service accepts
    pub access_token: String,
    /// Recorded validity window for issued tokens
    pub token_ttl: Duration,
    /// Campaign names starting with this keyword (case-insensitive) are
    /// geo-blocked
    pub geo_blocked_keyword: String,
    /// Required prefix for every music id
    pub music_prefix: String,
    /// Probability that a well-formed music id fails validation
    pub music_failure_rate: f64,
    /// Numeric suffix range for uploaded music ids
    pub upload_id_range: Range<u32>,
}

impl Default for MockApiConfig {
    fn default() -> Self {
        Self {
            client_id: "valid_client_id".to_string(),
            client_secret: "valid_client_secret".to_string(),
            access_token: "mock_access_token".to_string(),
            token_ttl: Duration::from_secs(60),
            geo_blocked_keyword: "india".to_string(),
            music_prefix: "music_".to_string(),
            music_failure_rate: 0.3,
            upload_id_range: 1000..10000,
        }
    }
}
