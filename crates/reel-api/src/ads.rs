//! Mock ads submission service

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use crate::{
    config::MockApiConfig,
    error::{ApiError, ErrorKind},
    types::{AdPayload, AdReceipt, Objective},
};

/// Ad submission boundary.
#[async_trait]
pub trait AdsApi: Send + Sync {
    /// Submit an assembled ad payload under an access token.
    async fn submit_ad(&self, payload: &AdPayload, access_token: &str)
    -> Result<AdReceipt, ApiError>;
}

/// Mock ads service. Checks run in a fixed order: token, permission scope,
/// geo-restriction, music id format.
pub struct MockAds {
    config: Arc<MockApiConfig>,
}

impl MockAds {
    pub fn new(config: Arc<MockApiConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AdsApi for MockAds {
    async fn submit_ad(
        &self,
        payload: &AdPayload,
        access_token: &str,
    ) -> Result<AdReceipt, ApiError> {
        if access_token.is_empty() || access_token != self.config.access_token {
            return Err(ApiError::new(
                ErrorKind::Auth,
                401,
                "Invalid or missing OAuth token. Please re-authenticate.",
            ));
        }

        // The mock app was never granted the conversions scope, so this
        // objective cannot currently succeed.
        if payload.objective == Objective::Conversions {
            return Err(ApiError::new(
                ErrorKind::Permission,
                403,
                "Missing 'ads:create:conversions' permission scope. Please update your app permissions.",
            ));
        }

        if payload
            .campaign_name
            .to_lowercase()
            .starts_with(&self.config.geo_blocked_keyword)
        {
            return Err(ApiError::new(
                ErrorKind::Geo,
                403,
                "Geo-restriction: ads are not available in this region.",
            ));
        }

        if let Some(music_id) = &payload.creative.music_id {
            if !music_id.starts_with(&self.config.music_prefix) {
                return Err(ApiError::new(
                    ErrorKind::Format,
                    400,
                    format!(
                        "Invalid music_id format. Music ID must start with '{}'.",
                        self.config.music_prefix
                    ),
                ));
            }
        }

        tracing::debug!(campaign = %payload.campaign_name, "ad accepted");
        Ok(AdReceipt {
            ad_id: "ad_123456789".to_string(),
            status: "active".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 2, 4, 10, 30, 0).unwrap(),
        })
    }
}
