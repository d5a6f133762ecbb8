//! Mock OAuth service

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    config::MockApiConfig,
    error::{ApiError, ErrorKind},
};

/// Token issuance boundary.
#[async_trait]
pub trait OauthApi: Send + Sync {
    /// Exchange client credentials for an access token.
    async fn authorize(&self, client_id: &str, client_secret: &str) -> Result<String, ApiError>;
}

/// Mock OAuth service accepting exactly one credential pair.
pub struct MockOauth {
    config: Arc<MockApiConfig>,
    /// Expiry of the last issued token, if any
    issued_until: Mutex<Option<Instant>>,
}

impl MockOauth {
    pub fn new(config: Arc<MockApiConfig>) -> Self {
        Self {
            config,
            issued_until: Mutex::new(None),
        }
    }

    /// Report on the last issued token's recorded validity window.
    ///
    /// Bookkeeping only: submission re-authorizes every time and never
    /// consults this.
    pub fn token_status(&self) -> Result<(), ApiError> {
        let Some(expires_at) = *self.issued_until.lock() else {
            return Err(ApiError::new(
                ErrorKind::Auth,
                401,
                "No access token found.",
            ));
        };
        if Instant::now() > expires_at {
            return Err(ApiError::new(ErrorKind::Auth, 401, "Access token expired."));
        }
        Ok(())
    }
}

#[async_trait]
impl OauthApi for MockOauth {
    async fn authorize(&self, client_id: &str, client_secret: &str) -> Result<String, ApiError> {
        if client_id != self.config.client_id || client_secret != self.config.client_secret {
            tracing::debug!(%client_id, "authorization rejected");
            return Err(ApiError::new(
                ErrorKind::Auth,
                401,
                "Invalid client ID or client secret.",
            ));
        }

        *self.issued_until.lock() = Some(Instant::now() + self.config.token_ttl);
        tracing::debug!("access token issued");
        Ok(self.config.access_token.clone())
    }
}
