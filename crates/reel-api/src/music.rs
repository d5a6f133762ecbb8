//! Mock music library service

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use crate::{
    config::MockApiConfig,
    error::{ApiError, ErrorKind},
};

/// Music library boundary.
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// Check a music id against the platform library.
    async fn validate_music_id(&self, music_id: &str) -> Result<(), ApiError>;

    /// Upload a custom track and return its generated id. The id still has
    /// to pass [`validate_music_id`](MusicApi::validate_music_id).
    async fn upload_custom_music(&self) -> String;
}

/// The canned reasons a well-formed music id can still be rejected.
const REJECTIONS: [(ErrorKind, u16, &str); 4] = [
    (
        ErrorKind::NotFound,
        404,
        "Music not found in the platform library",
    ),
    (
        ErrorKind::Copyright,
        403,
        "Music copyright restricted in target region",
    ),
    (
        ErrorKind::Policy,
        403,
        "Music removed due to policy violation",
    ),
    (
        ErrorKind::Licensing,
        402,
        "Music requires additional licensing",
    ),
];

/// Mock music service with a seedable random failure branch.
pub struct MockMusic {
    config: Arc<MockApiConfig>,
    rng: Mutex<StdRng>,
}

impl MockMusic {
    pub fn new(config: Arc<MockApiConfig>) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Seeded constructor so tests can force either validation branch.
    pub fn with_seed(config: Arc<MockApiConfig>, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Arc<MockApiConfig>, rng: StdRng) -> Self {
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl MusicApi for MockMusic {
    async fn validate_music_id(&self, music_id: &str) -> Result<(), ApiError> {
        if !music_id.starts_with(&self.config.music_prefix) {
            return Err(ApiError::new(
                ErrorKind::Format,
                400,
                format!(
                    "Music ID must start with '{}'. Example: {}1234",
                    self.config.music_prefix, self.config.music_prefix
                ),
            ));
        }

        let mut rng = self.rng.lock();
        if rng.random_bool(self.config.music_failure_rate) {
            let (kind, code, message) = REJECTIONS[rng.random_range(0..REJECTIONS.len())];
            tracing::debug!(%music_id, %message, "music validation rejected");
            return Err(ApiError::new(kind, code, message));
        }

        Ok(())
    }

    async fn upload_custom_music(&self) -> String {
        let suffix = self.rng.lock().random_range(self.config.upload_id_range.clone());
        let music_id = format!("{}{}", self.config.music_prefix, suffix);
        tracing::debug!(%music_id, "uploaded custom music");
        music_id
    }
}
