//! The step-driven conversation engine.
//!
//! Each user message is routed to the handler for the current step. On a
//! valid answer the owning field is written and the step advances; on a
//! rejected answer the step re-prompts and stays put. Backend failures are
//! restated by the language model and leave the user a retry/back/restart
//! affordance; nothing here is fatal and nothing is retried automatically.

use std::sync::Arc;

use reel_ai::TextGenerator;
use reel_api::{AdPayload, AdsApi, Creative, MusicApi, OauthApi, Objective};

use crate::{
    prompts,
    state::{MusicSelection, SessionState, Step},
    validate,
};

const MUSIC_MENU: &str = "Choose music option:\n\
  1. Existing music ID\n\
  2. Upload custom music\n\
  3. No music";

const RESTART_REPLY: &str = "Starting fresh! What's the campaign name?";

/// Credentials the engine presents when authorizing a submission.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// The conversation engine. One instance per session; collaborators are
/// injected so sessions can share backends while owning their own state.
pub struct Engine {
    config: EngineConfig,
    state: SessionState,
    llm: Arc<dyn TextGenerator>,
    oauth: Arc<dyn OauthApi>,
    music: Arc<dyn MusicApi>,
    ads: Arc<dyn AdsApi>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        llm: Arc<dyn TextGenerator>,
        oauth: Arc<dyn OauthApi>,
        music: Arc<dyn MusicApi>,
        ads: Arc<dyn AdsApi>,
    ) -> Self {
        Self {
            config,
            state: SessionState::new(),
            llm,
            oauth,
            music,
            ads,
        }
    }

    /// The current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The step the next message will be handled by.
    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    /// Route one user message through the current step's handler and
    /// produce the reply to print.
    pub async fn handle_message(&mut self, input: &str) -> String {
        tracing::debug!(step = ?self.state.current_step, "handling message");

        match self.state.current_step {
            Step::CampaignName => self.collect_campaign_name(input).await,
            Step::Objective => self.collect_objective(input).await,
            Step::AdText => self.collect_ad_text(input),
            Step::Cta => self.collect_cta(input),
            Step::MusicChoice => self.choose_music(input).await,
            Step::MusicId => self.collect_music_id(input).await,
            Step::Submit => self.after_failed_submit(input).await,
            Step::Complete => self.after_complete(input),
        }
    }

    // --- Field collection ---

    async fn collect_campaign_name(&mut self, input: &str) -> String {
        let extracted = self.extract(prompts::CAMPAIGN_NAME, input).await;
        if let Err(msg) = validate::campaign_name(&extracted) {
            return msg.to_string();
        }

        tracing::info!(campaign_name = %extracted, "campaign name collected");
        self.state.fields.campaign_name = Some(extracted);
        self.state.current_step = Step::Objective;
        "Campaign name saved. What is the objective? (Traffic / Conversions)".to_string()
    }

    async fn collect_objective(&mut self, input: &str) -> String {
        let extracted = self.extract(prompts::OBJECTIVE, input).await;
        match validate::objective(&extracted) {
            Err(_) => format!(
                "I understood '{}', but objective must be exactly 'Traffic' or 'Conversions'. Please try again.",
                extracted
            ),
            Ok(objective) => {
                tracing::info!(%objective, "objective collected");
                self.state.fields.objective = Some(objective);
                self.state.current_step = Step::AdText;
                "Objective set. Please enter ad text (max 100 characters).".to_string()
            }
        }
    }

    fn collect_ad_text(&mut self, input: &str) -> String {
        if let Err(msg) = validate::ad_text(input) {
            return msg.to_string();
        }

        self.state.fields.ad_text = Some(input.to_string());
        self.state.current_step = Step::Cta;
        "Ad text saved. What is the CTA?".to_string()
    }

    fn collect_cta(&mut self, input: &str) -> String {
        if let Err(msg) = validate::cta(input) {
            return msg.to_string();
        }

        self.state.fields.cta = Some(input.to_string());
        self.state.current_step = Step::MusicChoice;
        MUSIC_MENU.to_string()
    }

    // --- Music branching ---

    async fn choose_music(&mut self, input: &str) -> String {
        match input.trim() {
            "1" => {
                self.state.current_step = Step::MusicId;
                "Please enter the music ID (must start with 'music_', e.g. music_1234).".to_string()
            }
            "2" => self.upload_music().await,
            "3" => {
                // Business rule, independent of backend validation: a
                // conversions campaign must carry music.
                if self.state.fields.objective == Some(Objective::Conversions) {
                    return "Music is required for Conversions campaigns. Please choose option 1 or 2."
                        .to_string();
                }
                self.state.fields.music = Some(MusicSelection::NoMusic);
                self.state.current_step = Step::Submit;
                self.attempt_submission().await
            }
            _ => "Invalid choice. Please select 1, 2, or 3.".to_string(),
        }
    }

    async fn upload_music(&mut self) -> String {
        let music_id = self.music.upload_custom_music().await;
        tracing::info!(%music_id, "simulated music upload");

        // Uploads still go through library validation, so they can fail
        // the same way an existing id can.
        if let Err(err) = self.music.validate_music_id(&music_id).await {
            tracing::debug!(error = %err, "uploaded music rejected");
            let explanation = self
                .llm
                .generate_or_fallback(&prompts::explain_music_error(&err))
                .await;
            return format!(
                "Upload failed.\n\n{}\n\nPlease choose another option (1, 2, or 3).",
                explanation
            );
        }

        self.state.fields.music = Some(MusicSelection::Track(music_id));
        self.state.current_step = Step::Submit;
        self.attempt_submission().await
    }

    async fn collect_music_id(&mut self, input: &str) -> String {
        let input = input.trim();
        if input.eq_ignore_ascii_case("back") {
            self.state.current_step = Step::MusicChoice;
            return format!("Going back to music options.\n\n{}", MUSIC_MENU);
        }

        if let Err(err) = self.music.validate_music_id(input).await {
            tracing::debug!(music_id = %input, error = %err, "music id rejected");
            let explanation = self
                .llm
                .generate_or_fallback(&prompts::explain_music_error(&err))
                .await;
            return format!(
                "Music validation failed.\n\n{}\n\nYou can:\n\
                 - Enter a different music ID (must start with 'music_')\n\
                 - Type 'back' to choose another option",
                explanation
            );
        }

        self.state.fields.music = Some(MusicSelection::Track(input.to_string()));
        self.state.current_step = Step::Submit;
        self.attempt_submission().await
    }

    // --- Submission ---

    async fn after_failed_submit(&mut self, input: &str) -> String {
        match input.trim().to_lowercase().as_str() {
            "retry" => self.attempt_submission().await,
            "restart" => self.restart(),
            _ => "Type 'retry' to attempt submission again, or 'restart' to create a new ad."
                .to_string(),
        }
    }

    /// Run the full submission sequence: authorize, assemble, submit.
    ///
    /// Entered from whichever step completed the fields, and again on
    /// explicit `retry`. The backends are stateless per call, so a failure
    /// needs no compensation; the step stays at `Submit` for the user to
    /// retry or restart.
    async fn attempt_submission(&mut self) -> String {
        tracing::info!("attempting submission");

        let token = match self
            .oauth
            .authorize(&self.config.client_id, &self.config.client_secret)
            .await
        {
            Ok(token) => token,
            Err(err) => {
                tracing::debug!(error = %err, "authorization failed");
                let explanation = self
                    .llm
                    .generate_or_fallback(&prompts::explain_oauth_error(&err))
                    .await;
                return format!(
                    "Authorization failed.\n\n{}\n\n(Type 'retry' to try again, or 'restart' for a new ad)",
                    explanation
                );
            }
        };
        self.state.oauth_token = Some(token.clone());

        let Some(payload) = self.build_payload() else {
            // Unreachable through the state machine; guard anyway rather
            // than panic inside a session.
            tracing::warn!("submission reached with missing fields");
            return "The collected answers are incomplete. Type 'restart' to start over."
                .to_string();
        };
        tracing::debug!(
            payload = %serde_json::to_string(&payload).unwrap_or_default(),
            "submitting ad"
        );

        match self.ads.submit_ad(&payload, &token).await {
            Err(err) => {
                tracing::debug!(code = err.code, error = %err, "submission rejected");
                let explanation = self
                    .llm
                    .generate_or_fallback(&prompts::explain_ads_error(&err))
                    .await;
                format!(
                    "Submission failed.\n\n{}\n\n(Type 'retry' to try again, or 'restart' for a new ad)",
                    explanation
                )
            }
            Ok(receipt) => {
                tracing::info!(ad_id = %receipt.ad_id, status = %receipt.status, "ad created");
                self.state.current_step = Step::Complete;
                let reply = format!(
                    "Success! Your ad has been created.\n\nAd ID: {}\nStatus: {}\n\n\
                     (Type 'restart' to create another ad, or 'exit' to quit)",
                    receipt.ad_id, receipt.status
                );
                self.state.receipt = Some(receipt);
                reply
            }
        }
    }

    fn build_payload(&self) -> Option<AdPayload> {
        let fields = &self.state.fields;
        let music = fields.music.as_ref()?;
        Some(AdPayload {
            campaign_name: fields.campaign_name.clone()?,
            objective: fields.objective?,
            creative: Creative {
                text: fields.ad_text.clone()?,
                cta: fields.cta.clone()?,
                music_id: music.track_id().map(String::from),
            },
        })
    }

    // --- Terminal state ---

    fn after_complete(&mut self, input: &str) -> String {
        match input.trim().to_lowercase().as_str() {
            "restart" | "start over" | "new" => self.restart(),
            _ => "Conversation complete. Type 'restart' to create a new ad, or 'exit' to quit."
                .to_string(),
        }
    }

    fn restart(&mut self) -> String {
        tracing::info!("session restarted");
        self.state = SessionState::new();
        RESTART_REPLY.to_string()
    }

    // --- LLM extraction ---

    /// Send the user's raw message plus a field instruction to the model
    /// and hand back its reply, trimmed. The result is untrusted: callers
    /// validate it, and a rejection re-prompts the human rather than
    /// re-running extraction.
    async fn extract(&self, instruction: &str, input: &str) -> String {
        let prompt = prompts::extract(instruction, input);
        self.llm
            .generate_or_fallback(&prompt)
            .await
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_ai::OfflineGenerator;
    use reel_api::{MockAds, MockApiConfig, MockMusic, MockOauth};

    /// Engine wired to the mocks, with the music failure branch disabled
    /// unless a test opts in.
    fn engine() -> Engine {
        engine_with_music_failure_rate(0.0)
    }

    fn engine_with_music_failure_rate(rate: f64) -> Engine {
        let api = Arc::new(MockApiConfig {
            music_failure_rate: rate,
            ..MockApiConfig::default()
        });
        let config = EngineConfig {
            client_id: api.client_id.clone(),
            client_secret: api.client_secret.clone(),
        };
        Engine::new(
            config,
            Arc::new(OfflineGenerator::new()),
            Arc::new(MockOauth::new(Arc::clone(&api))),
            Arc::new(MockMusic::with_seed(Arc::clone(&api), 1)),
            Arc::new(MockAds::new(api)),
        )
    }

    /// Engine whose configured credentials the mock OAuth service rejects.
    fn engine_with_bad_credentials() -> Engine {
        let api = Arc::new(MockApiConfig::default());
        let config = EngineConfig {
            client_id: "stale_client_id".to_string(),
            client_secret: api.client_secret.clone(),
        };
        Engine::new(
            config,
            Arc::new(OfflineGenerator::new()),
            Arc::new(MockOauth::new(Arc::clone(&api))),
            Arc::new(MockMusic::with_seed(Arc::clone(&api), 1)),
            Arc::new(MockAds::new(api)),
        )
    }

    async fn walk(engine: &mut Engine, inputs: &[&str]) -> String {
        let mut last = String::new();
        for input in inputs {
            last = engine.handle_message(input).await;
        }
        last
    }

    #[tokio::test]
    async fn test_traffic_no_music_reaches_complete() {
        let mut engine = engine();
        let reply = walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "3"],
        )
        .await;

        assert_eq!(engine.current_step(), Step::Complete);
        assert!(reply.contains("ad_123456789"));
        assert!(reply.contains("active"));

        let state = engine.state();
        assert_eq!(state.fields.campaign_name.as_deref(), Some("Summer Sale"));
        assert_eq!(state.fields.objective, Some(Objective::Traffic));
        assert_eq!(state.fields.music, Some(MusicSelection::NoMusic));
        assert_eq!(state.oauth_token.as_deref(), Some("mock_access_token"));
        assert_eq!(
            state.receipt.as_ref().map(|r| r.ad_id.as_str()),
            Some("ad_123456789")
        );
    }

    #[tokio::test]
    async fn test_conversions_blocks_no_music() {
        let mut engine = engine();
        let reply = walk(
            &mut engine,
            &["Summer Sale", "sales", "Get 50% off now", "Shop Now", "3"],
        )
        .await;

        assert_eq!(engine.current_step(), Step::MusicChoice);
        assert!(reply.contains("required for Conversions"));
        assert!(engine.state().fields.music.is_none());
    }

    #[tokio::test]
    async fn test_invalid_campaign_name_never_advances() {
        let mut engine = engine();
        for _ in 0..3 {
            let reply = engine.handle_message("ab").await;
            assert_eq!(engine.current_step(), Step::CampaignName);
            assert_eq!(reply, "Campaign name must be at least 3 characters long.");
        }
    }

    #[tokio::test]
    async fn test_unrecognized_objective_stays_put() {
        let mut engine = engine();
        engine.handle_message("Summer Sale").await;

        let reply = engine.handle_message("bananas").await;
        assert_eq!(engine.current_step(), Step::Objective);
        assert!(reply.contains("I understood 'bananas'"));
        assert!(engine.state().fields.objective.is_none());
    }

    #[tokio::test]
    async fn test_overlong_ad_text_stays_put() {
        let mut engine = engine();
        walk(&mut engine, &["Summer Sale", "clicks"]).await;

        let long = "x".repeat(101);
        let reply = engine.handle_message(&long).await;
        assert_eq!(engine.current_step(), Step::AdText);
        assert_eq!(reply, "Ad text must be 100 characters or fewer.");

        engine.handle_message("Get 50% off now").await;
        assert_eq!(engine.current_step(), Step::Cta);
    }

    #[tokio::test]
    async fn test_blank_cta_stays_put() {
        let mut engine = engine();
        walk(&mut engine, &["Summer Sale", "clicks", "Get 50% off now"]).await;

        let reply = engine.handle_message("   ").await;
        assert_eq!(engine.current_step(), Step::Cta);
        assert_eq!(reply, "CTA is required.");
    }

    #[tokio::test]
    async fn test_invalid_music_choice_stays_put() {
        let mut engine = engine();
        walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now"],
        )
        .await;

        let reply = engine.handle_message("5").await;
        assert_eq!(engine.current_step(), Step::MusicChoice);
        assert_eq!(reply, "Invalid choice. Please select 1, 2, or 3.");
    }

    #[tokio::test]
    async fn test_existing_music_id_path() {
        let mut engine = engine();
        walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "1"],
        )
        .await;
        assert_eq!(engine.current_step(), Step::MusicId);

        let reply = engine.handle_message("music_1234").await;
        assert_eq!(engine.current_step(), Step::Complete);
        assert!(reply.contains("ad_123456789"));
        assert_eq!(
            engine.state().fields.music,
            Some(MusicSelection::Track("music_1234".to_string()))
        );
    }

    #[tokio::test]
    async fn test_back_returns_to_music_menu() {
        let mut engine = engine();
        walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "1"],
        )
        .await;

        let reply = engine.handle_message("BACK").await;
        assert_eq!(engine.current_step(), Step::MusicChoice);
        assert!(reply.contains("Choose music option"));
    }

    #[tokio::test]
    async fn test_malformed_music_id_stays_put() {
        let mut engine = engine();
        walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "1"],
        )
        .await;

        let reply = engine.handle_message("track_99").await;
        assert_eq!(engine.current_step(), Step::MusicId);
        assert!(reply.contains("Music validation failed."));
        assert!(reply.contains("back"));
    }

    #[tokio::test]
    async fn test_upload_path_succeeds_when_validation_passes() {
        let mut engine = engine();
        let reply = walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "2"],
        )
        .await;

        assert_eq!(engine.current_step(), Step::Complete);
        assert!(reply.contains("ad_123456789"));
        match &engine.state().fields.music {
            Some(MusicSelection::Track(id)) => assert!(id.starts_with("music_")),
            other => panic!("expected uploaded track, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_failure_returns_to_menu() {
        let mut engine = engine_with_music_failure_rate(1.0);
        let reply = walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "2"],
        )
        .await;

        assert_eq!(engine.current_step(), Step::MusicChoice);
        assert!(reply.contains("Upload failed."));
        assert!(reply.contains("1, 2, or 3"));
        assert!(engine.state().fields.music.is_none());
    }

    #[tokio::test]
    async fn test_conversions_submission_always_fails_and_retry_stays() {
        let mut engine = engine();
        let reply = walk(
            &mut engine,
            &[
                "Summer Sale",
                "sales",
                "Get 50% off now",
                "Shop Now",
                "1",
                "music_1234",
            ],
        )
        .await;

        // The conversions permission wall: submission reached, never passes.
        assert_eq!(engine.current_step(), Step::Submit);
        assert!(reply.contains("Submission failed."));

        let retry = engine.handle_message("retry").await;
        assert_eq!(engine.current_step(), Step::Submit);
        assert!(retry.contains("Submission failed."));
    }

    #[tokio::test]
    async fn test_geo_blocked_campaign_fails_submission() {
        let mut engine = engine();
        let reply = walk(
            &mut engine,
            &["India Launch", "clicks", "Get 50% off now", "Shop Now", "3"],
        )
        .await;

        assert_eq!(engine.current_step(), Step::Submit);
        assert!(reply.contains("Submission failed."));
    }

    #[tokio::test]
    async fn test_submit_hint_for_other_input() {
        let mut engine = engine();
        walk(
            &mut engine,
            &["India Launch", "clicks", "Get 50% off now", "Shop Now", "3"],
        )
        .await;

        let reply = engine.handle_message("why?").await;
        assert_eq!(engine.current_step(), Step::Submit);
        assert!(reply.contains("'retry'"));
        assert!(reply.contains("'restart'"));
    }

    #[tokio::test]
    async fn test_restart_from_submit_failure() {
        let mut engine = engine();
        walk(
            &mut engine,
            &["India Launch", "clicks", "Get 50% off now", "Shop Now", "3"],
        )
        .await;

        let reply = engine.handle_message("restart").await;
        assert_eq!(reply, RESTART_REPLY);
        assert_eq!(engine.current_step(), Step::CampaignName);
        assert!(engine.state().fields.campaign_name.is_none());
    }

    #[tokio::test]
    async fn test_restart_from_complete_resets_everything() {
        let mut engine = engine();
        walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "3"],
        )
        .await;
        assert_eq!(engine.current_step(), Step::Complete);

        let reply = engine.handle_message("restart").await;
        assert_eq!(reply, RESTART_REPLY);
        assert_eq!(engine.current_step(), Step::CampaignName);

        let state = engine.state();
        assert!(state.fields.campaign_name.is_none());
        assert!(state.fields.objective.is_none());
        assert!(state.fields.ad_text.is_none());
        assert!(state.fields.cta.is_none());
        assert!(state.fields.music.is_none());
        assert!(state.oauth_token.is_none());
        assert!(state.receipt.is_none());
    }

    #[tokio::test]
    async fn test_complete_accepts_all_restart_keywords() {
        for keyword in ["restart", "start over", "NEW"] {
            let mut engine = engine();
            walk(
                &mut engine,
                &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "3"],
            )
            .await;

            let reply = engine.handle_message(keyword).await;
            assert_eq!(reply, RESTART_REPLY, "keyword {:?}", keyword);
            assert_eq!(engine.current_step(), Step::CampaignName);
        }
    }

    #[tokio::test]
    async fn test_complete_fixed_message_for_other_input() {
        let mut engine = engine();
        walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "3"],
        )
        .await;

        let reply = engine.handle_message("thanks!").await;
        assert_eq!(engine.current_step(), Step::Complete);
        assert!(reply.contains("Conversation complete."));
    }

    #[tokio::test]
    async fn test_oauth_failure_keeps_submit_retryable() {
        let mut engine = engine_with_bad_credentials();
        let reply = walk(
            &mut engine,
            &["Summer Sale", "clicks", "Get 50% off now", "Shop Now", "3"],
        )
        .await;

        assert_eq!(engine.current_step(), Step::Submit);
        assert!(reply.contains("Authorization failed."));
        assert!(engine.state().oauth_token.is_none());

        let retry = engine.handle_message("retry").await;
        assert!(retry.contains("Authorization failed."));
        assert_eq!(engine.current_step(), Step::Submit);
    }
}
