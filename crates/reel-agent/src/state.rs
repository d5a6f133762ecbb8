//! Conversation state: collected fields, token slot, and current step.

use reel_api::{AdReceipt, Objective};

/// A stage in the campaign-building conversation.
///
/// The step fully determines which field the next message is collected
/// into; fields are only ever written by the handler for the step that
/// owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    CampaignName,
    Objective,
    AdText,
    Cta,
    MusicChoice,
    MusicId,
    Submit,
    Complete,
}

impl Step {
    /// Terminal steps only accept the restart keywords.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Complete)
    }
}

/// The music decision, once the user has made one.
///
/// Distinct from "not decided yet" (`Option::None` on the field): an
/// explicit no-music choice is only legal for non-Conversions campaigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicSelection {
    /// A concrete track id
    Track(String),
    /// Explicitly no music
    NoMusic,
}

impl MusicSelection {
    /// The chosen track id, if any.
    pub fn track_id(&self) -> Option<&str> {
        match self {
            MusicSelection::Track(id) => Some(id),
            MusicSelection::NoMusic => None,
        }
    }
}

/// Collected campaign fields.
#[derive(Debug, Clone, Default)]
pub struct CampaignFields {
    pub campaign_name: Option<String>,
    pub objective: Option<Objective>,
    pub ad_text: Option<String>,
    pub cta: Option<String>,
    pub music: Option<MusicSelection>,
}

/// Per-session conversation state. One instance per engine; replaced
/// wholesale on restart; never persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub fields: CampaignFields,
    pub oauth_token: Option<String>,
    pub current_step: Step,
    /// Receipt from a successful submission
    pub receipt: Option<AdReceipt>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every required field has been collected.
    pub fn is_complete(&self) -> bool {
        self.fields.campaign_name.is_some()
            && self.fields.objective.is_some()
            && self.fields.ad_text.is_some()
            && self.fields.cta.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SessionState::new();
        assert_eq!(state.current_step, Step::CampaignName);
        assert!(!state.is_complete());
        assert!(state.oauth_token.is_none());
    }

    #[test]
    fn test_is_complete_ignores_music() {
        let mut state = SessionState::new();
        state.fields.campaign_name = Some("Summer Sale".into());
        state.fields.objective = Some(Objective::Traffic);
        state.fields.ad_text = Some("Get 50% off".into());
        state.fields.cta = Some("Shop Now".into());
        assert!(state.is_complete());
    }

    #[test]
    fn test_track_id() {
        assert_eq!(
            MusicSelection::Track("music_1".into()).track_id(),
            Some("music_1")
        );
        assert_eq!(MusicSelection::NoMusic.track_id(), None);
    }
}
