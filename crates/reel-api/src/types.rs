//! Wire types for the ads submission API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Campaign objective. The wire strings are exactly `Traffic` and
/// `Conversions`; parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    Traffic,
    Conversions,
}

impl Objective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Traffic => "Traffic",
            Objective::Conversions => "Conversions",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Traffic" => Ok(Objective::Traffic),
            "Conversions" => Ok(Objective::Conversions),
            _ => Err(()),
        }
    }
}

/// The creative bundle: ad text, call to action, and optional music track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creative {
    pub text: String,
    pub cta: String,
    /// `None` serializes as `music_id: null`, meaning "no music"
    pub music_id: Option<String>,
}

/// Full submission payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdPayload {
    pub campaign_name: String,
    pub objective: Objective,
    pub creative: Creative,
}

/// Success result from ad submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdReceipt {
    pub ad_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_objective_parses_exact_strings_only() {
        assert_eq!("Traffic".parse(), Ok(Objective::Traffic));
        assert_eq!("Conversions".parse(), Ok(Objective::Conversions));
        assert!("traffic".parse::<Objective>().is_err());
        assert!("CONVERSIONS".parse::<Objective>().is_err());
        assert!("Sales".parse::<Objective>().is_err());
    }

    #[test]
    fn test_payload_round_trip() {
        let payload = AdPayload {
            campaign_name: "Summer Sale".to_string(),
            objective: Objective::Traffic,
            creative: Creative {
                text: "Get 50% off now".to_string(),
                cta: "Shop Now".to_string(),
                music_id: None,
            },
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["objective"], "Traffic");
        assert_eq!(json["creative"]["music_id"], serde_json::Value::Null);

        let back: AdPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn test_receipt_timestamp_format() {
        let receipt = AdReceipt {
            ad_id: "ad_123456789".to_string(),
            status: "active".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 2, 4, 10, 30, 0).unwrap(),
        };
        let json = serde_json::to_string(&receipt).unwrap();
        assert!(json.contains("2024-02-04T10:30:00Z"));
    }
}
