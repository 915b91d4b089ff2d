use crate::breathing::BreathingSchedule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub sentiment: SentimentSettings,

    #[serde(default)]
    pub recording: RecordingSettings,

    #[serde(default)]
    pub breathing: BreathingSchedule,

    // Secrets are stored outside this struct at rest.
    #[serde(default)]
    pub api_key_present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSettings {
    pub base_url: String,
    pub model: String,

    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
}

fn default_case_sensitive() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSettings {
    pub tick_ms: u64,

    // Voice check-ins are not transcribed yet; this is the fake processing latency.
    pub simulated_processing_ms: u64,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            tick_ms: 1_000,
            simulated_processing_ms: 2_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let json = r#"{"sentiment":{"base_url":"https://example.com","model":"m"}}"#;
        let cfg: AppConfig = serde_json::from_str(json).unwrap();
        assert!(cfg.sentiment.case_sensitive);
        assert_eq!(cfg.recording, RecordingSettings::default());
        assert_eq!(cfg.breathing, BreathingSchedule::default());
        assert!(!cfg.api_key_present);
    }
}
