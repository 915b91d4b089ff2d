use wellcheck_core::breathing::BreathingSchedule;
use wellcheck_core::config::{AppConfig, RecordingSettings, SentimentSettings};
use wellcheck_providers::gemini::{GEMINI_DEFAULT_BASE_URL, GEMINI_DEFAULT_MODEL};

pub fn default_sentiment_settings() -> SentimentSettings {
    SentimentSettings {
        base_url: GEMINI_DEFAULT_BASE_URL.into(),
        model: GEMINI_DEFAULT_MODEL.into(),
        case_sensitive: true,
    }
}

pub fn default_app_config() -> AppConfig {
    AppConfig {
        sentiment: default_sentiment_settings(),
        recording: RecordingSettings::default(),
        breathing: BreathingSchedule::default(),
        api_key_present: false,
    }
}
