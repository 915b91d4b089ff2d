use std::sync::Arc;

use wellcheck_core::config::AppConfig;
use wellcheck_engine::classifier::SentimentClassifier;
use wellcheck_engine::recording::Recorder;
use wellcheck_engine::traits::{CredentialSource, Microphone, SentimentProvider};

use crate::gemini::GeminiSentimentProvider;

/// Build the classifier from config + a credential source.
///
/// The key itself is not resolved here; the classifier reads it per call.
pub fn build_classifier_from_config(
    cfg: &AppConfig,
    credentials: Arc<dyn CredentialSource>,
) -> SentimentClassifier {
    let provider: Arc<dyn SentimentProvider> =
        Arc::new(GeminiSentimentProvider::from_settings(&cfg.sentiment));

    SentimentClassifier::new(provider, credentials).with_case_sensitive(cfg.sentiment.case_sensitive)
}

pub fn build_recorder_from_config(cfg: &AppConfig, microphone: Arc<dyn Microphone>) -> Recorder {
    Recorder::new(microphone, cfg.recording)
}
