use wellcheck_core::config::SentimentSettings;
use wellcheck_providers::gemini::{GeminiConfig, build_generate_content_request};

/// Sentiment provider backed by the Gemini `generateContent` endpoint.
///
/// The key is supplied per call by the classifier, so this type holds no secret.
#[derive(Debug, Clone)]
pub struct GeminiSentimentProvider {
    base_url: String,
    model: String,
}

impl GeminiSentimentProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn from_settings(settings: &SentimentSettings) -> Self {
        Self::new(settings.base_url.clone(), settings.model.clone())
    }
}

#[async_trait::async_trait]
impl wellcheck_engine::traits::SentimentProvider for GeminiSentimentProvider {
    async fn classify(
        &self,
        api_key: &str,
        text: &str,
        system_prompt: &str,
    ) -> anyhow::Result<String> {
        let cfg = GeminiConfig {
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
            model: self.model.clone(),
        };

        let req = build_generate_content_request(&cfg, text, system_prompt);
        let resp = wellcheck_providers::runtime::execute(&req).await?;

        if !resp.is_success() {
            return Err(anyhow::anyhow!(
                "Gemini request failed: status={} body={}",
                resp.status,
                String::from_utf8_lossy(&resp.body)
            ));
        }

        wellcheck_providers::parse::parse_generate_content(&resp.body)
    }
}
