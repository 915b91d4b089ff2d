use crate::traits::{CredentialSource, SentimentProvider};
use std::sync::Arc;
use thiserror::Error;
use wellcheck_core::sentiment::{
    AnalysisResult, ResultKind, SENTIMENT_SYSTEM_PROMPT, SentimentCategory, categorize_reply,
};

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("sentiment API key is not configured")]
    MissingCredential,

    // Transport failures, non-2xx statuses and malformed replies all land here.
    #[error("sentiment request failed: {0:#}")]
    Request(anyhow::Error),
}

impl ClassifyError {
    pub fn result_kind(&self) -> ResultKind {
        match self {
            ClassifyError::MissingCredential => ResultKind::ConfigurationError,
            ClassifyError::Request(_) => ResultKind::ClassificationError,
        }
    }
}

pub struct SentimentClassifier {
    provider: Arc<dyn SentimentProvider>,
    credentials: Arc<dyn CredentialSource>,
    case_sensitive: bool,
}

impl SentimentClassifier {
    pub fn new(
        provider: Arc<dyn SentimentProvider>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            provider,
            credentials,
            case_sensitive: true,
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Classifies `text` and always yields a result to show.
    ///
    /// Failures are logged and turned into their error templates.
    pub async fn classify(&self, text: &str) -> AnalysisResult {
        match self.try_classify(text).await {
            Ok(category) => AnalysisResult::from_kind(category.into()),
            Err(e) => {
                log::error!("sentiment classification failed: {e}");
                AnalysisResult::from_kind(e.result_kind())
            }
        }
    }

    /// One provider call at most; none when the credential is missing.
    pub async fn try_classify(&self, text: &str) -> Result<SentimentCategory, ClassifyError> {
        let api_key = self
            .credentials
            .api_key()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ClassifyError::MissingCredential)?;

        let reply = self
            .provider
            .classify(&api_key, text, SENTIMENT_SYSTEM_PROMPT)
            .await
            .map_err(ClassifyError::Request)?;

        let category = categorize_reply(&reply, self.case_sensitive);
        log::debug!("sentiment reply {reply:?} -> {category:?}");
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedReply {
        reply: anyhow::Result<String>,
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl FixedReply {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.into()),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(vec![]),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(anyhow::anyhow!("bad status 500")),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(vec![]),
            })
        }
    }

    #[async_trait::async_trait]
    impl SentimentProvider for FixedReply {
        async fn classify(
            &self,
            api_key: &str,
            text: &str,
            system_prompt: &str,
        ) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(system_prompt, SENTIMENT_SYSTEM_PROMPT);
            self.seen
                .lock()
                .unwrap()
                .push((api_key.to_string(), text.to_string()));
            match &self.reply {
                Ok(r) => Ok(r.clone()),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
    }

    struct Key(Option<&'static str>);

    impl CredentialSource for Key {
        fn api_key(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    fn classifier(provider: Arc<FixedReply>, key: Option<&'static str>) -> SentimentClassifier {
        SentimentClassifier::new(provider, Arc::new(Key(key)))
    }

    #[tokio::test]
    async fn maps_reply_tokens_to_categories() {
        for (reply, expected) in [
            ("Stressed", SentimentCategory::Stressed),
            ("Positive and Stressed", SentimentCategory::Stressed),
            ("Positivo", SentimentCategory::Positive),
            ("Neutral", SentimentCategory::Balanced),
            ("no idea", SentimentCategory::Balanced),
        ] {
            let res = classifier(FixedReply::ok(reply), Some("k"))
                .classify("hi")
                .await;
            assert_eq!(res.category, expected, "reply {reply:?}");
        }
    }

    #[tokio::test]
    async fn missing_key_skips_the_network() {
        let provider = FixedReply::ok("Positive");
        let res = classifier(provider.clone(), None).classify("hi").await;

        assert_eq!(res.kind, ResultKind::ConfigurationError);
        assert_eq!(res.category, SentimentCategory::Stressed);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        let blank = classifier(provider.clone(), Some("   ")).classify("hi").await;
        assert_eq!(blank.kind, ResultKind::ConfigurationError);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_failure_becomes_classification_error() {
        let provider = FixedReply::failing();
        let res = classifier(provider.clone(), Some("k")).classify("hi").await;

        assert_eq!(res.kind, ResultKind::ClassificationError);
        assert_eq!(res.category, SentimentCategory::Stressed);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn passes_key_and_text_through() {
        let provider = FixedReply::ok("Neutral");
        classifier(provider.clone(), Some("secret"))
            .classify("long day")
            .await;

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[("secret".into(), "long day".into())]);
    }

    #[tokio::test]
    async fn case_insensitive_matching_when_configured() {
        let strict = classifier(FixedReply::ok("stressed"), Some("k"));
        assert_eq!(
            strict.classify("x").await.category,
            SentimentCategory::Balanced
        );

        let relaxed = classifier(FixedReply::ok("stressed"), Some("k")).with_case_sensitive(false);
        assert_eq!(
            relaxed.classify("x").await.category,
            SentimentCategory::Stressed
        );
    }
}
