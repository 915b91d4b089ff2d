use std::path::PathBuf;
use std::sync::Arc;

use wellcheck_core::config::AppConfig;
use wellcheck_core::context::UserSession;
use wellcheck_engine::controller::CheckinController;
use wellcheck_engine::traits::{CheckinEvents, CredentialSource, Microphone};

use wellcheck_runtime::config_store::ConfigStore;
use wellcheck_runtime::runtime_engine::{build_classifier_from_config, build_recorder_from_config};
use wellcheck_runtime::secrets::{SecretKey, delete_secret, set_secret};

/// Entry point for hosts: owns the config file and the platform seams, and
/// hands out one controller per check-in activation.
#[derive(Clone)]
pub struct CheckinService {
    config_store: ConfigStore,
    credentials: Arc<dyn CredentialSource>,
    microphone: Arc<dyn Microphone>,
    events: Arc<dyn CheckinEvents>,
}

impl CheckinService {
    pub fn new(
        config_path: PathBuf,
        credentials: Arc<dyn CredentialSource>,
        microphone: Arc<dyn Microphone>,
        events: Arc<dyn CheckinEvents>,
    ) -> Self {
        Self {
            config_store: ConfigStore::at_path(config_path),
            credentials,
            microphone,
            events,
        }
    }

    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        self.config_store.load_or_default()
    }

    pub fn save_config(&self, cfg: &AppConfig) -> anyhow::Result<()> {
        self.config_store.save(cfg)
    }

    /// Opens a fresh check-in with the current config.
    ///
    /// Nothing carries over from earlier activations.
    pub fn open_checkin(&self, user: UserSession) -> anyhow::Result<CheckinController> {
        let cfg = self.load_config()?;
        Ok(self.open_checkin_with_config(&cfg, user))
    }

    /// Like `open_checkin`, with a config the caller already holds (for
    /// example one with command-line overrides that should not be saved).
    pub fn open_checkin_with_config(&self, cfg: &AppConfig, user: UserSession) -> CheckinController {
        if !self.api_key_present() {
            // Not fatal: text check-ins will show the configuration message.
            log::warn!("no sentiment API key configured");
        }

        let classifier = build_classifier_from_config(cfg, self.credentials.clone());
        let recorder = build_recorder_from_config(cfg, self.microphone.clone());

        CheckinController::open(
            Arc::new(user),
            Arc::new(classifier),
            Arc::new(recorder),
            cfg.breathing,
            self.events.clone(),
        )
    }

    pub fn api_key_present(&self) -> bool {
        self.credentials.api_key().is_some()
    }

    pub fn set_api_key(&self, value: &str) -> anyhow::Result<()> {
        set_secret(SecretKey::GeminiApiKey, value)?;
        self.mark_api_key_present(true)
    }

    pub fn clear_api_key(&self) -> anyhow::Result<()> {
        delete_secret(SecretKey::GeminiApiKey)?;
        self.mark_api_key_present(false)
    }

    fn mark_api_key_present(&self, present: bool) -> anyhow::Result<()> {
        let mut cfg = self.load_config()?;
        if cfg.api_key_present != present {
            cfg.api_key_present = present;
            self.save_config(&cfg)?;
        }
        Ok(())
    }
}
