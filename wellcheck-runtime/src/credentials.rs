use crate::secrets::{SecretKey, get_secret};
use wellcheck_engine::traits::CredentialSource;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Resolves the sentiment API key: environment variable first, then the OS
/// keyring. Looked up on every call.
#[derive(Debug, Clone)]
pub struct RuntimeCredentials {
    env_var: String,
    use_keyring: bool,
}

impl Default for RuntimeCredentials {
    fn default() -> Self {
        Self {
            env_var: API_KEY_ENV.into(),
            use_keyring: true,
        }
    }
}

impl RuntimeCredentials {
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    pub fn without_keyring(mut self) -> Self {
        self.use_keyring = false;
        self
    }

    fn from_keyring(&self) -> Option<String> {
        if !self.use_keyring {
            return None;
        }
        match get_secret(SecretKey::GeminiApiKey) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("keyring lookup failed: {e:#}");
                None
            }
        }
    }
}

impl CredentialSource for RuntimeCredentials {
    fn api_key(&self) -> Option<String> {
        non_blank(std::env::var(&self.env_var).ok()).or_else(|| non_blank(self.from_keyring()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
