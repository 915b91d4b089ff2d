use anyhow::{Context, bail};

// Keyring service name. Changing it strands keys saved by earlier builds.
const SERVICE: &str = "wellcheck";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKey {
    GeminiApiKey,
}

impl SecretKey {
    fn account(self) -> &'static str {
        match self {
            SecretKey::GeminiApiKey => "gemini_api_key",
        }
    }

    fn entry(self) -> anyhow::Result<keyring::Entry> {
        keyring::Entry::new(SERVICE, self.account())
            .with_context(|| format!("open keyring entry {SERVICE}/{}", self.account()))
    }
}

/// Stores `value` trimmed. A blank value is refused rather than saved, so a
/// stray empty paste cannot shadow a working key.
pub fn set_secret(key: SecretKey, value: &str) -> anyhow::Result<()> {
    let value = value.trim();
    if value.is_empty() {
        bail!("refusing to store an empty {key:?}");
    }
    key.entry()?.set_password(value).context("write keyring secret")
}

pub fn get_secret(key: SecretKey) -> anyhow::Result<Option<String>> {
    match key.entry()?.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(anyhow::Error::new(e)).context("read keyring secret"),
    }
}

/// Removing a key that was never stored is not an error.
pub fn delete_secret(key: SecretKey) -> anyhow::Result<()> {
    match key.entry()?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)).context("delete keyring secret"),
    }
}
