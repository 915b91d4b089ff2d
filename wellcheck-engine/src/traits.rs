use crate::session::CheckinSession;
use async_trait::async_trait;

/// Remote sentiment model.
///
/// Returns the raw reply text; category mapping happens in the classifier.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    async fn classify(
        &self,
        api_key: &str,
        text: &str,
        system_prompt: &str,
    ) -> anyhow::Result<String>;
}

/// Source of the sentiment API credential.
///
/// Queried on every classification so a key added or removed at runtime is
/// picked up by the next check-in.
pub trait CredentialSource: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[async_trait]
pub trait Microphone: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    /// Exclusively acquires the input device and starts capturing.
    async fn acquire(&self) -> anyhow::Result<Box<dyn MicrophoneHandle>>;
}

pub trait MicrophoneHandle: Send {
    /// Stops capture and frees the device.
    fn release(&mut self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinEvent {
    Status(CheckinSession),

    // User-visible warning, e.g. the microphone permission prompt was refused.
    Alert(String),
}

/// Receives status snapshots and alerts as the check-in progresses.
///
/// Called with the session lock held; implementations must be fast.
pub trait CheckinEvents: Send + Sync {
    fn emit(&self, event: CheckinEvent);
}
