use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wellcheck_engine::traits::{
    CheckinEvent, CheckinEvents, CredentialSource, Microphone, MicrophoneHandle,
    PermissionStatus,
};

#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    key: Option<String>,
}

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    pub fn missing() -> Self {
        Self { key: None }
    }

    pub fn boxed(self) -> Arc<dyn CredentialSource> {
        Arc::new(self)
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.key.clone()
    }
}

/// Microphone with a fixed permission answer that counts acquire/release.
#[derive(Debug)]
pub struct ScriptedMicrophone {
    permission: PermissionStatus,
    acquired: AtomicUsize,
    released: Arc<AtomicUsize>,
}

impl ScriptedMicrophone {
    pub fn granting() -> Self {
        Self::with_permission(PermissionStatus::Granted)
    }

    pub fn denying() -> Self {
        Self::with_permission(PermissionStatus::Denied)
    }

    fn with_permission(permission: PermissionStatus) -> Self {
        Self {
            permission,
            acquired: AtomicUsize::new(0),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

struct CountingHandle(Arc<AtomicUsize>);

impl MicrophoneHandle for CountingHandle {
    fn release(&mut self) -> anyhow::Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Microphone for ScriptedMicrophone {
    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn acquire(&self) -> anyhow::Result<Box<dyn MicrophoneHandle>> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingHandle(self.released.clone())))
    }
}

#[derive(Debug, Default)]
pub struct MemoryEvents {
    pub events: Mutex<Vec<CheckinEvent>>,
}

impl MemoryEvents {
    pub fn alerts(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                CheckinEvent::Alert(a) => Some(a.clone()),
                CheckinEvent::Status(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CheckinEvents for MemoryEvents {
    fn emit(&self, event: CheckinEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_microphone_counts_lifecycle() {
        let mic = ScriptedMicrophone::granting();
        assert_eq!(mic.request_permission().await, PermissionStatus::Granted);

        let mut handle = mic.acquire().await.unwrap();
        handle.release().unwrap();
        assert_eq!((mic.acquired(), mic.released()), (1, 1));

        let denied = ScriptedMicrophone::denying();
        assert_eq!(denied.request_permission().await, PermissionStatus::Denied);
    }

    #[test]
    fn memory_events_filters_alerts() {
        let events = MemoryEvents::default();
        events.emit(CheckinEvent::Alert("mic".into()));
        events.emit(CheckinEvent::Status(Default::default()));
        assert_eq!(events.alerts(), vec!["mic".to_string()]);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn static_credentials() {
        assert_eq!(StaticCredentials::new("k").api_key().as_deref(), Some("k"));
        assert_eq!(StaticCredentials::missing().api_key(), None);
    }
}
