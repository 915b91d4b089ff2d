use crate::traits::{Microphone, MicrophoneHandle, PermissionStatus};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use wellcheck_core::config::RecordingSettings;
use wellcheck_core::sentiment::{AnalysisResult, ResultKind};

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("failed to acquire microphone: {0:#}")]
    Acquire(anyhow::Error),
}

/// Starts voice recordings and produces their (simulated) analysis.
pub struct Recorder {
    microphone: Arc<dyn Microphone>,
    tick: Duration,
    processing_delay: Duration,
}

impl Recorder {
    pub fn new(microphone: Arc<dyn Microphone>, settings: RecordingSettings) -> Self {
        Self {
            microphone,
            tick: Duration::from_millis(settings.tick_ms.max(1)),
            processing_delay: Duration::from_millis(settings.simulated_processing_ms),
        }
    }

    /// Asks for permission, acquires the device and starts the duration ticker.
    ///
    /// `on_tick` receives the elapsed milliseconds after every tick.
    pub async fn start<F, Fut>(&self, on_tick: F) -> Result<ActiveRecording, RecordingError>
    where
        F: Fn(u64) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send,
    {
        if self.microphone.request_permission().await == PermissionStatus::Denied {
            return Err(RecordingError::PermissionDenied);
        }

        let handle = self
            .microphone
            .acquire()
            .await
            .map_err(RecordingError::Acquire)?;

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let tick = self.tick;
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut elapsed_ms = 0u64;
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        elapsed_ms += tick.as_millis() as u64;
                        on_tick(elapsed_ms).await;
                    }
                }
            }
        });

        log::info!("recording started");
        Ok(ActiveRecording {
            handle: Some(handle),
            ticker,
            cancel,
        })
    }

    /// Voice check-ins are not transcribed: after a fixed delay they always
    /// come back as a stressed reading.
    pub async fn simulated_result(&self) -> AnalysisResult {
        tokio::time::sleep(self.processing_delay).await;
        AnalysisResult::from_kind(ResultKind::Stressed)
    }
}

/// A running recording. Owns the microphone until released or dropped.
pub struct ActiveRecording {
    handle: Option<Box<dyn MicrophoneHandle>>,
    ticker: JoinHandle<()>,
    cancel: CancellationToken,
}

impl ActiveRecording {
    /// Stops the ticker and releases the microphone.
    pub fn release(mut self) -> anyhow::Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> anyhow::Result<()> {
        self.cancel.cancel();
        self.ticker.abort();
        match self.handle.take() {
            Some(mut handle) => {
                log::info!("recording stopped, releasing microphone");
                handle.release()
            }
            None => Ok(()),
        }
    }
}

impl Drop for ActiveRecording {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("failed to release microphone: {e:#}");
        }
    }
}
