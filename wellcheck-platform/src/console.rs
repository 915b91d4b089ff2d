// Implementations for headless use (CLI): no real audio device is opened.

use wellcheck_core::types::View;
use wellcheck_engine::traits::{
    CheckinEvent, CheckinEvents, Microphone, MicrophoneHandle, PermissionStatus,
};

/// Grants permission and hands out a handle that only logs.
///
/// Voice check-ins are not transcribed, so there is nothing to capture.
#[derive(Debug, Default)]
pub struct SimulatedMicrophone;

struct SimulatedHandle {
    released: bool,
}

impl MicrophoneHandle for SimulatedHandle {
    fn release(&mut self) -> anyhow::Result<()> {
        if !self.released {
            self.released = true;
            log::debug!("simulated microphone released");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Microphone for SimulatedMicrophone {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn acquire(&self) -> anyhow::Result<Box<dyn MicrophoneHandle>> {
        log::debug!("simulated microphone acquired");
        Ok(Box::new(SimulatedHandle { released: false }))
    }
}

/// Writes status changes to the log and alerts to stderr.
#[derive(Debug, Default)]
pub struct LogEvents;

impl CheckinEvents for LogEvents {
    fn emit(&self, event: CheckinEvent) {
        match event {
            CheckinEvent::Alert(msg) => {
                log::warn!("alert: {msg}");
                eprintln!("! {msg}");
            }
            CheckinEvent::Status(s) => {
                if s.is_recording {
                    log::info!("recording {}", s.duration_label());
                } else if s.is_loading {
                    log::info!("analyzing check-in...");
                } else if s.view == View::AnalysisResult {
                    if let Some(r) = &s.analysis_result {
                        log::info!("result: {:?} ({})", r.category, r.title);
                    }
                } else {
                    log::debug!("status: {:?}", s.view);
                }
            }
        }
    }
}
