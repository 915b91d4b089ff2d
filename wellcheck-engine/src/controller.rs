use crate::breathing::BreathingTimer;
use crate::classifier::SentimentClassifier;
use crate::recording::{ActiveRecording, Recorder, RecordingError};
use crate::session::CheckinSession;
use crate::traits::{CheckinEvent, CheckinEvents};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use wellcheck_core::breathing::{BreathPhase, BreathingSchedule, PhaseFrame};
use wellcheck_core::context::UserSession;
use wellcheck_core::intake::{clamp_free_text, combined_input};
use wellcheck_core::mood::Mood;
use wellcheck_core::sentiment::AnalysisResult;
use wellcheck_core::types::{CheckinMode, SessionId, View};

const MIC_PERMISSION_ALERT: &str = "You need to allow microphone access to record.";
const MIC_UNAVAILABLE_ALERT: &str = "Recording could not start. Check your microphone.";

#[derive(Debug, Error)]
pub enum CheckinError {
    #[error("`{action}` is not available in the {view:?} view")]
    InvalidTransition { action: &'static str, view: View },

    #[error("`{action}` requires {required:?} mode")]
    WrongMode {
        action: &'static str,
        required: CheckinMode,
    },

    #[error("a check-in is already being analyzed")]
    Busy,

    #[error("already recording")]
    AlreadyRecording,

    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("microphone unavailable: {0:#}")]
    Microphone(anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Neither free text nor a mood: nothing was submitted.
    EmptyInput,
    Completed(AnalysisResult),
    /// The session was closed while the analysis was pending.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    NotRecording,
    Discarded,
    Completed(AnalysisResult),
    Cancelled,
}

struct Inner {
    state: CheckinSession,

    // Bumped on close. Late callbacks compare against it before touching state.
    generation: u64,
    cancel: CancellationToken,

    recording: Option<ActiveRecording>,
    starting_recording: bool,
    breathing: BreathingTimer,
}

impl Inner {
    fn require_view(&self, view: View, action: &'static str) -> Result<(), CheckinError> {
        if self.state.view == view {
            Ok(())
        } else {
            Err(CheckinError::InvalidTransition {
                action,
                view: self.state.view,
            })
        }
    }

    // Recording and a submitted result never coexist.
    fn require_not_recording(&self) -> Result<(), CheckinError> {
        if self.state.is_recording || self.starting_recording {
            Err(CheckinError::AlreadyRecording)
        } else {
            Ok(())
        }
    }

    fn require_mode(&self, mode: CheckinMode, action: &'static str) -> Result<(), CheckinError> {
        if self.state.mode == mode {
            Ok(())
        } else {
            Err(CheckinError::WrongMode {
                action,
                required: mode,
            })
        }
    }
}

/// Drives one check-in activation: selector, analysis result, breathing.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct CheckinController {
    id: SessionId,
    user: Arc<UserSession>,
    classifier: Arc<SentimentClassifier>,
    recorder: Arc<Recorder>,
    events: Arc<dyn CheckinEvents>,
    inner: Arc<Mutex<Inner>>,
}

impl CheckinController {
    pub fn open(
        user: Arc<UserSession>,
        classifier: Arc<SentimentClassifier>,
        recorder: Arc<Recorder>,
        breathing: BreathingSchedule,
        events: Arc<dyn CheckinEvents>,
    ) -> Self {
        let id = SessionId::new();
        log::info!("check-in {id} opened for user {}", user.user_id.as_str());
        Self {
            id,
            user,
            classifier,
            recorder,
            events,
            inner: Arc::new(Mutex::new(Inner {
                state: CheckinSession::default(),
                generation: 0,
                cancel: CancellationToken::new(),
                recording: None,
                starting_recording: false,
                breathing: BreathingTimer::new(breathing),
            })),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn user(&self) -> &UserSession {
        &self.user
    }

    pub async fn snapshot(&self) -> CheckinSession {
        self.inner.lock().await.state.clone()
    }

    pub async fn change_mode(&self, mode: CheckinMode) -> Result<(), CheckinError> {
        let mut inner = self.inner.lock().await;
        inner.require_view(View::Selector, "change_mode")?;
        inner.require_not_recording()?;
        inner.state.mode = mode;
        self.emit_status(&inner);
        Ok(())
    }

    /// Picks a mood and seeds the free text from it, replacing manual edits.
    pub async fn select_mood(&self, mood: Mood) -> Result<(), CheckinError> {
        let mut inner = self.inner.lock().await;
        inner.require_view(View::Selector, "select_mood")?;
        inner.state.selected_mood = Some(mood);
        inner.state.free_text = clamp_free_text(&mood.default_free_text());
        self.emit_status(&inner);
        Ok(())
    }

    pub async fn set_free_text(&self, text: &str) -> Result<(), CheckinError> {
        let mut inner = self.inner.lock().await;
        inner.require_view(View::Selector, "set_free_text")?;
        inner.state.free_text = clamp_free_text(text);
        self.emit_status(&inner);
        Ok(())
    }

    /// Submits the text check-in for classification.
    ///
    /// The session stays on the selector with `is_loading` set until the
    /// classifier answers, then shows the result whatever the outcome.
    pub async fn save(&self) -> Result<SaveOutcome, CheckinError> {
        let (input, generation, cancel) = {
            let mut inner = self.inner.lock().await;
            inner.require_view(View::Selector, "save")?;
            inner.require_mode(CheckinMode::Text, "save")?;
            if inner.state.is_loading {
                return Err(CheckinError::Busy);
            }
            inner.require_not_recording()?;

            let Some(input) = combined_input(&inner.state.free_text, inner.state.selected_mood)
            else {
                return Ok(SaveOutcome::EmptyInput);
            };

            inner.state.is_loading = true;
            self.emit_status(&inner);
            (input, inner.generation, inner.cancel.clone())
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            r = self.classifier.classify(&input) => Some(r),
        };

        Ok(match self.apply_result(generation, result).await {
            Some(r) => SaveOutcome::Completed(r),
            None => SaveOutcome::Cancelled,
        })
    }

    /// Requests the microphone and starts recording.
    ///
    /// A refused permission raises an alert and leaves the session untouched.
    pub async fn start_recording(&self) -> Result<(), CheckinError> {
        let generation = {
            let mut inner = self.inner.lock().await;
            inner.require_view(View::Selector, "start_recording")?;
            inner.require_mode(CheckinMode::Voice, "start_recording")?;
            if inner.state.is_loading {
                return Err(CheckinError::Busy);
            }
            if inner.state.is_recording || inner.starting_recording {
                return Err(CheckinError::AlreadyRecording);
            }
            inner.starting_recording = true;
            inner.generation
        };

        // The ticker must not keep the session alive on its own.
        let weak = Arc::downgrade(&self.inner);
        let events = self.events.clone();
        let started = self
            .recorder
            .start(move |elapsed_ms| {
                let weak = weak.clone();
                let events = events.clone();
                async move {
                    let Some(shared) = weak.upgrade() else {
                        return;
                    };
                    let mut inner = shared.lock().await;
                    if inner.generation != generation || !inner.state.is_recording {
                        return;
                    }
                    inner.state.recording_duration_ms = elapsed_ms;
                    events.emit(CheckinEvent::Status(inner.state.clone()));
                }
            })
            .await;

        let mut inner = self.inner.lock().await;
        let current = inner.generation == generation;
        if current {
            inner.starting_recording = false;
        }

        match started {
            Err(RecordingError::PermissionDenied) => {
                log::warn!("check-in {}: microphone permission denied", self.id);
                self.events.emit(CheckinEvent::Alert(MIC_PERMISSION_ALERT.into()));
                Err(CheckinError::PermissionDenied)
            }
            Err(RecordingError::Acquire(e)) => {
                log::error!("check-in {}: start recording failed: {e:#}", self.id);
                self.events.emit(CheckinEvent::Alert(MIC_UNAVAILABLE_ALERT.into()));
                Err(CheckinError::Microphone(e))
            }
            Ok(active) if !current => {
                // Closed while the permission prompt was up.
                drop(active);
                Err(CheckinError::InvalidTransition {
                    action: "start_recording",
                    view: inner.state.view,
                })
            }
            Ok(active) => {
                inner.state.is_recording = true;
                inner.state.recording_duration_ms = 0;
                inner.recording = Some(active);
                self.emit_status(&inner);
                Ok(())
            }
        }
    }

    /// Stops the current recording and releases the microphone.
    ///
    /// With `submit`, the recording is "processed" and a result is shown;
    /// otherwise it is discarded and the selector stays up.
    pub async fn stop_recording(&self, submit: bool) -> Result<StopOutcome, CheckinError> {
        let (generation, cancel) = {
            let mut inner = self.inner.lock().await;
            let Some(active) = inner.recording.take() else {
                return Ok(StopOutcome::NotRecording);
            };
            if let Err(e) = active.release() {
                log::warn!("check-in {}: microphone release failed: {e:#}", self.id);
            }
            inner.state.is_recording = false;
            inner.state.recording_duration_ms = 0;

            if !submit {
                self.emit_status(&inner);
                return Ok(StopOutcome::Discarded);
            }

            inner.state.is_loading = true;
            self.emit_status(&inner);
            (inner.generation, inner.cancel.clone())
        };

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            r = self.recorder.simulated_result() => Some(r),
        };

        Ok(match self.apply_result(generation, result).await {
            Some(r) => StopOutcome::Completed(r),
            None => StopOutcome::Cancelled,
        })
    }

    pub async fn start_exercise(&self) -> Result<(), CheckinError> {
        let mut inner = self.inner.lock().await;
        inner.require_view(View::AnalysisResult, "start_exercise")?;
        self.set_view(&mut inner, View::Breathing);
        Ok(())
    }

    /// Leaves the breathing view, stopping any running exercise.
    pub async fn back(&self) -> Result<(), CheckinError> {
        let mut inner = self.inner.lock().await;
        inner.require_view(View::Breathing, "back")?;
        inner.breathing.stop();
        self.set_view(&mut inner, View::AnalysisResult);
        Ok(())
    }

    pub async fn start_breathing(&self) -> Result<(), CheckinError> {
        let mut inner = self.inner.lock().await;
        inner.require_view(View::Breathing, "start_breathing")?;
        inner.breathing.start();
        Ok(())
    }

    pub async fn stop_breathing(&self) -> Result<(), CheckinError> {
        let mut inner = self.inner.lock().await;
        inner.require_view(View::Breathing, "stop_breathing")?;
        inner.breathing.stop();
        Ok(())
    }

    pub async fn breathing_phase(&self) -> BreathPhase {
        self.inner.lock().await.breathing.phase()
    }

    pub async fn breathing_frames(&self) -> watch::Receiver<PhaseFrame> {
        self.inner.lock().await.breathing.subscribe()
    }

    /// Dismisses the modal from any view.
    ///
    /// Releases the microphone, cancels pending analyses and timers, and
    /// resets every field. Results that resolve afterwards are dropped.
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        inner.generation = inner.generation.wrapping_add(1);
        inner.cancel.cancel();
        inner.cancel = CancellationToken::new();

        if let Some(active) = inner.recording.take() {
            if let Err(e) = active.release() {
                log::warn!("check-in {}: microphone release failed: {e:#}", self.id);
            }
        }
        inner.starting_recording = false;
        inner.breathing.stop();

        let prev = inner.state.view;
        inner.state = CheckinSession::closed();
        log::info!("check-in {}: closed from {prev:?}", self.id);
        self.emit_status(&inner);
    }

    async fn apply_result(
        &self,
        generation: u64,
        result: Option<AnalysisResult>,
    ) -> Option<AnalysisResult> {
        let mut inner = self.inner.lock().await;
        let result = match result {
            Some(r) if inner.generation == generation => r,
            _ => {
                log::info!("check-in {}: dropping analysis for closed session", self.id);
                return None;
            }
        };

        if let Some(active) = inner.recording.take() {
            log::warn!("check-in {}: recording still active at result, releasing", self.id);
            if let Err(e) = active.release() {
                log::warn!("check-in {}: microphone release failed: {e:#}", self.id);
            }
            inner.state.is_recording = false;
            inner.state.recording_duration_ms = 0;
        }

        inner.state.is_loading = false;
        inner.state.analysis_result = Some(result.clone());
        self.set_view(&mut inner, View::AnalysisResult);
        Some(result)
    }

    fn set_view(&self, inner: &mut Inner, view: View) {
        let prev = inner.state.view;
        inner.state.view = view;
        if prev != view {
            log::info!("check-in {}: view {prev:?} -> {view:?}", self.id);
        }
        self.emit_status(inner);
    }

    fn emit_status(&self, inner: &Inner) {
        self.events.emit(CheckinEvent::Status(inner.state.clone()));
    }
}
