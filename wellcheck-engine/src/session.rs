use serde::{Deserialize, Serialize};
use wellcheck_core::mood::Mood;
use wellcheck_core::sentiment::AnalysisResult;
use wellcheck_core::types::{CheckinMode, View, format_duration};

/// State of one check-in activation. Discarded when the modal closes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckinSession {
    pub view: View,
    pub mode: CheckinMode,
    pub selected_mood: Option<Mood>,
    pub free_text: String,
    pub is_loading: bool,
    pub is_recording: bool,
    pub recording_duration_ms: u64,
    pub analysis_result: Option<AnalysisResult>,
}

impl CheckinSession {
    /// Session state after `close`: every field reset, modal hidden.
    pub fn closed() -> Self {
        Self {
            view: View::Closed,
            ..Self::default()
        }
    }

    pub fn duration_label(&self) -> String {
        format_duration(self.recording_duration_ms)
    }

    pub fn free_text_chars(&self) -> usize {
        self.free_text.chars().count()
    }
}
