use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Which sub-view of the check-in modal is visible.
///
/// `Closed` is terminal for an activation: the modal is hidden and every
/// session field has been reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Selector,
    AnalysisResult,
    Breathing,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinMode {
    #[default]
    Voice,
    Text,
}

/// Formats a recording duration as `m:ss`.
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_recording_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(7_400), "0:07");
        assert_eq!(format_duration(65_000), "1:05");
    }

    #[test]
    fn fresh_session_defaults() {
        assert_eq!(View::default(), View::Selector);
        assert_eq!(CheckinMode::default(), CheckinMode::Voice);
    }
}
