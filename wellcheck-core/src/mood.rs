use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Calm,
    Tired,
    Anxious,
    Stressed,
    Sad,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mood: {0}")]
pub struct ParseMoodError(pub String);

impl Mood {
    /// Display order of the mood grid.
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Calm,
        Mood::Tired,
        Mood::Anxious,
        Mood::Stressed,
        Mood::Sad,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Calm => "Calm",
            Mood::Tired => "Tired",
            Mood::Anxious => "Anxious",
            Mood::Stressed => "Stressed",
            Mood::Sad => "Sad",
        }
    }

    /// Short phrase shown under the grid once the mood is picked.
    pub fn context_phrase(self) -> &'static str {
        match self {
            Mood::Happy => "Feeling good and positive",
            Mood::Calm => "Balanced and calm",
            Mood::Tired => "Low on energy",
            Mood::Anxious => "Worried or restless",
            Mood::Stressed => "Under pressure or tension",
            Mood::Sad => "Melancholic or down",
        }
    }

    /// Text the free-text field is seeded with when this mood is picked.
    pub fn default_free_text(self) -> String {
        format!("Today I feel {}.", self.label().to_lowercase())
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseMoodError(needle.to_string()))
    }
}
