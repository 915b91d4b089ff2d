// Interpreting classifier replies.

use serde::{Deserialize, Serialize};

/// Instruction sent alongside every check-in text.
pub const SENTIMENT_SYSTEM_PROMPT: &str = "You are a wellbeing analyst. Read the user's check-in text \
and return a three-level sentiment analysis: 'Positive', 'Neutral' or 'Stressed'. \
Reply with ONLY one of these three words.";

// Checked in this order; the first family with a hit wins.
pub const STRESSED_TOKENS: &[&str] = &["Stressed", "Estressado"];
pub const POSITIVE_TOKENS: &[&str] = &["Positive", "Positivo"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentCategory {
    Positive,
    Balanced,
    Stressed,
}

/// What produced a result. Errors still land in a category so the user
/// always gets an actionable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Positive,
    Balanced,
    Stressed,
    ConfigurationError,
    ClassificationError,
}

impl ResultKind {
    pub fn category(self) -> SentimentCategory {
        match self {
            ResultKind::Positive => SentimentCategory::Positive,
            ResultKind::Balanced => SentimentCategory::Balanced,
            ResultKind::Stressed
            | ResultKind::ConfigurationError
            | ResultKind::ClassificationError => SentimentCategory::Stressed,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            ResultKind::ConfigurationError | ResultKind::ClassificationError
        )
    }
}

impl From<SentimentCategory> for ResultKind {
    fn from(value: SentimentCategory) -> Self {
        match value {
            SentimentCategory::Positive => ResultKind::Positive,
            SentimentCategory::Balanced => ResultKind::Balanced,
            SentimentCategory::Stressed => ResultKind::Stressed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub kind: ResultKind,
    pub category: SentimentCategory,
    pub title: String,
    pub body: String,
}

impl AnalysisResult {
    pub fn from_kind(kind: ResultKind) -> Self {
        let template = crate::templates::result_template(kind);
        Self {
            kind,
            category: kind.category(),
            title: template.title.to_string(),
            body: template.body.to_string(),
        }
    }
}

/// Maps a raw classifier reply onto a category by substring match.
pub fn categorize_reply(reply: &str, case_sensitive: bool) -> SentimentCategory {
    let contains_any = |tokens: &[&str]| {
        if case_sensitive {
            tokens.iter().any(|t| reply.contains(t))
        } else {
            let reply = reply.to_lowercase();
            tokens.iter().any(|t| reply.contains(&t.to_lowercase()))
        }
    };

    if contains_any(STRESSED_TOKENS) {
        SentimentCategory::Stressed
    } else if contains_any(POSITIVE_TOKENS) {
        SentimentCategory::Positive
    } else {
        SentimentCategory::Balanced
    }
}
