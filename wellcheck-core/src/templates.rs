use crate::sentiment::{ResultKind, SentimentCategory};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultTemplate {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub title: &'static str,
    pub detail: &'static str,
}

const STRESSED: ResultTemplate = ResultTemplate {
    title: "Signs of tension detected",
    body: "We noticed some signs of tension or sadness. Let's take care of you.",
};

const POSITIVE: ResultTemplate = ResultTemplate {
    title: "That's great!",
    body: "We're glad to see you're feeling good. Keep it up!",
};

const BALANCED: ResultTemplate = ResultTemplate {
    title: "You're in balance!",
    body: "Thanks for checking in. It looks like you're balanced today.",
};

const CONFIGURATION_ERROR: ResultTemplate = ResultTemplate {
    title: "Configuration error",
    body: "The analysis API key has not been configured in the app.",
};

const CLASSIFICATION_ERROR: ResultTemplate = ResultTemplate {
    title: "Analysis error",
    body: "We couldn't analyze your check-in. Check your connection.",
};

pub const STRESS_TIPS: &[Tip] = &[
    Tip {
        title: "Breathe mindfully",
        detail: "Take 3 slow, deep breaths",
    },
    Tip {
        title: "Take a break",
        detail: "Stand up and walk for 5 minutes",
    },
    Tip {
        title: "Listen to relaxing music",
        detail: "Nature sounds or soft music",
    },
    Tip {
        title: "Connect with nature",
        detail: "Look out the window or step outside",
    },
    Tip {
        title: "Practice gratitude",
        detail: "Think of 3 things you are grateful for",
    },
];

pub const POSITIVE_TIPS: &[Tip] = &[
    Tip {
        title: "Keep this positive energy",
        detail: "",
    },
    Tip {
        title: "How about a 5-minute break?",
        detail: "",
    },
    Tip {
        title: "You're doing well!",
        detail: "",
    },
];

pub fn result_template(kind: ResultKind) -> &'static ResultTemplate {
    match kind {
        ResultKind::Positive => &POSITIVE,
        ResultKind::Balanced => &BALANCED,
        ResultKind::Stressed => &STRESSED,
        ResultKind::ConfigurationError => &CONFIGURATION_ERROR,
        ResultKind::ClassificationError => &CLASSIFICATION_ERROR,
    }
}

pub fn tips_for(category: SentimentCategory) -> &'static [Tip] {
    match category {
        SentimentCategory::Stressed => STRESS_TIPS,
        SentimentCategory::Positive | SentimentCategory::Balanced => POSITIVE_TIPS,
    }
}

/// Stressed results offer the guided breathing exercise.
pub fn recommends_breathing(category: SentimentCategory) -> bool {
    category == SentimentCategory::Stressed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_titles_are_distinct() {
        let stressed = result_template(ResultKind::Stressed).title;
        let cfg = result_template(ResultKind::ConfigurationError).title;
        let cls = result_template(ResultKind::ClassificationError).title;
        assert_ne!(stressed, cfg);
        assert_ne!(stressed, cls);
        assert_ne!(cfg, cls);
    }

    #[test]
    fn only_stressed_recommends_breathing() {
        assert!(recommends_breathing(SentimentCategory::Stressed));
        assert!(!recommends_breathing(SentimentCategory::Balanced));
        assert_eq!(tips_for(SentimentCategory::Stressed).len(), 5);
    }
}
