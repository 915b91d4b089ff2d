use crate::mood::Mood;

/// Hard limit of the free-text field, in characters.
pub const MAX_FREE_TEXT_CHARS: usize = 280;

/// Clamps user input to `MAX_FREE_TEXT_CHARS`.
///
/// Applied once, where text enters the session. Nothing downstream truncates.
pub fn clamp_free_text(text: &str) -> String {
    match text.char_indices().nth(MAX_FREE_TEXT_CHARS) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// The text sent for classification: the free text when it has content,
/// otherwise the selected mood's label.
pub fn combined_input(free_text: &str, mood: Option<Mood>) -> Option<String> {
    if !free_text.trim().is_empty() {
        return Some(free_text.to_string());
    }
    mood.map(|m| m.label().to_string())
}
