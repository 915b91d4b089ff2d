use crate::request::HttpRequest;
use serde_json::json;

pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Builds a `generateContent` call with the user text as the only content
/// part and `system_instruction` as the system prompt.
pub fn build_generate_content_request(
    cfg: &GeminiConfig,
    user_text: &str,
    system_instruction: &str,
) -> HttpRequest {
    let url = join_url(
        &cfg.base_url,
        &format!("/models/{}:generateContent", cfg.model),
    );

    let payload = json!({
        "contents": [{ "parts": [{ "text": user_text }] }],
        "systemInstruction": { "parts": [{ "text": system_instruction }] },
    });

    HttpRequest::post_json(url, &payload).with_header("x-goog-api-key", cfg.api_key.clone())
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
