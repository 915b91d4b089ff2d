use serde::{Deserialize, Serialize};

/// Header names whose values must never show up in logs.
const SECRET_HEADERS: &[&str] = &["authorization", "x-goog-api-key"];

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Empty,
    Json(String),
}

impl HttpRequest {
    /// A POST carrying `payload` as its JSON body.
    pub fn post_json(url: impl Into<String>, payload: &serde_json::Value) -> Self {
        Self {
            method: "POST".into(),
            url: url.into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: Body::Json(payload.to_string()),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn is_secret_header(name: &str) -> bool {
    SECRET_HEADERS.iter().any(|s| name.eq_ignore_ascii_case(s))
        || name.to_ascii_lowercase().ends_with("api-key")
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                let shown = if is_secret_header(k) { "[REDACTED]" } else { v.as_str() };
                (k.as_str(), shown)
            })
            .collect();

        let body = match &self.body {
            Body::Empty => "Empty".to_string(),
            Body::Json(s) => format!("Json(len={})", s.len()),
        };

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_json_sets_content_type_and_body() {
        let req = HttpRequest::post_json("https://gemini.test/models/m", &json!({ "a": 1 }))
            .with_header("x-goog-api-key", "AIza-1");

        assert_eq!(req.method, "POST");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("X-Goog-Api-Key"), Some("AIza-1"));
        assert_eq!(req.body, Body::Json(r#"{"a":1}"#.into()));
    }

    #[test]
    fn gemini_key_is_a_secret_header() {
        assert!(is_secret_header("x-goog-api-key"));
        assert!(is_secret_header("Authorization"));
        assert!(!is_secret_header("Content-Type"));
    }

    #[test]
    fn debug_keeps_key_and_body_text_out() {
        let req = HttpRequest::post_json(
            "https://gemini.test/models/m:generateContent",
            &json!({ "contents": [{ "parts": [{ "text": "I feel awful today" }] }] }),
        )
        .with_header("x-goog-api-key", "AIza-secret");

        let s = format!("{req:?}");
        assert!(!s.contains("AIza-secret"));
        assert!(!s.contains("awful"));
        assert!(s.contains("[REDACTED]"));
        assert!(s.contains("generateContent"));
    }
}
