use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{DictError, DictResult};

/// Remote collaborator that detects and translates text.
pub trait Translator {
    fn detect_language(&self, text: &str) -> DictResult<String>;
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> DictResult<String>;
}

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Client for a LibreTranslate compatible HTTP API. Requests are not retried.
pub struct HttpTranslator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct Detection {
    language: String,
    #[serde(default)]
    confidence: f64,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

impl HttpTranslator {
    pub fn new(cfg: &TranslatorConfig) -> DictResult<Self> {
        let client = Client::builder().timeout(cfg.timeout).build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> DictResult<String> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "calling translation service");

        let resp = self.client.post(&url).json(body).send()?;
        let status = resp.status();

        // Read as text first so an error body is not lost when it is not JSON.
        let text = resp.text()?;

        if !status.is_success() {
            let message = extract_error_message(status, &text);
            tracing::warn!(%url, %message, "translation service returned an error");
            return Err(DictError::Translator(message));
        }

        Ok(text)
    }
}

impl Translator for HttpTranslator {
    fn detect_language(&self, text: &str) -> DictResult<String> {
        let body = DetectRequest {
            q: text,
            api_key: self.api_key.as_deref(),
        };
        parse_detection(&self.post("detect", &body)?)
    }

    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> DictResult<String> {
        let body = TranslateRequest {
            q: text,
            source: source_lang,
            target: target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };
        parse_translation(&self.post("translate", &body)?)
    }
}

/// Picks the most confident language from a `/detect` response.
fn parse_detection(body: &str) -> DictResult<String> {
    let detections: Vec<Detection> = serde_json::from_str(body)?;

    detections
        .into_iter()
        .filter(|d| !d.language.trim().is_empty())
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .map(|d| d.language.trim().to_lowercase())
        .ok_or_else(|| DictError::Translator("could not detect the language".into()))
}

fn parse_translation(body: &str) -> DictResult<String> {
    let resp: TranslateResponse = serde_json::from_str(body)?;
    let text = resp.translated_text.trim();
    if text.is_empty() {
        return Err(DictError::Translator("empty translation returned".into()));
    }
    Ok(text.to_string())
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    // Common shapes: { "error": "..." } or { "error": { "message": "..." } }
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        let error = v.get("error");
        if let Some(msg) = error.and_then(|e| e.as_str()) {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
        if let Some(msg) = error.and_then(|e| e.get("message")).and_then(|m| m.as_str()) {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
    }

    let trimmed = body_text.trim();
    let snippet: String = if trimmed.chars().count() > 400 {
        format!("{}...", trimmed.chars().take(400).collect::<String>())
    } else {
        trimmed.to_string()
    };

    format!("HTTP {}: {}", status.as_u16(), snippet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_picks_highest_confidence() {
        let body = r#"[{"language":"es","confidence":40.0},{"language":"PT","confidence":92.5}]"#;
        assert_eq!(parse_detection(body).unwrap(), "pt");
    }

    #[test]
    fn empty_detection_is_a_translator_error() {
        assert!(matches!(parse_detection("[]"), Err(DictError::Translator(_))));
    }

    #[test]
    fn malformed_detection_is_a_json_error() {
        assert!(matches!(parse_detection("<html>"), Err(DictError::Json(_))));
    }

    #[test]
    fn translation_body_is_trimmed() {
        let body = r#"{"translatedText":"  Árvore "}"#;
        assert_eq!(parse_translation(body).unwrap(), "Árvore");
        assert!(matches!(
            parse_translation(r#"{"translatedText":" "}"#),
            Err(DictError::Translator(_))
        ));
    }

    #[test]
    fn error_message_prefers_json_error_field() {
        let msg = extract_error_message(
            StatusCode::BAD_REQUEST,
            r#"{"error":"xx is not supported"}"#,
        );
        assert_eq!(msg, "HTTP 400: xx is not supported");

        let msg = extract_error_message(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"slow down"}}"#,
        );
        assert_eq!(msg, "HTTP 429: slow down");
    }

    #[test]
    fn error_message_falls_back_to_truncated_body() {
        let body = "x".repeat(500);
        let msg = extract_error_message(StatusCode::BAD_GATEWAY, &body);
        assert!(msg.starts_with("HTTP 502: xxx"));
        assert!(msg.ends_with("..."));
        assert_eq!(msg.len(), "HTTP 502: ".len() + 400 + 3);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let t = HttpTranslator::new(&TranslatorConfig {
            base_url: "http://localhost:5000/".into(),
            api_key: Some("  ".into()),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(t.base_url, "http://localhost:5000");
        assert!(t.api_key.is_none());
    }
}
