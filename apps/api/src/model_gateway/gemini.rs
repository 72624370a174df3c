//! Gemini transport — HTTP wire types, failure classification, and the
//! `extract_text` adapter that isolates response-shape variance to one seam.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GatewayError, TextModel};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Overall per-call deadline. There is no cancellation of an in-flight call;
/// this timeout is the hard stop.
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// HTTP transport for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate(
        &self,
        model_id: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GatewayError::Configuration(
                "No model API key configured. Set GEMINI_API_KEY (or the legacy GOOGLE_API_KEY)."
                    .to_string(),
            )
        })?;

        let request_body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!("{GEMINI_API_URL}/{model_id}:generateContent");
        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GatewayError::Fatal(format!("HTTP error: {e}")))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(model_id, status, &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Fatal(format!("Malformed model response: {e}")))?;

        let text = extract_text(&parsed)?;
        debug!("model {model_id} returned {} chars", text.len());
        Ok(text)
    }
}

/// Maps an HTTP failure to the gateway error taxonomy.
///
/// 429 and 503 are transient (rate limit / overload) and carry the
/// model-suggested retry wait when the body includes one. 404 is a bad
/// model identifier. Everything else is fatal.
pub fn classify_failure(model_id: &str, status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<GeminiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        429 | 503 => GatewayError::Transient {
            retry_after: extract_retry_hint(body),
            message,
        },
        404 => GatewayError::NotFound {
            model: model_id.to_string(),
        },
        _ => GatewayError::Fatal(format!("API error (status {status}): {message}")),
    }
}

/// Pulls a retry wait in seconds out of an error body.
///
/// Gemini rate-limit errors carry a RetryInfo detail like
/// `"retryDelay": "34s"`; some error messages instead say "retry in 34.5s".
fn extract_retry_hint(body: &str) -> Option<f64> {
    for marker in ["\"retryDelay\": \"", "\"retryDelay\":\"", "retry in "] {
        if let Some(idx) = body.find(marker) {
            let rest = &body[idx + marker.len()..];
            let number: String = rest
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if let Ok(secs) = number.parse::<f64>() {
                if secs > 0.0 {
                    return Some(secs);
                }
            }
        }
    }
    None
}

/// The single adapter between the provider's response shape and the rest of
/// the system. Concatenates the text parts of the first candidate.
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, GatewayError> {
    let text: String = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GatewayError::Fatal(
            "Model returned empty content".to_string(),
        ));
    }
    Ok(text)
}
