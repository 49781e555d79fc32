//! Gemini `generateContent` client.

use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;

use super::backend::{EncodedImage, InferenceBackend, InferenceFuture};
use super::error::InferenceError;

/// Inference backend that calls the Gemini REST API.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiBackend {
    pub fn from_config(config: &BackendConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .build()
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    /// Full URL of the `generateContent` method for the configured model.
    pub fn endpoint(&self) -> String {
        let model = self.model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!("{}/{}:generateContent", self.base_url, model_path)
    }

    async fn generate(&self, image: &EncodedImage, prompt: &str) -> Result<String, InferenceError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(InferenceError::Backend(format!(
                "No API key configured; set {} or backend.api_key",
                self.api_key_env
            )));
        };

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.to_string(),
                            data: STANDARD.encode(&image.bytes),
                        },
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
        };

        let url = self.endpoint();
        tracing::debug!(
            url = %url,
            image_bytes = image.bytes.len(),
            "Sending inference request"
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);

            tracing::warn!(
                status = %status,
                latency_ms,
                error = %message,
                "Inference backend returned an error"
            );

            return Err(InferenceError::Backend(format!(
                "Backend rejected the request ({}): {}",
                status.as_u16(),
                message
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            InferenceError::Backend(format!("Malformed response from backend: {}", e))
        })?;

        let output = parsed.output_text()?;
        tracing::info!(latency_ms, output_len = output.len(), "Inference completed");
        Ok(output)
    }
}

impl InferenceBackend for GeminiBackend {
    fn infer<'a>(&'a self, image: &'a EncodedImage, prompt: &'a str) -> InferenceFuture<'a> {
        Box::pin(self.generate(image, prompt))
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Variant order matters for `#[serde(untagged)]` decoding. `Other` keeps
/// part kinds this client never sends (`functionCall`, `executableCode`, ...)
/// from failing the whole response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined in order.
    fn output_text(self) -> Result<String, InferenceError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(InferenceError::Backend(format!(
                "Request blocked by the backend: {}",
                reason
            )));
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(InferenceError::Backend(
                "Backend returned no candidates".to_string(),
            ));
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text),
                Part::InlineData { .. } | Part::Other(_) => None,
            })
            .collect();

        if text.is_empty() {
            return Err(InferenceError::Backend(format!(
                "Backend returned no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}
