// src/ai/client.rs
//! Model service client.
//!
//! All assist flows go through the [`TextModel`] trait so tests can drive
//! them with in-process stubs. The production implementation talks JSON to
//! the model gateway over HTTP.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{BuilderError, Result};

const MODEL_TIMEOUT: Duration = Duration::from_secs(60);

/// A text completion backend.
pub trait TextModel {
    fn complete(&self, prompt: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateReply {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the model gateway's generate endpoint.
pub struct HttpModelClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpModelClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(MODEL_TIMEOUT)
            .build()
            .map_err(|e| BuilderError::ModelCall(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl TextModel for HttpModelClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/v1/generate", self.base_url);
        debug!(url = %url, prompt_len = prompt.len(), "calling model service");

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(|e| BuilderError::ModelCall(format!("request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let reply: GenerateReply = response
                .json()
                .await
                .map_err(|e| BuilderError::ModelReply(e.to_string()))?;
            match reply.output {
                Some(output) => Ok(output),
                None => Err(BuilderError::ModelReply(
                    reply.error.unwrap_or_else(|| "reply had no output".to_string()),
                )),
            }
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GenerateReply>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| status.to_string());
            error!(status = %status, "model service returned an error");
            Err(BuilderError::ModelCall(message))
        }
    }
}

/// Stand-in for contexts with no model service, such as file export from
/// the CLI. Every call fails; the document flows still work.
pub struct NoModel;

impl TextModel for NoModel {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(BuilderError::ModelCall(
            "no model service configured".to_string(),
        ))
    }
}

/// Strip a Markdown code fence from a model reply and return the JSON
/// payload. Falls back to the outermost `{...}` or `[...]` span, then to
/// the trimmed reply itself.
pub fn extract_json(reply: &str) -> &str {
    let trimmed = reply.trim();

    for fence in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(fence) {
            if let Some(end) = rest.rfind("```") {
                return rest[..end].trim();
            }
        }
    }

    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (trimmed.find(open), trimmed.rfind(close)) {
            if start < end {
                return trimmed[start..=end].trim();
            }
        }
    }

    trimmed
}

/// Parse a model reply as JSON after removing any code fence.
pub fn parse_model_json<T: serde::de::DeserializeOwned>(reply: &str) -> Result<T> {
    serde_json::from_str(extract_json(reply))
        .map_err(|e| BuilderError::ModelReply(format!("{}: {}", e, extract_json(reply))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_strips_fences() {
        let fenced = "```json\n{\"objective\": \"text\"}\n```";
        assert_eq!(extract_json(fenced), "{\"objective\": \"text\"}");

        let bare_fence = "```\n[1, 2]\n```";
        assert_eq!(extract_json(bare_fence), "[1, 2]");
    }

    #[test]
    fn test_extract_json_finds_embedded_object() {
        let chatty = "Here you go: {\"a\": 1} hope that helps";
        assert_eq!(extract_json(chatty), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_passes_plain_text_through() {
        assert_eq!(extract_json("  plain text  "), "plain text");
    }

    #[test]
    fn test_parse_model_json() {
        #[derive(Deserialize)]
        struct Out {
            objective: String,
        }
        let out: Out = parse_model_json("```json\n{\"objective\": \"hi\"}\n```").unwrap();
        assert_eq!(out.objective, "hi");

        assert!(parse_model_json::<Out>("not json at all").is_err());
    }
}
