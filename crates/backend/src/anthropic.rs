use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::openai::error_message;
use crate::{AdapterConfig, BackendError, GenerationRequest, TextGenerator};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Messages API client.
#[derive(Debug, Clone)]
pub struct AnthropicGenerator {
    config: AdapterConfig,
    client: reqwest::Client,
}

impl AnthropicGenerator {
    pub fn with_config(config: AdapterConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicBody<'a> {
    model: &'a str,
    system: String,
    messages: Vec<AnthropicMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

fn build_anthropic_body<'a>(
    config: &'a AdapterConfig,
    request: &'a GenerationRequest,
) -> AnthropicBody<'a> {
    AnthropicBody {
        model: &config.model,
        system: request.system_prompt(),
        messages: vec![AnthropicMessage {
            role: "user",
            content: &request.instruction,
        }],
        max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        temperature: config.temperature_override.or(request.temperature),
    }
}

fn extract_anthropic_text(val: &Value) -> Option<String> {
    val.get("content")
        .and_then(|c| c.as_array())
        .and_then(|arr| {
            let mut buf = String::new();
            for item in arr {
                if let Some(text) = item.get("text").and_then(|t| t.as_str()) {
                    buf.push_str(text);
                }
            }
            if buf.is_empty() {
                None
            } else {
                Some(buf)
            }
        })
        .or_else(|| {
            val.get("content")
                .and_then(|c| c.as_str())
                .map(|s| s.to_string())
        })
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let body = build_anthropic_body(&self.config, request);
        let url = self.config.endpoint("messages");
        debug!(backend = "anthropic", model = %self.config.model, %url, "calling messages api");

        let resp = self
            .client
            .post(url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let parsed: Value = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text }));

        if !status.is_success() {
            let message = error_message(&parsed).unwrap_or_else(|| "anthropic call failed".into());
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        match extract_anthropic_text(&parsed) {
            Some(completion) if !completion.trim().is_empty() => Ok(completion),
            _ => Err(BackendError::EmptyCompletion),
        }
    }
}
