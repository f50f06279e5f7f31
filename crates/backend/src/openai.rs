use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::{AdapterConfig, BackendError, BackendKind, GenerationRequest, TextGenerator};

/// Chat-completions client for OpenAI-compatible endpoints (Groq, OpenAI).
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleGenerator {
    kind: BackendKind,
    config: AdapterConfig,
    client: reqwest::Client,
}

impl OpenAiCompatibleGenerator {
    pub fn with_config(kind: BackendKind, config: AdapterConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            kind,
            config,
            client,
        })
    }
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OpenAiBody<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

fn build_openai_body<'a>(
    config: &'a AdapterConfig,
    system: &'a str,
    request: &'a GenerationRequest,
) -> OpenAiBody<'a> {
    OpenAiBody {
        model: &config.model,
        messages: vec![
            OpenAiMessage {
                role: "system",
                content: system,
            },
            OpenAiMessage {
                role: "user",
                content: &request.instruction,
            },
        ],
        temperature: config.temperature_override.or(request.temperature),
        max_tokens: request.max_tokens,
    }
}

fn extract_openai_text(val: &Value) -> Option<String> {
    val.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|content| {
            if let Some(s) = content.as_str() {
                return Some(s.to_string());
            }
            if let Some(arr) = content.as_array() {
                let mut buf = String::new();
                for item in arr {
                    if let Some(text) = item.get("text").and_then(|t| t.as_str()) {
                        buf.push_str(text);
                    }
                }
                if !buf.is_empty() {
                    return Some(buf);
                }
            }
            None
        })
}

/// Provider error message from a failed response body, if any.
pub(crate) fn error_message(parsed: &Value) -> Option<String> {
    parsed
        .get("error")
        .and_then(|e| e.get("message").or(Some(e)))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}

#[async_trait]
impl TextGenerator for OpenAiCompatibleGenerator {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let system = request.system_prompt();
        let body = build_openai_body(&self.config, &system, request);
        let url = self.config.endpoint("chat/completions");
        debug!(backend = self.name(), model = %self.config.model, %url, "calling chat completions");

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let parsed: Value = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text }));

        if !status.is_success() {
            let message = error_message(&parsed)
                .unwrap_or_else(|| format!("{} call failed", self.name()));
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        match extract_openai_text(&parsed) {
            Some(completion) if !completion.trim().is_empty() => Ok(completion),
            _ => Err(BackendError::EmptyCompletion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> GenerationRequest {
        GenerationRequest {
            role: "Mood Analyzer".into(),
            goal: "Classify mood".into(),
            backstory: String::new(),
            instruction: "Analyze: [\"great\"]".into(),
            temperature: Some(0.5),
            max_tokens: Some(300),
        }
    }

    async fn generator(server: &MockServer) -> OpenAiCompatibleGenerator {
        let config = AdapterConfig::new("test-key", &server.uri(), "llama3-70b-8192").unwrap();
        OpenAiCompatibleGenerator::with_config(BackendKind::Groq, config).unwrap()
    }

    #[test]
    fn body_carries_system_and_user_turns() {
        let req = request();
        let system = req.system_prompt();
        let config = AdapterConfig::new("k", "https://api.groq.com/openai/v1", "m").unwrap();
        let body = serde_json::to_value(build_openai_body(&config, &system, &req)).unwrap();
        assert_eq!(body["model"], "m");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Analyze: [\"great\"]");
        assert_eq!(body["max_tokens"], 300);
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn temperature_override_replaces_stage_temperature() {
        let req = request();
        let system = req.system_prompt();
        let mut config = AdapterConfig::new("k", "https://api.groq.com/openai/v1", "m").unwrap();
        config.temperature_override = Some(0.0);
        let body = serde_json::to_value(build_openai_body(&config, &system, &req)).unwrap();
        assert_eq!(body["temperature"], 0.0);
    }

    #[test]
    fn extract_handles_content_parts() {
        let val = json!({"choices": [{"message": {"content": [{"text": "a"}, {"text": "b"}]}}]});
        assert_eq!(extract_openai_text(&val).as_deref(), Some("ab"));
        assert!(extract_openai_text(&json!({"choices": []})).is_none());
    }

    #[tokio::test]
    async fn generate_returns_completion_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": "llama3-70b-8192"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "```json\n{\"mood\": \"happy\"}\n```"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = generator(&server).await.generate(&request()).await.unwrap();
        assert!(text.contains("\"mood\": \"happy\""));
    }

    #[tokio::test]
    async fn generate_surfaces_provider_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API Key"}
            })))
            .mount(&server)
            .await;

        let err = generator(&server).await.generate(&request()).await.unwrap_err();
        match err {
            BackendError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_rejects_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "   "}}]
            })))
            .mount(&server)
            .await;

        let err = generator(&server).await.generate(&request()).await.unwrap_err();
        assert!(matches!(err, BackendError::EmptyCompletion));
    }
}
