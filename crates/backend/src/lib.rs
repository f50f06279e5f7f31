//! Text-generation backends for boredom-busters.
//!
//! The pipeline treats the model as an opaque capability: given a role, a
//! goal and a task instruction, produce free-form text. [`TextGenerator`] is
//! that seam; the adapters here implement it over HTTP.

pub mod anthropic;
pub mod config;
mod error;
pub mod openai;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

pub use anthropic::AnthropicGenerator;
pub use config::AdapterConfig;
pub use error::BackendError;
pub use openai::OpenAiCompatibleGenerator;

/// One request to the text-generation capability.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationRequest {
    /// Short role name, e.g. "Mood Analyzer".
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// The task instruction sent as the user turn.
    pub instruction: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    /// System prompt assembled from role, backstory and goal.
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!("You are the {}.", self.role);
        if !self.backstory.is_empty() {
            prompt.push(' ');
            prompt.push_str(&self.backstory);
        }
        if !self.goal.is_empty() {
            prompt.push_str("\nYour goal: ");
            prompt.push_str(&self.goal);
        }
        prompt
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &str;
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError>;
}

/// Supported backend providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Groq's OpenAI-compatible endpoint.
    #[default]
    Groq,
    OpenAi,
    Anthropic,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Groq => "groq",
            BackendKind::OpenAi => "openai",
            BackendKind::Anthropic => "anthropic",
        }
    }

    /// Environment variable prefix (`BUSTERS_<PREFIX>_API_KEY`, ...).
    pub fn env_prefix(&self) -> &'static str {
        match self {
            BackendKind::Groq => "GROQ",
            BackendKind::OpenAi => "OPENAI",
            BackendKind::Anthropic => "ANTHROPIC",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            BackendKind::Groq => "https://api.groq.com/openai/v1/",
            BackendKind::OpenAi => "https://api.openai.com/v1/",
            BackendKind::Anthropic => "https://api.anthropic.com/v1/",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            BackendKind::Groq => "llama3-70b-8192",
            BackendKind::OpenAi => "gpt-4o-mini",
            BackendKind::Anthropic => "claude-3-5-haiku-latest",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(BackendKind::Groq),
            "openai" => Ok(BackendKind::OpenAi),
            "anthropic" | "claude" => Ok(BackendKind::Anthropic),
            other => Err(BackendError::InvalidConfig(format!(
                "unknown backend '{other}', expected groq, openai or anthropic"
            ))),
        }
    }
}

/// Build the generator for `kind` from an explicit configuration.
pub fn build_generator(
    kind: BackendKind,
    config: AdapterConfig,
) -> Result<Arc<dyn TextGenerator>, BackendError> {
    Ok(match kind {
        BackendKind::Groq | BackendKind::OpenAi => {
            Arc::new(OpenAiCompatibleGenerator::with_config(kind, config)?)
        }
        BackendKind::Anthropic => Arc::new(AnthropicGenerator::with_config(config)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_includes_role_backstory_and_goal() {
        let request = GenerationRequest {
            role: "Mood Analyzer".into(),
            goal: "Classify the mood.".into(),
            backstory: "You read people well.".into(),
            ..Default::default()
        };
        assert_eq!(
            request.system_prompt(),
            "You are the Mood Analyzer. You read people well.\nYour goal: Classify the mood."
        );
    }

    #[test]
    fn backend_kind_parses_aliases() {
        assert_eq!("GROQ".parse::<BackendKind>().unwrap(), BackendKind::Groq);
        assert_eq!("claude".parse::<BackendKind>().unwrap(), BackendKind::Anthropic);
        assert!("llamafile".parse::<BackendKind>().is_err());
    }
}
