//! Configuration file support for busters.
//!
//! Loads settings from `~/.busters/config.toml` (or `BUSTERS_CONFIG`) with
//! the following precedence: CLI arguments > Environment variables > Config file
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.busters/config.toml
//!
//! [backend]
//! # groq | openai | anthropic
//! kind = "groq"
//! model = "llama3-70b-8192"
//! base_url = "https://api.groq.com/openai/v1/"
//! timeout_ms = 60000
//! # Pin the sampling temperature for every stage
//! temperature = 0.3
//!
//! [pipeline]
//! max_attempts = 3
//! retry_delay_ms = 2000
//!
//! [data]
//! dir = "/home/me/.busters/data"
//! ```
//!
//! API keys are read from the environment only.

use anyhow::{Context, Result};
use busters_backend::BackendKind;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Text-generation backend selection.
#[derive(Debug, Default, Deserialize)]
pub struct BackendConfig {
    pub kind: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub temperature: Option<f32>,
}

/// Retry behaviour shared by every stage.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineConfig {
    pub max_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DataConfig {
    pub dir: Option<PathBuf>,
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Err` if the file exists but fails to parse.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = busters_state::config_file() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    tracing::debug!(
        target: "busters::config",
        path = %path.display(),
        "Loaded configuration file"
    );
    Ok(Some(config))
}

/// Applies configuration file settings to environment variables.
///
/// Only sets environment variables that are not already set, preserving
/// the precedence: CLI > ENV > config file. `selected` is the backend named
/// on the command line, if any; provider-specific file settings are keyed
/// to it, falling back to `BUSTERS_BACKEND` and then the default provider.
pub fn apply_config_to_env(selected: Option<BackendKind>) {
    match load_config() {
        Ok(Some(config)) => apply(&config, selected),
        Ok(None) => {}
        Err(e) => tracing::warn!(target: "busters::config", error = %format!("{e:#}"), "Ignoring config file"),
    }
}

fn apply(config: &Config, selected: Option<BackendKind>) {
    // Helper to set env var only if not already set
    fn set_if_absent(key: &str, value: &str) {
        if std::env::var_os(key).is_none() {
            std::env::set_var(key, value);
            tracing::trace!(
                target: "busters::config",
                key,
                "Set environment variable from config file"
            );
        }
    }

    let backend = &config.backend;
    if let Some(ref kind) = backend.kind {
        set_if_absent("BUSTERS_BACKEND", kind);
    }

    // Provider-specific settings follow whichever backend ends up selected.
    let kind = selected
        .or_else(|| {
            std::env::var("BUSTERS_BACKEND")
                .ok()
                .and_then(|k| k.parse::<BackendKind>().ok())
        })
        .unwrap_or_default();
    let prefix = kind.env_prefix();

    if let Some(ref model) = backend.model {
        set_if_absent(&format!("BUSTERS_{prefix}_MODEL"), model);
    }
    if let Some(ref base_url) = backend.base_url {
        set_if_absent(&format!("BUSTERS_{prefix}_BASE_URL"), base_url);
    }
    if let Some(timeout_ms) = backend.timeout_ms {
        set_if_absent(&format!("BUSTERS_{prefix}_TIMEOUT_MS"), &timeout_ms.to_string());
    }
    if let Some(temperature) = backend.temperature {
        set_if_absent(&format!("BUSTERS_{prefix}_TEMPERATURE"), &temperature.to_string());
    }

    if let Some(max_attempts) = config.pipeline.max_attempts {
        set_if_absent("BUSTERS_MAX_ATTEMPTS", &max_attempts.to_string());
    }
    if let Some(delay) = config.pipeline.retry_delay_ms {
        set_if_absent("BUSTERS_RETRY_DELAY_MS", &delay.to_string());
    }
    if let Some(ref dir) = config.data.dir {
        set_if_absent("BUSTERS_DATA_DIR", &dir.to_string_lossy());
    }
}
