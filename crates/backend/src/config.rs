use std::time::Duration;

use reqwest::Url;

use crate::{BackendError, BackendKind};

pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Explicit adapter configuration, built once at start-up and handed to the
/// generator constructor.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub api_key: String,
    pub base_url: Url,
    pub model: String,
    pub timeout: Duration,
    /// Replaces each stage's own sampling temperature when set.
    pub temperature_override: Option<f32>,
}

impl AdapterConfig {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        model: impl Into<String>,
    ) -> Result<Self, BackendError> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: parse_base_url(base_url)?,
            model: model.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            temperature_override: None,
        })
    }

    /// Read configuration for `kind` from the environment.
    ///
    /// The API key comes from `BUSTERS_<PREFIX>_API_KEY`, falling back to the
    /// provider's conventional `<PREFIX>_API_KEY`. Base URL, model and timeout
    /// use `BUSTERS_<PREFIX>_BASE_URL`, `BUSTERS_<PREFIX>_MODEL` and
    /// `BUSTERS_<PREFIX>_TIMEOUT_MS`, defaulting per provider.
    /// `BUSTERS_<PREFIX>_TEMPERATURE` pins the sampling temperature.
    pub fn from_env(kind: BackendKind) -> Result<Self, BackendError> {
        let prefix = kind.env_prefix();
        let key_var = format!("BUSTERS_{prefix}_API_KEY");
        let fallback_var = format!("{prefix}_API_KEY");
        let api_key = std::env::var(&key_var)
            .or_else(|_| std::env::var(&fallback_var))
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| BackendError::MissingApiKey(key_var.clone()))?;

        let base_var = format!("BUSTERS_{prefix}_BASE_URL");
        let base_url = std::env::var(&base_var)
            .ok()
            .unwrap_or_else(|| kind.default_base_url().to_string());
        let base_url = parse_base_url(&base_url).map_err(|_| {
            BackendError::InvalidConfig(format!("invalid {base_var} url: {base_url}"))
        })?;

        let model_var = format!("BUSTERS_{prefix}_MODEL");
        let model = std::env::var(&model_var).unwrap_or_else(|_| kind.default_model().to_string());

        let timeout_var = format!("BUSTERS_{prefix}_TIMEOUT_MS");
        let timeout_ms = std::env::var(&timeout_var)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let temperature_var = format!("BUSTERS_{prefix}_TEMPERATURE");
        let temperature_override = match std::env::var(&temperature_var) {
            Ok(raw) => Some(raw.trim().parse::<f32>().map_err(|_| {
                BackendError::InvalidConfig(format!("invalid {temperature_var}: {raw}"))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            timeout: Duration::from_millis(timeout_ms),
            temperature_override,
        })
    }

    /// Resolve an endpoint path against the base URL.
    pub fn endpoint(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins append.
fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let mut url = Url::parse(raw)
        .map_err(|e| BackendError::InvalidConfig(format!("invalid base url {raw}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
