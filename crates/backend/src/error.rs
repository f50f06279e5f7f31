use thiserror::Error;

/// Failures talking to a text-generation backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("{0} must be set to call the text-generation backend")]
    MissingApiKey(String),

    #[error("invalid backend configuration: {0}")]
    InvalidConfig(String),

    #[error("request to text-generation backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status, with the provider's error message when present.
    #[error("text-generation backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("text-generation backend returned an empty completion")]
    EmptyCompletion,
}

impl BackendError {
    /// Whether a retry has a chance of succeeding.
    ///
    /// Configuration problems and auth failures are permanent; timeouts,
    /// rate limits and server errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::MissingApiKey(_) | BackendError::InvalidConfig(_) => false,
            BackendError::Transport(_) | BackendError::EmptyCompletion => true,
            BackendError::Status { status, .. } => {
                matches!(status, 408 | 409 | 429) || *status >= 500
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        let status = |status| BackendError::Status {
            status,
            message: String::new(),
        };
        assert!(status(429).is_transient());
        assert!(status(503).is_transient());
        assert!(status(529).is_transient());
        assert!(!status(401).is_transient());
        assert!(!status(400).is_transient());
        assert!(!BackendError::MissingApiKey("GROQ_API_KEY".into()).is_transient());
        assert!(BackendError::EmptyCompletion.is_transient());
    }
}
