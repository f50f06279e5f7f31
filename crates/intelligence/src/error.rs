use busters_backend::BackendError;
use thiserror::Error;

/// Failures from a pipeline stage or the suggestion acceptance check.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PipelineError {
    /// No fenced payload could be located or decoded. `raw` keeps the model
    /// output for diagnostics.
    #[error("malformed model output: {reason}")]
    MalformedOutput { reason: String, raw: String },

    #[error("model returned an unknown mood label: {0:?}")]
    InvalidMoodLabel(String),

    #[error("constraints rejected: {}", .0.join(", "))]
    ValidationRejected(Vec<String>),

    #[error("only {got} usable suggestions returned (need at least {min})")]
    InsufficientSuggestions { got: usize, min: usize },

    #[error("no {0} provided")]
    EmptyInput(&'static str),

    #[error(transparent)]
    Generation(#[from] BackendError),

    #[error("{stage} stage failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        stage: &'static str,
        attempts: u32,
        last: Box<PipelineError>,
    },
}

impl PipelineError {
    /// Whether the stage runner should try the round-trip again.
    ///
    /// Model-side flakiness (bad formatting, a label outside the vocabulary,
    /// transient backend failures) is retried. Rejected constraints and
    /// permanent backend errors are surfaced at once.
    pub fn is_retryable(&self) -> bool {
        match self {
            PipelineError::MalformedOutput { .. } | PipelineError::InvalidMoodLabel(_) => true,
            PipelineError::Generation(err) => err.is_transient(),
            PipelineError::ValidationRejected(_)
            | PipelineError::InsufficientSuggestions { .. }
            | PipelineError::EmptyInput(_)
            | PipelineError::RetriesExhausted { .. } => false,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        PipelineError::MalformedOutput {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }

    /// The innermost error, looking through `RetriesExhausted`.
    pub fn root(&self) -> &PipelineError {
        match self {
            PipelineError::RetriesExhausted { last, .. } => last.root(),
            other => other,
        }
    }
}
