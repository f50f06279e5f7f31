//! The three model-backed stages and the runner that drives them.
//!
//! Every stage is a pair of an instruction builder and a result decoder
//! ([`Stage`]). [`StageRunner`] owns the shared skeleton: one round-trip to
//! the text generator, fenced-payload extraction and decoding, and a bounded
//! number of retries with a fixed delay for failures worth retrying.

mod constraints;
mod mood;
mod prompts;
mod selection;

use std::sync::Arc;
use std::time::Duration;

use busters_backend::{GenerationRequest, TextGenerator};
use busters_model::{Catalog, Constraints, Mood, PreferenceRecord, SuggestionItem};
use tracing::{debug, error, info, warn};

use crate::PipelineError;

pub use constraints::ConstraintStage;
pub use mood::MoodStage;
pub use selection::SelectionStage;

/// Fewest suggestions a selection round may return.
pub const MIN_SUGGESTIONS: usize = 3;
/// Suggestions beyond this many are dropped.
pub const MAX_SUGGESTIONS: usize = 5;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// One model-backed step: build the instruction, decode the reply.
pub trait Stage {
    type Input: ?Sized;
    type Output;
    /// Stage name used in logs and errors.
    const NAME: &'static str;

    fn request(&self, input: &Self::Input) -> GenerationRequest;
    fn decode(&self, raw: &str) -> Result<Self::Output, PipelineError>;
}

/// How many round-trips a stage gets and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// `max_attempts` is clamped to at least one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Read `BUSTERS_MAX_ATTEMPTS` and `BUSTERS_RETRY_DELAY_MS`, keeping the
    /// default for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_attempts = read_env_number("BUSTERS_MAX_ATTEMPTS")
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(defaults.max_attempts);
        let delay = read_env_number("BUSTERS_RETRY_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.delay);
        Self::new(max_attempts, delay)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

fn read_env_number(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(target: "busters::config", %key, value = %raw, "ignoring non-numeric value");
            None
        }
    }
}

/// Drives any [`Stage`] through generate, decode and retry.
#[derive(Clone)]
pub struct StageRunner {
    generator: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
}

impl StageRunner {
    pub fn new(generator: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }

    /// Run `stage` until it decodes, hits a non-retryable failure, or runs
    /// out of attempts.
    pub async fn run<S: Stage>(
        &self,
        stage: &S,
        input: &S::Input,
    ) -> Result<S::Output, PipelineError> {
        let request = stage.request(input);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let outcome = match self.generator.generate(&request).await {
                Ok(raw) => {
                    debug!(stage = S::NAME, attempt, backend = self.generator.name(), %raw, "model output");
                    stage.decode(&raw)
                }
                Err(err) => Err(PipelineError::Generation(err)),
            };

            let err = match outcome {
                Ok(output) => {
                    if attempt > 1 {
                        info!(stage = S::NAME, attempt, "stage succeeded after retry");
                    }
                    return Ok(output);
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                warn!(stage = S::NAME, attempt, error = %err, "stage failed");
                return Err(err);
            }
            if attempt >= self.policy.max_attempts {
                error!(stage = S::NAME, attempts = attempt, error = %err, "stage retries exhausted");
                return Err(PipelineError::RetriesExhausted {
                    stage: S::NAME,
                    attempts: attempt,
                    last: Box::new(err),
                });
            }

            warn!(
                stage = S::NAME,
                attempt,
                max_attempts = self.policy.max_attempts,
                error = %err,
                "stage attempt failed, retrying"
            );
            if !self.policy.delay.is_zero() {
                tokio::time::sleep(self.policy.delay).await;
            }
        }
    }
}

/// The mood, constraint and selection stages over one generator.
#[derive(Clone)]
pub struct Pipeline {
    runner: StageRunner,
}

impl Pipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self {
            runner: StageRunner::new(generator, policy),
        }
    }

    /// Classify free-text answers into one mood label.
    pub async fn infer_mood(&self, responses: &[String]) -> Result<Mood, PipelineError> {
        if responses.iter().all(|r| r.trim().is_empty()) {
            return Err(PipelineError::EmptyInput("responses"));
        }
        self.runner.run(&MoodStage, responses).await
    }

    /// Have the model validate the constraint triple, returning the echoed
    /// values once they also pass the local bounds check.
    pub async fn validate_constraints(
        &self,
        constraints: Constraints,
    ) -> Result<Constraints, PipelineError> {
        self.runner.run(&ConstraintStage, &constraints).await
    }

    /// Mood then constraints, strictly in that order.
    pub async fn collect_preferences(
        &self,
        responses: &[String],
        constraints: Constraints,
    ) -> Result<(Mood, Constraints), PipelineError> {
        let mood = self.infer_mood(responses).await?;
        let constraints = self.validate_constraints(constraints).await?;
        Ok((mood, constraints))
    }

    /// Ask for suggestions matching `prefs`. The result is unchecked; see
    /// [`accept_suggestions`].
    pub async fn select_activities(
        &self,
        prefs: &PreferenceRecord,
        catalog: &Catalog,
    ) -> Result<Vec<SuggestionItem>, PipelineError> {
        if catalog.is_empty() {
            return Err(PipelineError::EmptyInput("activity catalog"));
        }
        self.runner.run(&SelectionStage::new(catalog), prefs).await
    }
}

/// Enforce the suggestion count: too few is an error, extras are dropped.
pub fn accept_suggestions(
    mut items: Vec<SuggestionItem>,
) -> Result<Vec<SuggestionItem>, PipelineError> {
    if items.len() < MIN_SUGGESTIONS {
        return Err(PipelineError::InsufficientSuggestions {
            got: items.len(),
            min: MIN_SUGGESTIONS,
        });
    }
    if items.len() > MAX_SUGGESTIONS {
        warn!(
            got = items.len(),
            kept = MAX_SUGGESTIONS,
            "truncating surplus suggestions"
        );
        items.truncate(MAX_SUGGESTIONS);
    }
    Ok(items)
}
