//! The user-facing actions, independent of how input is gathered.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use busters_backend::{build_generator, AdapterConfig, BackendKind, TextGenerator};
use busters_intelligence::{
    accept_suggestions, score, EffectivenessScore, Pipeline, PipelineError, RetryPolicy,
};
use busters_model::{
    Catalog, Constraints, FeedbackRecord, Mood, PreferenceRecord, Rating, SuggestionItem,
};
use busters_state::{
    load_catalog_or_builtin, seed_catalog, StoreError, UserStore, CATALOG_FILE, USER_STORE_FILE,
};
use time::OffsetDateTime;
use tracing::debug;

/// Result of the save-preferences action.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved { mood: Mood, record: PreferenceRecord },
    /// Constraint violations, from the local check or from the model.
    Rejected(Vec<String>),
}

/// Result of asking for suggestions.
#[derive(Debug)]
pub enum SuggestOutcome {
    UnknownUser,
    Suggestions {
        prefs: PreferenceRecord,
        items: Vec<SuggestionItem>,
    },
}

enum GeneratorSource {
    /// Built from the environment on first use, so actions that never talk
    /// to the model work without an API key.
    Configured {
        kind: BackendKind,
        model: Option<String>,
    },
    Fixed(Arc<dyn TextGenerator>),
}

/// One user session over a data directory and a text generator.
pub struct Session {
    store: UserStore,
    catalog_path: PathBuf,
    generator: GeneratorSource,
    policy: RetryPolicy,
}

impl Session {
    pub fn new(
        data_dir: &Path,
        kind: BackendKind,
        model: Option<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self::build(data_dir, GeneratorSource::Configured { kind, model }, policy)
    }

    /// Session over an already-built generator.
    pub fn with_generator(
        data_dir: &Path,
        generator: Arc<dyn TextGenerator>,
        policy: RetryPolicy,
    ) -> Self {
        Self::build(data_dir, GeneratorSource::Fixed(generator), policy)
    }

    fn build(data_dir: &Path, generator: GeneratorSource, policy: RetryPolicy) -> Self {
        Self {
            store: UserStore::new(data_dir.join(USER_STORE_FILE)),
            catalog_path: data_dir.join(CATALOG_FILE),
            generator,
            policy,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    fn pipeline(&self) -> Result<Pipeline> {
        let generator = match &self.generator {
            GeneratorSource::Fixed(generator) => generator.clone(),
            GeneratorSource::Configured { kind, model } => {
                let mut config = AdapterConfig::from_env(*kind)
                    .with_context(|| format!("failed to configure {kind} backend"))?;
                if let Some(model) = model {
                    config.model = model.clone();
                }
                debug!(backend = %kind, model = %config.model, "building text generator");
                build_generator(*kind, config)?
            }
        };
        Ok(Pipeline::new(generator, self.policy))
    }

    /// Infer the mood, validate the constraints and store both.
    ///
    /// Out-of-range constraints are rejected locally before any model call.
    pub async fn save_preferences(
        &self,
        user_id: &str,
        responses: &[String],
        constraints: Constraints,
    ) -> Result<SaveOutcome> {
        if user_id.trim().is_empty() {
            return Err(StoreError::EmptyUserId.into());
        }
        let violations = constraints.violations();
        if !violations.is_empty() {
            return Ok(SaveOutcome::Rejected(violations));
        }

        let pipeline = self.pipeline()?;
        let (mood, validated) = match pipeline.collect_preferences(responses, constraints).await {
            Ok(collected) => collected,
            Err(PipelineError::ValidationRejected(errors)) => {
                return Ok(SaveOutcome::Rejected(errors));
            }
            Err(e) => return Err(anyhow::Error::from(e).context("failed to collect preferences")),
        };

        let record = self.store.save_preferences(user_id, mood, validated)?;
        Ok(SaveOutcome::Saved { mood, record })
    }

    /// Ask the model for 3-5 suggestions for a saved user.
    pub async fn fetch_suggestions(&self, user_id: &str) -> Result<SuggestOutcome> {
        let Some(prefs) = self.store.get(user_id) else {
            return Ok(SuggestOutcome::UnknownUser);
        };
        let catalog = self.catalog();
        let pipeline = self.pipeline()?;
        let items = pipeline
            .select_activities(&prefs, &catalog)
            .await
            .context("failed to get suggestions")?;
        let items = accept_suggestions(items)?;
        Ok(SuggestOutcome::Suggestions { prefs, items })
    }

    /// Score a rated round and append it to the user's history.
    pub fn record_feedback(
        &self,
        user_id: &str,
        prefs: &PreferenceRecord,
        suggestions: Vec<SuggestionItem>,
        rating: Rating,
    ) -> Result<EffectivenessScore> {
        let score = score(&suggestions, prefs, rating);
        let mut record = score.feedback_record(suggestions, rating);
        record.recorded_at = Some(OffsetDateTime::now_utc());
        self.store.append_feedback(user_id, record)?;
        Ok(score)
    }

    /// Feedback history, newest first; `None` for an unknown user.
    pub fn history(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Option<Vec<FeedbackRecord>>> {
        match self.store.history(user_id, limit) {
            Ok(records) => Ok(Some(records)),
            Err(StoreError::UnknownUser(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// The catalog in use: the on-disk one, or the built-in seed.
    pub fn catalog(&self) -> Catalog {
        load_catalog_or_builtin(&self.catalog_path)
    }

    pub fn init_catalog(&self, force: bool) -> Result<bool> {
        Ok(seed_catalog(&self.catalog_path, force)?)
    }
}
