//! Recommendation intelligence for boredom-busters.
//!
//! This crate provides:
//! - Extraction of fenced JSON payloads from free-form model output
//! - The three pipeline stages (mood, constraints, selection) over a single
//!   retrying stage runner
//! - The effectiveness scoring model and its explanation
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use busters_intelligence::{Pipeline, RetryPolicy};
//! # async fn demo(generator: Arc<dyn busters_backend::TextGenerator>) -> Result<(), busters_intelligence::PipelineError> {
//! let pipeline = Pipeline::new(generator, RetryPolicy::default());
//! let mood = pipeline
//!     .infer_mood(&["Pretty good, thanks".to_string()])
//!     .await?;
//! println!("Mood interpreted as: {mood}");
//! # Ok(())
//! # }
//! ```

mod error;
pub mod extract;
pub mod pipeline;
pub mod recommend;

pub use error::PipelineError;
pub use extract::{extract_json, extract_payload};
pub use pipeline::{
    accept_suggestions, ConstraintStage, MoodStage, Pipeline, RetryPolicy, SelectionStage, Stage,
    StageRunner, MAX_SUGGESTIONS, MIN_SUGGESTIONS,
};
pub use recommend::{
    explain, explain_item, relevance_breakdown, relevance_score, score, summarize, verdict_for,
    EffectivenessScore, EffectivenessScorer, RelevanceBreakdown, ScoreWeights, Scorer,
};
