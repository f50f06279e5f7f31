//! Effectiveness scoring for a rated round of suggestions.
//!
//! This module provides:
//! - Per-suggestion relevance against the stored preferences
//! - The combined effectiveness score and its verdict
//! - Human-readable explanations of both

pub mod explainer;
pub mod scorer;

pub use explainer::{explain, explain_item, summarize};
pub use scorer::{
    relevance_breakdown, relevance_score, score, verdict_for, EffectivenessScore,
    EffectivenessScorer, RelevanceBreakdown, ScoreWeights, Scorer,
};
