//! User feedback, relevance and effectiveness scores.

use busters_model::{FeedbackRecord, PreferenceRecord, Rating, SuggestionItem, Verdict};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Each satisfied relevance criterion is worth this much.
const CRITERION_WEIGHT: f64 = 0.25;

const EXCELLENT_THRESHOLD: f64 = 1.8;
const GOOD_THRESHOLD: f64 = 1.5;
const JUST_OK_THRESHOLD: f64 = 1.0;

/// Weights of the two components of the effectiveness score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub user_feedback: f64,
    pub relevance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            user_feedback: 0.6,
            relevance: 0.4,
        }
    }
}

/// Which of the four criteria a single suggestion meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelevanceBreakdown {
    /// Duration fits in the preferred time.
    pub duration: bool,
    /// Cost is within budget.
    pub cost: bool,
    /// Designed for exactly the preferred group size.
    pub people: bool,
    /// Mood label matches, ignoring case.
    pub mood: bool,
}

impl RelevanceBreakdown {
    pub fn matched(&self) -> usize {
        [self.duration, self.cost, self.people, self.mood]
            .into_iter()
            .filter(|m| *m)
            .count()
    }

    /// Item score in [0.0, 1.0].
    pub fn score(&self) -> f64 {
        self.matched() as f64 * CRITERION_WEIGHT
    }
}

pub fn relevance_breakdown(item: &SuggestionItem, prefs: &PreferenceRecord) -> RelevanceBreakdown {
    RelevanceBreakdown {
        duration: item.duration <= prefs.time,
        cost: item.cost <= prefs.budget,
        people: item.people == prefs.people,
        mood: prefs.mood.matches(&item.mood),
    }
}

/// Mean item score; 0.0 for an empty list.
pub fn relevance_score(suggestions: &[SuggestionItem], prefs: &PreferenceRecord) -> f64 {
    if suggestions.is_empty() {
        return 0.0;
    }
    let total: f64 = suggestions
        .iter()
        .map(|item| relevance_breakdown(item, prefs).score())
        .sum();
    total / suggestions.len() as f64
}

/// Verdict cascade, highest threshold first.
///
/// With the default weights the score never exceeds 1.0, so only
/// `JustOk` and `Bad` occur in practice.
pub fn verdict_for(effectiveness: f64) -> Verdict {
    if effectiveness >= EXCELLENT_THRESHOLD {
        Verdict::Excellent
    } else if effectiveness >= GOOD_THRESHOLD {
        Verdict::Good
    } else if effectiveness >= JUST_OK_THRESHOLD {
        Verdict::JustOk
    } else {
        Verdict::Bad
    }
}

/// The UF / RS / AES tuple and its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectivenessScore {
    pub user_feedback: f64,
    pub relevance: f64,
    pub effectiveness: f64,
    pub verdict: Verdict,
}

impl EffectivenessScore {
    /// History entry carrying this score verbatim. `recorded_at` is left for
    /// the caller to stamp.
    pub fn feedback_record(
        &self,
        suggestions: Vec<SuggestionItem>,
        rating: Rating,
    ) -> FeedbackRecord {
        FeedbackRecord {
            suggestions,
            rating,
            uf: self.user_feedback,
            rs: self.relevance,
            aes: self.effectiveness,
            result: self.verdict,
            recorded_at: None,
        }
    }
}

/// Trait for scoring a rated round of suggestions.
pub trait Scorer {
    fn score(
        &self,
        suggestions: &[SuggestionItem],
        prefs: &PreferenceRecord,
        rating: Rating,
    ) -> EffectivenessScore;
}

/// Weighted sum of user feedback and relevance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectivenessScorer {
    weights: ScoreWeights,
}

impl EffectivenessScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }
}

impl Scorer for EffectivenessScorer {
    fn score(
        &self,
        suggestions: &[SuggestionItem],
        prefs: &PreferenceRecord,
        rating: Rating,
    ) -> EffectivenessScore {
        let user_feedback = f64::from(rating.get()) / f64::from(Rating::MAX);
        let relevance = relevance_score(suggestions, prefs);
        let effectiveness =
            self.weights.user_feedback * user_feedback + self.weights.relevance * relevance;
        let verdict = verdict_for(effectiveness);
        info!(
            uf = user_feedback,
            rs = relevance,
            aes = effectiveness,
            %verdict,
            "scored suggestions"
        );
        EffectivenessScore {
            user_feedback,
            relevance,
            effectiveness,
            verdict,
        }
    }
}

/// Score with the default weights.
pub fn score(
    suggestions: &[SuggestionItem],
    prefs: &PreferenceRecord,
    rating: Rating,
) -> EffectivenessScore {
    EffectivenessScorer::default().score(suggestions, prefs, rating)
}
