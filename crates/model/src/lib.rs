//! Wire-format types shared by every boredom-busters crate.
//!
//! This crate provides:
//! - The fixed mood vocabulary ([`Mood`])
//! - Catalog entries and the model-echoed suggestion shape
//! - Per-user preference records with their append-only feedback history
//! - The built-in seed catalog
//!
//! Field names follow the JSON documents written to disk, so records written
//! by older versions keep loading.

mod activity;
mod error;
mod mood;
mod preferences;

pub use activity::{builtin_catalog, ActivityRecord, Catalog, SuggestionItem};
pub use error::ModelError;
pub use mood::Mood;
pub use preferences::{
    Constraints, FeedbackRecord, PreferenceRecord, Rating, Verdict, BUDGET_MAX, BUDGET_MIN,
    PEOPLE_MAX, PEOPLE_MIN, TIME_MAX, TIME_MIN,
};
