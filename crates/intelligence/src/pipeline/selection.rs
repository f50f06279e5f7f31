use busters_backend::GenerationRequest;
use busters_model::{Catalog, PreferenceRecord, SuggestionItem};

use super::prompts::{ACTIVITY_RECOMMENDER, SELECTION_PROMPT};
use super::{Stage, MAX_SUGGESTIONS, MIN_SUGGESTIONS};
use crate::{extract_json, PipelineError};

/// Picks suggestions from the catalog for a stored preference record.
#[derive(Debug, Clone, Copy)]
pub struct SelectionStage<'a> {
    catalog: &'a Catalog,
}

impl<'a> SelectionStage<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }
}

impl Stage for SelectionStage<'_> {
    type Input = PreferenceRecord;
    type Output = Vec<SuggestionItem>;
    const NAME: &'static str = "selection";

    fn request(&self, prefs: &PreferenceRecord) -> GenerationRequest {
        // String-keyed map of plain records; serialization cannot fail.
        let catalog = serde_json::to_string_pretty(self.catalog).unwrap_or_default();
        let instruction = SELECTION_PROMPT
            .replace("{mood}", prefs.mood.as_str())
            .replace("{time}", &prefs.time.to_string())
            .replace("{budget}", &prefs.budget.to_string())
            .replace("{people}", &prefs.people.to_string())
            .replace("{min}", &MIN_SUGGESTIONS.to_string())
            .replace("{max}", &MAX_SUGGESTIONS.to_string())
            .replace("{catalog}", &catalog);
        ACTIVITY_RECOMMENDER.request(instruction)
    }

    fn decode(&self, raw: &str) -> Result<Vec<SuggestionItem>, PipelineError> {
        extract_json(raw)
    }
}
