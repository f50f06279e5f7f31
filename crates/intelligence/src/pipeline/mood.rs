use busters_backend::GenerationRequest;
use busters_model::Mood;
use serde::Deserialize;
use serde_json::Value;

use super::prompts::{MOOD_ANALYZER, MOOD_PROMPT};
use super::Stage;
use crate::{extract_json, PipelineError};

/// Maps free-text answers to one label of the mood vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodStage;

#[derive(Deserialize)]
struct MoodPayload {
    mood: String,
}

impl Stage for MoodStage {
    type Input = [String];
    type Output = Mood;
    const NAME: &'static str = "mood";

    fn request(&self, responses: &[String]) -> GenerationRequest {
        // User text goes in last so it is never scanned for placeholders.
        let instruction = MOOD_PROMPT
            .replace("{labels}", &Mood::label_list())
            .replace("{responses}", &Value::from(responses.to_vec()).to_string());
        MOOD_ANALYZER.request(instruction)
    }

    fn decode(&self, raw: &str) -> Result<Mood, PipelineError> {
        let payload: MoodPayload = extract_json(raw)?;
        payload
            .mood
            .parse()
            .map_err(|_| PipelineError::InvalidMoodLabel(payload.mood))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busters_test_utils::fenced;

    #[test]
    fn request_embeds_responses_and_vocabulary() {
        let responses = vec!["Great, thanks".to_string(), "Hiking".to_string()];
        let request = MoodStage.request(&responses);
        assert_eq!(request.role, "Mood Analyzer");
        assert!(request
            .instruction
            .contains(r#"responses: ["Great, thanks","Hiking"]"#));
        assert!(request
            .instruction
            .contains("happy, tired, adventurous, relaxed, social"));
        assert_eq!(request.temperature, Some(0.5));
        assert_eq!(request.max_tokens, Some(300));
    }

    #[test]
    fn request_leaves_placeholder_text_in_responses_alone() {
        let responses = vec!["I typed {labels} here".to_string()];
        let request = MoodStage.request(&responses);
        assert!(request.instruction.contains(r#"["I typed {labels} here"]"#));
    }

    #[test]
    fn decode_normalizes_label() {
        let mood = MoodStage.decode(&fenced(r#"{"mood": "  Adventurous "}"#)).unwrap();
        assert_eq!(mood, Mood::Adventurous);
    }

    #[test]
    fn decode_rejects_unknown_label() {
        let err = MoodStage.decode(&fenced(r#"{"mood": "grumpy"}"#)).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidMoodLabel(label) if label == "grumpy"));
    }

    #[test]
    fn decode_rejects_missing_key() {
        let err = MoodStage.decode(&fenced(r#"{"feeling": "happy"}"#)).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedOutput { .. }));
    }
}
