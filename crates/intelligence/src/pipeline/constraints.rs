use busters_backend::GenerationRequest;
use busters_model::{
    Constraints, BUDGET_MAX, BUDGET_MIN, PEOPLE_MAX, PEOPLE_MIN, TIME_MAX, TIME_MIN,
};
use serde_json::{json, Value};

use super::prompts::{CONSTRAINTS_PROMPT, INFO_COLLECTOR};
use super::Stage;
use crate::{extract_json, PipelineError};

/// Has the model echo the constraint triple back, then re-checks it locally.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintStage;

impl Stage for ConstraintStage {
    type Input = Constraints;
    type Output = Constraints;
    const NAME: &'static str = "constraints";

    fn request(&self, constraints: &Constraints) -> GenerationRequest {
        let echoed = json!({
            "budget": constraints.budget,
            "time": constraints.time,
            "people": constraints.people,
        });
        let instruction = CONSTRAINTS_PROMPT
            .replace("{constraints}", &echoed.to_string())
            .replace("{budget_min}", &BUDGET_MIN.to_string())
            .replace("{budget_max}", &BUDGET_MAX.to_string())
            .replace("{time_min}", &TIME_MIN.to_string())
            .replace("{time_max}", &TIME_MAX.to_string())
            .replace("{people_min}", &PEOPLE_MIN.to_string())
            .replace("{people_max}", &PEOPLE_MAX.to_string());
        INFO_COLLECTOR.request(instruction)
    }

    fn decode(&self, raw: &str) -> Result<Constraints, PipelineError> {
        let value: Value = extract_json(raw)?;

        if let Some(errors) = value.get("errors") {
            let errors: Vec<String> = serde_json::from_value(errors.clone()).map_err(|e| {
                PipelineError::malformed(format!("errors must be a list of strings: {e}"), raw)
            })?;
            if !errors.is_empty() {
                return Err(PipelineError::ValidationRejected(errors));
            }
        }

        let constraints: Constraints = serde_json::from_value(value)
            .map_err(|e| PipelineError::malformed(format!("invalid constraints: {e}"), raw))?;

        // The model's echo is not trusted; bounds are checked here as well.
        let violations = constraints.violations();
        if !violations.is_empty() {
            return Err(PipelineError::ValidationRejected(violations));
        }
        Ok(constraints)
    }
}
