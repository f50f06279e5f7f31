//! Agent personas and instruction templates for the three stages.

use busters_backend::GenerationRequest;

/// Role, goal and sampling settings for one stage's model persona.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AgentProfile {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl AgentProfile {
    pub fn request(&self, instruction: String) -> GenerationRequest {
        GenerationRequest {
            role: self.role.to_string(),
            goal: self.goal.to_string(),
            backstory: self.backstory.to_string(),
            instruction,
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
        }
    }
}

pub(crate) const MOOD_ANALYZER: AgentProfile = AgentProfile {
    role: "Mood Analyzer",
    goal: "Analyze the user's emotional state based on their responses to questions.",
    backstory: "You are an empathetic AI skilled at understanding human emotions. \
        You analyze responses to determine the user's mood and map it to a predefined category.",
    temperature: 0.5,
    max_tokens: 300,
};

pub(crate) const INFO_COLLECTOR: AgentProfile = AgentProfile {
    role: "Info Collector",
    goal: "Gather and validate user's practical constraints such as budget, time, and number of people.",
    backstory: "You are a meticulous AI designed to collect and validate user constraints. \
        You ensure inputs are structured for downstream use.",
    temperature: 0.5,
    max_tokens: 300,
};

pub(crate) const ACTIVITY_RECOMMENDER: AgentProfile = AgentProfile {
    role: "Activity Recommender",
    goal: "Suggest 3-5 customized activities that match the user's mood and constraints.",
    backstory: "You are a creative AI with expertise in curating fun and engaging activities. \
        You recommend tailored experiences based on mood and constraints.",
    temperature: 0.7,
    max_tokens: 600,
};

pub(crate) const MOOD_PROMPT: &str = r#"Analyze the user's mood based on their responses: {responses}. Map to one of: {labels}. Return a JSON object wrapped in ```json
...
```, e.g., ```json
{"mood": "tired"}
```. Ensure output is valid JSON with no extra text."#;

pub(crate) const CONSTRAINTS_PROMPT: &str = r#"Validate user constraints: {constraints}. Ensure budget ({budget_min}-{budget_max}), time ({time_min}-{time_max} minutes), people ({people_min}-{people_max}). Return a JSON object wrapped in ```json
...
```, e.g., ```json
{"budget": 5.0, "time": 60, "people": 1}
```. Include an 'errors' list if validation fails, e.g., ```json
{"errors": ["Invalid budget"]}
```. Ensure output is valid JSON with no extra text."#;

pub(crate) const SELECTION_PROMPT: &str = r#"User preferences: mood={mood}, time={time} minutes, budget=${budget}, people={people}. Available activities: {catalog}. Suggest {min}-{max} activities that match the preferences. Each activity must include name, duration (minutes), cost ($), people, mood, and description. Return a JSON list wrapped in ```json
...
```, e.g., ```json
[{"name": "Activity", "duration": 30, "cost": 0, "people": 1, "mood": "tired", "description": "Description"}]
```. Ensure output is valid JSON with no extra text."#;
