use crate::{ModelError, Mood, SuggestionItem};
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

pub const BUDGET_MIN: f64 = 0.0;
pub const BUDGET_MAX: f64 = 1000.0;
pub const TIME_MIN: u32 = 1;
pub const TIME_MAX: u32 = 300;
pub const PEOPLE_MIN: u32 = 1;
pub const PEOPLE_MAX: u32 = 10;

/// Practical constraints: budget in dollars, time in minutes, group size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub budget: f64,
    pub time: u32,
    pub people: u32,
}

impl Constraints {
    pub fn new(budget: f64, time: u32, people: u32) -> Self {
        Self {
            budget,
            time,
            people,
        }
    }

    /// Check every field against its inclusive range.
    ///
    /// Collects all violations rather than stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<ModelError>> {
        let mut errors = Vec::new();
        if !self.budget.is_finite() || !(BUDGET_MIN..=BUDGET_MAX).contains(&self.budget) {
            errors.push(ModelError::OutOfRange {
                field: "budget",
                value: self.budget.to_string(),
                min: BUDGET_MIN.to_string(),
                max: BUDGET_MAX.to_string(),
            });
        }
        if !(TIME_MIN..=TIME_MAX).contains(&self.time) {
            errors.push(ModelError::OutOfRange {
                field: "time",
                value: self.time.to_string(),
                min: TIME_MIN.to_string(),
                max: TIME_MAX.to_string(),
            });
        }
        if !(PEOPLE_MIN..=PEOPLE_MAX).contains(&self.people) {
            errors.push(ModelError::OutOfRange {
                field: "people",
                value: self.people.to_string(),
                min: PEOPLE_MIN.to_string(),
                max: PEOPLE_MAX.to_string(),
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Human-readable violation messages, empty when valid.
    pub fn violations(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Stored per-user preferences plus the feedback history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub mood: Mood,
    pub time: u32,
    pub budget: f64,
    pub people: u32,
    #[serde(default)]
    pub history: Vec<FeedbackRecord>,
}

impl PreferenceRecord {
    pub fn new(mood: Mood, constraints: Constraints) -> Self {
        Self {
            mood,
            time: constraints.time,
            budget: constraints.budget,
            people: constraints.people,
            history: Vec::new(),
        }
    }

    pub fn constraints(&self) -> Constraints {
        Constraints::new(self.budget, self.time, self.people)
    }

    /// Overwrite the scalar fields, leaving history untouched.
    pub fn update(&mut self, mood: Mood, constraints: Constraints) {
        self.mood = mood;
        self.time = constraints.time;
        self.budget = constraints.budget;
        self.people = constraints.people;
    }

    pub fn validate(&self) -> Result<(), Vec<ModelError>> {
        self.constraints().validate()
    }
}

/// A user rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ModelError> {
        Self::try_from(i64::from(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ModelError::InvalidRating(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Categorical verdict derived from the effectiveness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Excellent,
    Good,
    #[serde(rename = "Just OK")]
    JustOk,
    Bad,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent",
            Verdict::Good => "Good",
            Verdict::JustOk => "Just OK",
            Verdict::Bad => "Bad",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rated round of suggestions, appended to a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub suggestions: Vec<SuggestionItem>,
    pub rating: Rating,
    /// User feedback score.
    pub uf: f64,
    /// Relevance score.
    pub rs: f64,
    /// Activity effectiveness score.
    pub aes: f64,
    pub result: Verdict,
    /// When the round was rated; absent in documents written before dating.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub recorded_at: Option<OffsetDateTime>,
}
