use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed mood vocabulary every stage maps onto.
///
/// Serialized as the lower-case label. Deserialization goes through
/// [`FromStr`], so stored labels such as `"Tired"` still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Mood {
    Happy,
    Tired,
    Adventurous,
    Relaxed,
    Social,
}

impl Mood {
    /// All labels, in prompt order.
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Tired,
        Mood::Adventurous,
        Mood::Relaxed,
        Mood::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Tired => "tired",
            Mood::Adventurous => "adventurous",
            Mood::Relaxed => "relaxed",
            Mood::Social => "social",
        }
    }

    /// Case-insensitive comparison against a free-form label.
    pub fn matches(&self, label: &str) -> bool {
        label.trim().eq_ignore_ascii_case(self.as_str())
    }

    /// Comma-separated label list used in prompts and error messages.
    pub fn label_list() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| ModelError::InvalidMood(s.to_string()))
    }
}

impl TryFrom<String> for Mood {
    type Error = ModelError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}
