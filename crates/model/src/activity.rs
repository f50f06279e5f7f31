use crate::Mood;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub name: String,
    /// Duration in minutes.
    pub duration: u32,
    /// Cost in dollars.
    pub cost: f64,
    /// Number of people the activity is designed for.
    pub people: u32,
    pub mood: Mood,
    pub description: String,
}

/// Activity catalog keyed by synthetic id (`activity1`, `activity2`, ...).
///
/// Insertion order is kept so the serialized catalog handed to the model
/// matches the document on disk.
pub type Catalog = IndexMap<String, ActivityRecord>;

/// One suggestion as echoed back by the selection stage.
///
/// Suggestions are model-generated and may not correspond to a catalog key;
/// only the shape is guaranteed by decoding. `mood` stays a free-form string
/// for the same reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub name: String,
    pub duration: u32,
    pub cost: f64,
    pub people: u32,
    pub mood: String,
    pub description: String,
}

#[rustfmt::skip]
const SEED: [(&str, u32, f64, u32, Mood, &str); 30] = [
    ("Watch a Comedy Movie", 90, 10.0, 1, Mood::Happy, "Laugh out loud with a funny movie at home or in a theater."),
    ("Take a Nap", 30, 0.0, 1, Mood::Tired, "Rest and recharge with a short nap."),
    ("Go Hiking", 120, 5.0, 2, Mood::Adventurous, "Explore a nearby trail and enjoy nature."),
    ("Meditate", 20, 0.0, 1, Mood::Relaxed, "Find inner peace with a guided meditation session."),
    ("Board Game Night", 60, 0.0, 4, Mood::Social, "Gather friends for a fun board game session."),
    ("Visit a Museum", 90, 15.0, 2, Mood::Happy, "Explore art or history at a local museum."),
    ("Read a Book", 60, 0.0, 1, Mood::Tired, "Dive into a novel or non-fiction at home."),
    ("Rock Climbing", 60, 20.0, 2, Mood::Adventurous, "Challenge yourself at an indoor climbing gym."),
    ("Spa Day", 120, 50.0, 1, Mood::Relaxed, "Pamper yourself with a spa treatment."),
    ("Karaoke Night", 90, 10.0, 4, Mood::Social, "Sing your heart out with friends."),
    ("Picnic in the Park", 60, 5.0, 3, Mood::Happy, "Enjoy a meal outdoors with friends or family."),
    ("Listen to a Podcast", 45, 0.0, 1, Mood::Tired, "Relax with an engaging podcast episode."),
    ("Kayaking", 90, 25.0, 2, Mood::Adventurous, "Paddle on a nearby lake or river."),
    ("Yoga Session", 45, 5.0, 1, Mood::Relaxed, "Stretch and unwind with a yoga class."),
    ("Trivia Night", 60, 5.0, 4, Mood::Social, "Test your knowledge at a local pub quiz."),
    ("Bake Cookies", 60, 5.0, 2, Mood::Happy, "Have fun baking sweet treats at home."),
    ("Watch a Sunset", 30, 0.0, 1, Mood::Tired, "Relax while watching a beautiful sunset."),
    ("Bike Tour", 90, 10.0, 2, Mood::Adventurous, "Cycle through scenic routes in your area."),
    ("Massage", 60, 40.0, 1, Mood::Relaxed, "Relieve stress with a professional massage."),
    ("Dance Party", 60, 0.0, 4, Mood::Social, "Dance to your favorite tunes with friends."),
    ("Visit a Farmers Market", 60, 10.0, 2, Mood::Happy, "Shop for fresh produce and local goods."),
    ("Journaling", 30, 0.0, 1, Mood::Tired, "Reflect on your day with a journaling session."),
    ("Ziplining", 60, 30.0, 2, Mood::Adventurous, "Experience an adrenaline rush with ziplining."),
    ("Hot Bath", 30, 0.0, 1, Mood::Relaxed, "Soak in a warm bath to unwind."),
    ("Movie Marathon", 120, 0.0, 3, Mood::Social, "Watch a series of movies with friends."),
    ("Photography Walk", 60, 0.0, 1, Mood::Happy, "Capture beautiful moments in your neighborhood."),
    ("Deep Breathing Exercises", 15, 0.0, 1, Mood::Tired, "Calm your mind with breathing exercises."),
    ("Camping Trip", 120, 20.0, 3, Mood::Adventurous, "Spend time in nature with a camping adventure."),
    ("Aromatherapy", 30, 5.0, 1, Mood::Relaxed, "Use essential oils to create a calming atmosphere."),
    ("Potluck Dinner", 90, 5.0, 5, Mood::Social, "Share dishes with friends at a potluck."),
];

/// The built-in seed catalog, six activities per mood.
pub fn builtin_catalog() -> Catalog {
    SEED.iter()
        .enumerate()
        .map(|(i, &(name, duration, cost, people, mood, description))| {
            (
                format!("activity{}", i + 1),
                ActivityRecord {
                    name: name.to_string(),
                    duration,
                    cost,
                    people,
                    mood,
                    description: description.to_string(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_keyed_in_order() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 30);
        let first = catalog.get_index(0).unwrap();
        assert_eq!(first.0, "activity1");
        assert_eq!(first.1.name, "Watch a Comedy Movie");
        assert_eq!(catalog["activity30"].name, "Potluck Dinner");
    }

    #[test]
    fn builtin_catalog_covers_every_mood_equally() {
        let catalog = builtin_catalog();
        for mood in Mood::ALL {
            let count = catalog.values().filter(|a| a.mood == mood).count();
            assert_eq!(count, 6, "mood {mood}");
        }
    }

    #[test]
    fn suggestion_requires_all_fields() {
        let missing_description = r#"{"name":"Nap","duration":30,"cost":0,"people":1,"mood":"tired"}"#;
        assert!(serde_json::from_str::<SuggestionItem>(missing_description).is_err());

        let wrong_type = r#"{"name":"Nap","duration":"thirty","cost":0,"people":1,"mood":"tired","description":"z"}"#;
        assert!(serde_json::from_str::<SuggestionItem>(wrong_type).is_err());
    }
}
