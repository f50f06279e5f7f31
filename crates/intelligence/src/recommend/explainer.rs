//! Generate human-readable explanations for scored suggestions.

use busters_model::{PreferenceRecord, SuggestionItem};

use super::scorer::{relevance_breakdown, EffectivenessScore};

/// Which preferences a single suggestion satisfies.
pub fn explain_item(item: &SuggestionItem, prefs: &PreferenceRecord) -> String {
    let b = relevance_breakdown(item, prefs);
    let mut parts = Vec::new();
    if b.duration {
        parts.push(format!("fits in {} min", prefs.time));
    }
    if b.cost {
        parts.push(format!("within ${:.2}", prefs.budget));
    }
    if b.people {
        parts.push(for_people(prefs.people));
    }
    if b.mood {
        parts.push(format!("suits a {} mood", prefs.mood));
    }

    if parts.is_empty() {
        "Matches none of your preferences".to_string()
    } else {
        let mut text = parts.join(", ");
        if let Some(first) = text.get_mut(..1) {
            first.make_ascii_uppercase();
        }
        text
    }
}

/// Per-criterion tallies across a round of suggestions.
pub fn explain(suggestions: &[SuggestionItem], prefs: &PreferenceRecord) -> String {
    if suggestions.is_empty() {
        return "No suggestions to evaluate".to_string();
    }

    let total = suggestions.len();
    let mut counts = [0usize; 4];
    for item in suggestions {
        let b = relevance_breakdown(item, prefs);
        for (count, hit) in counts.iter_mut().zip([b.duration, b.cost, b.people, b.mood]) {
            if hit {
                *count += 1;
            }
        }
    }

    let labels = [
        format!("fit in {} min", prefs.time),
        format!("within ${:.2}", prefs.budget),
        for_people(prefs.people),
        format!("match a {} mood", prefs.mood),
    ];
    labels
        .iter()
        .zip(counts)
        .map(|(label, count)| format!("{count}/{total} {label}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn for_people(people: u32) -> String {
    match people {
        1 => "for one person".to_string(),
        n => format!("for {n} people"),
    }
}

/// One-line summary of a score.
pub fn summarize(score: &EffectivenessScore) -> String {
    format!(
        "{}: your rating counts {:.0}%, relevance {:.0}%, overall {:.2}",
        score.verdict,
        score.user_feedback * 100.0,
        score.relevance * 100.0,
        score.effectiveness
    )
}
