//! Console formatting for action results.

use busters_intelligence::{explain, explain_item, summarize, EffectivenessScore, PipelineError};
use busters_model::{Catalog, FeedbackRecord, PreferenceRecord, SuggestionItem};
use time::format_description::well_known::Rfc3339;

/// Numbered suggestion list with indented descriptions.
pub fn suggestions(items: &[SuggestionItem]) -> String {
    let mut out = String::from("\nActivity Suggestions:\n");
    for (i, s) in items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({} min, ${}, {} people)\n   {}\n",
            i + 1,
            s.name,
            s.duration,
            s.cost,
            s.people,
            s.description
        ));
    }
    out
}

pub fn metrics(score: &EffectivenessScore) -> String {
    format!(
        "\nPerformance Metrics:\n\
         User Feedback (UF): {:.2}\n\
         Relevance Score (RS): {:.2}\n\
         Activity Effectiveness Score (AES): {:.2}\n\
         Result: {}\n",
        score.user_feedback, score.relevance, score.effectiveness, score.verdict
    )
}

/// Which preferences the round met, per suggestion and overall.
pub fn explanation(
    items: &[SuggestionItem],
    prefs: &PreferenceRecord,
    score: &EffectivenessScore,
) -> String {
    let mut out = format!("\nWhy:\n{}\n", explain(items, prefs));
    for item in items {
        out.push_str(&format!("  {}: {}\n", item.name, explain_item(item, prefs)));
    }
    out.push_str(&summarize(score));
    out.push('\n');
    out
}

/// One line per rated round.
pub fn history(records: &[FeedbackRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let when = record
            .recorded_at
            .and_then(|t| t.format(&Rfc3339).ok())
            .unwrap_or_else(|| "(undated)".to_string());
        let names: Vec<&str> = record.suggestions.iter().map(|s| s.name.as_str()).collect();
        out.push_str(&format!(
            "{when} | rated {}/5 | AES {:.2} ({}) | {}\n",
            record.rating,
            record.aes,
            record.result,
            names.join(", ")
        ));
    }
    out
}

pub fn catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (id, a) in catalog {
        out.push_str(&format!(
            "{id}: {} [{}] ({} min, ${}, {} people)\n",
            a.name, a.mood, a.duration, a.cost, a.people
        ));
    }
    out
}

/// User-facing message for a failed action.
pub fn error(err: &anyhow::Error) -> String {
    if let Some(pipeline) = err.downcast_ref::<PipelineError>() {
        match pipeline {
            PipelineError::InsufficientSuggestions { .. } => {
                return "Insufficient suggestions received. Try again later.".to_string();
            }
            PipelineError::ValidationRejected(errors) => {
                return format!("Errors: {}", errors.join(", "));
            }
            _ => {}
        }
    }
    format!("Error: {err:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use busters_model::{builtin_catalog, Rating, Verdict};
    use time::OffsetDateTime;

    fn item(name: &str, cost: f64) -> SuggestionItem {
        SuggestionItem {
            name: name.into(),
            duration: 30,
            cost,
            people: 2,
            mood: "social".into(),
            description: format!("{name}!"),
        }
    }

    #[test]
    fn suggestions_are_numbered() {
        let text = suggestions(&[item("Board games", 0.0), item("Bowling", 12.5)]);
        assert!(text.contains("1. Board games (30 min, $0, 2 people)\n   Board games!\n"));
        assert!(text.contains("2. Bowling (30 min, $12.5, 2 people)\n   Bowling!\n"));
    }

    #[test]
    fn metrics_use_two_decimals() {
        let text = metrics(&EffectivenessScore {
            user_feedback: 0.8,
            relevance: 0.75,
            effectiveness: 0.78,
            verdict: Verdict::Bad,
        });
        assert!(text.contains("User Feedback (UF): 0.80\n"));
        assert!(text.contains("Relevance Score (RS): 0.75\n"));
        assert!(text.contains("Activity Effectiveness Score (AES): 0.78\n"));
        assert!(text.contains("Result: Bad\n"));
    }

    #[test]
    fn explanation_covers_each_suggestion() {
        let prefs = PreferenceRecord::new(
            busters_model::Mood::Social,
            busters_model::Constraints::new(10.0, 60, 2),
        );
        let score = EffectivenessScore {
            user_feedback: 0.6,
            relevance: 0.75,
            effectiveness: 0.71,
            verdict: Verdict::Bad,
        };
        let text = explanation(&[item("Board games", 0.0), item("Bowling", 12.5)], &prefs, &score);
        assert_eq!(
            text,
            "\nWhy:\n\
             2/2 fit in 60 min; 1/2 within $10.00; 2/2 for 2 people; 2/2 match a social mood\n  \
             Board games: Fits in 60 min, within $10.00, for 2 people, suits a social mood\n  \
             Bowling: Fits in 60 min, for 2 people, suits a social mood\n\
             Bad: your rating counts 60%, relevance 75%, overall 0.71\n"
        );
    }

    #[test]
    fn history_lines() {
        let record = FeedbackRecord {
            suggestions: vec![item("Board games", 0.0), item("Bowling", 12.5)],
            rating: Rating::new(4).unwrap(),
            uf: 0.8,
            rs: 0.5,
            aes: 0.68,
            result: Verdict::Bad,
            recorded_at: Some(OffsetDateTime::from_unix_timestamp(0).unwrap()),
        };
        let mut undated = record.clone();
        undated.recorded_at = None;
        let text = history(&[record, undated]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "1970-01-01T00:00:00Z | rated 4/5 | AES 0.68 (Bad) | Board games, Bowling"
        );
        assert!(lines[1].starts_with("(undated) | rated 4/5"));
    }

    #[test]
    fn catalog_lists_every_entry() {
        let text = catalog(&builtin_catalog());
        assert_eq!(text.lines().count(), 30);
        assert!(text.starts_with("activity1: "));
    }

    #[test]
    fn errors_map_to_friendly_messages() {
        let err = anyhow::Error::from(PipelineError::InsufficientSuggestions { got: 1, min: 3 });
        assert_eq!(error(&err), "Insufficient suggestions received. Try again later.");

        let err = anyhow::Error::from(PipelineError::EmptyInput("responses"))
            .context("failed to collect preferences");
        assert_eq!(error(&err), "Error: failed to collect preferences: no responses provided");
    }
}
