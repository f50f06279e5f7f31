//! Command handlers shared by the subcommands and the interactive menu.
//!
//! Handlers write to `out` so tests can capture what the user would see.

use std::io::Write;

use anyhow::Result;
use busters_model::{Constraints, Rating};

use crate::render;
use crate::session::{SaveOutcome, Session, SuggestOutcome};

const UNKNOWN_USER: &str = "User ID not found. Please save preferences first.";

pub async fn save(
    session: &Session,
    out: &mut dyn Write,
    user: &str,
    responses: &[String],
    constraints: Constraints,
) -> Result<()> {
    match session.save_preferences(user, responses, constraints).await? {
        SaveOutcome::Saved { mood, .. } => {
            writeln!(out, "Mood interpreted as: {mood}")?;
            writeln!(out, "Preferences saved successfully.")?;
        }
        SaveOutcome::Rejected(errors) => {
            writeln!(out, "Failed to collect valid preferences.")?;
            writeln!(out, "Errors: {}", errors.join(", "))?;
        }
    }
    Ok(())
}

/// Show suggestions, obtain a rating through `ask_rating`, then score and
/// record the round.
pub async fn suggest<F>(
    session: &Session,
    out: &mut dyn Write,
    user: &str,
    ask_rating: F,
) -> Result<()>
where
    F: FnOnce() -> Result<Rating>,
{
    let (prefs, items) = match session.fetch_suggestions(user).await? {
        SuggestOutcome::UnknownUser => {
            writeln!(out, "{UNKNOWN_USER}")?;
            return Ok(());
        }
        SuggestOutcome::Suggestions { prefs, items } => (prefs, items),
    };

    write!(out, "{}", render::suggestions(&items))?;
    out.flush()?;
    let rating = ask_rating()?;

    let score = session.record_feedback(user, &prefs, items.clone(), rating)?;
    write!(out, "{}", render::metrics(&score))?;
    write!(out, "{}", render::explanation(&items, &prefs, &score))?;
    writeln!(out, "Feedback saved.")?;
    Ok(())
}

pub fn history(
    session: &Session,
    out: &mut dyn Write,
    user: &str,
    limit: Option<usize>,
) -> Result<()> {
    match session.history(user, limit)? {
        None => writeln!(out, "{UNKNOWN_USER}")?,
        Some(records) if records.is_empty() => writeln!(out, "(no history)")?,
        Some(records) => write!(out, "{}", render::history(&records))?,
    }
    Ok(())
}

pub fn catalog_init(session: &Session, out: &mut dyn Write, force: bool) -> Result<()> {
    let path = session.catalog_path().display();
    if session.init_catalog(force)? {
        writeln!(out, "Wrote built-in catalog to {path}")?;
    } else {
        writeln!(out, "Catalog already exists at {path} (use --force to overwrite)")?;
    }
    Ok(())
}

pub fn catalog_list(session: &Session, out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", render::catalog(&session.catalog()))?;
    Ok(())
}
