//! Menu-driven session on the terminal.

use anyhow::Result;
use busters_model::{
    Constraints, Rating, BUDGET_MAX, BUDGET_MIN, PEOPLE_MAX, PEOPLE_MIN, TIME_MAX, TIME_MIN,
};
use inquire::validator::Validation;
use inquire::{CustomType, InquireError, Select, Text};
use tokio::runtime::Runtime;
use tracing::warn;

use crate::commands;
use crate::render;
use crate::session::Session;

const SAVE: &str = "Save preferences";
const SUGGEST: &str = "Get activity suggestions";
const HISTORY: &str = "Show history";
const EXIT: &str = "Exit";

const MOOD_QUESTIONS: [&str; 2] = [
    "How you doin' today? (e.g., feeling great, kinda tired):",
    "How was your day so far? (e.g., awesome, stressful):",
];

/// Run the menu until the user exits. A failed action is reported and the
/// menu shown again.
pub fn run_menu(session: &Session, rt: &Runtime) -> Result<()> {
    let mut out = std::io::stdout();
    println!("=== Boredom Busters ===");
    loop {
        let choice = match Select::new("Choose an option:", vec![SAVE, SUGGEST, HISTORY, EXIT])
            .prompt()
        {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => EXIT,
            Err(e) => return Err(e.into()),
        };

        let result = match choice {
            SAVE => save(session, rt, &mut out),
            SUGGEST => suggest(session, rt, &mut out),
            HISTORY => history(session, &mut out),
            _ => {
                println!("Goodbye!");
                return Ok(());
            }
        };

        if let Err(e) = result {
            if is_cancellation(&e) {
                continue;
            }
            warn!(action = choice, error = %format!("{e:#}"), "action failed");
            println!("{}", render::error(&e));
        }
    }
}

fn is_cancellation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

fn prompt_user_id() -> Result<String> {
    let id = Text::new("Enter user ID (e.g., user1):")
        .with_validator(|input: &str| {
            Ok(if input.trim().is_empty() {
                Validation::Invalid("User ID cannot be empty.".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()?;
    Ok(id.trim().to_string())
}

fn prompt_in_range<T>(message: &str, min: T, max: T) -> Result<T>
where
    T: Copy + PartialOrd + std::fmt::Display + std::str::FromStr + ToString + 'static,
{
    let value = CustomType::<T>::new(message)
        .with_error_message("Please enter a number.")
        .with_validator(move |v: &T| {
            Ok(if *v >= min && *v <= max {
                Validation::Valid
            } else {
                Validation::Invalid(format!("Must be between {min} and {max}.").into())
            })
        })
        .prompt()?;
    Ok(value)
}

fn save(session: &Session, rt: &Runtime, out: &mut std::io::Stdout) -> Result<()> {
    let user = prompt_user_id()?;
    let responses = MOOD_QUESTIONS
        .iter()
        .map(|q| Text::new(q).prompt())
        .collect::<Result<Vec<_>, _>>()?;
    let budget = prompt_in_range(
        "What's your budget? (e.g., 20, or 0 for none):",
        BUDGET_MIN,
        BUDGET_MAX,
    )?;
    let time = prompt_in_range(
        "How much time do you have? (minutes, e.g., 60):",
        TIME_MIN,
        TIME_MAX,
    )?;
    let people = prompt_in_range(
        "How many people? (e.g., 1 for solo, 2 for couple):",
        PEOPLE_MIN,
        PEOPLE_MAX,
    )?;
    let constraints = Constraints::new(budget, time, people);
    rt.block_on(commands::save(session, out, &user, &responses, constraints))
}

/// Ask for a 1-5 rating.
pub fn prompt_rating() -> Result<Rating> {
    let value = prompt_in_range("Rate these suggestions (1-5):", Rating::MIN, Rating::MAX)?;
    Ok(Rating::new(value)?)
}

fn suggest(session: &Session, rt: &Runtime, out: &mut std::io::Stdout) -> Result<()> {
    let user = prompt_user_id()?;
    rt.block_on(commands::suggest(session, out, &user, prompt_rating))
}

fn history(session: &Session, out: &mut std::io::Stdout) -> Result<()> {
    let user = prompt_user_id()?;
    commands::history(session, out, &user, None)
}
