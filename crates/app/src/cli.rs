use busters_backend::BackendKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Text-generation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum BackendArg {
    /// Groq's OpenAI-compatible API.
    #[default]
    Groq,
    /// OpenAI chat completions.
    Openai,
    /// Anthropic messages API.
    Anthropic,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Groq => BackendKind::Groq,
            BackendArg::Openai => BackendKind::OpenAi,
            BackendArg::Anthropic => BackendKind::Anthropic,
        }
    }
}

/// Command-line interface for the `busters` application.
#[derive(Debug, Parser)]
#[command(
    name = "busters",
    version,
    about = "Mood-aware activity suggestions for when you're bored"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Text-generation backend.
    #[arg(long, global = true, env = "BUSTERS_BACKEND", value_enum)]
    pub backend: Option<BackendArg>,

    /// Model name, overriding the backend's default.
    #[arg(long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Directory holding user_preferences.json and activities.json.
    #[arg(long, global = true, env = "BUSTERS_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Debug logging for busters crates (ignored when RUST_LOG is set).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Available `busters` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive menu (the default when no command is given).
    Menu,
    /// Infers your mood, validates constraints and saves them.
    Save {
        /// User id to save under.
        #[arg(long)]
        user: String,
        /// Free-text answer about how you feel (repeatable).
        #[arg(long = "response", value_name = "TEXT", required = true)]
        responses: Vec<String>,
        /// Budget in dollars (0-1000).
        #[arg(long)]
        budget: f64,
        /// Available time in minutes (1-300).
        #[arg(long)]
        time: u32,
        /// Number of people (1-10).
        #[arg(long)]
        people: u32,
    },
    /// Suggests activities for a saved user and records your rating.
    Suggest {
        /// User id with saved preferences.
        #[arg(long)]
        user: String,
        /// Rating for the suggestions; prompted for when omitted.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,
    },
    /// Shows a user's rated suggestion rounds, newest first.
    History {
        /// User id with saved preferences.
        #[arg(long)]
        user: String,
        /// Show at most this many rounds.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Manages the activity catalog.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Writes the built-in catalog to the data directory.
    Init {
        /// Overwrite an existing catalog.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Prints the catalog in use.
    List,
}
