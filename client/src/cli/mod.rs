//! Interactive terminal front-end
//!
//! Startup flags are parsed once with [`Args`]; each line typed afterwards
//! is parsed as a [`Command`] and run against the orchestrator.

pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use nutrilog_shared::validation::parse_record_date;
use nutrilog_shared::{Gender, Goal, ProfileForm, RecordForm, UserId};

use crate::api::NutritionApi;
use crate::config::ClientConfig;
use crate::orchestrator::Orchestrator;
use crate::storage::LocalStore;

/// Startup flags
#[derive(Parser, Debug, Default)]
#[command(name = "nutrilog", version, about = "Daily nutrition tracking client")]
pub struct Args {
    /// Base URL of the nutrition API
    #[arg(long)]
    pub api_url: Option<String>,

    /// File used to persist the active user between runs
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Keep nothing between runs
    #[arg(long, conflicts_with = "store")]
    pub memory_store: bool,

    /// Overwrite existing records without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Banner auto-dismiss delay in milliseconds (0 keeps messages)
    #[arg(long)]
    pub dismiss_after_ms: Option<u64>,
}

impl Args {
    /// Apply flag overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(ref url) = self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(ref path) = self.store {
            config.storage.path = Some(path.clone());
        }
        if let Some(ms) = self.dismiss_after_ms {
            config.banner.dismiss_after_ms = ms;
        }
    }
}

/// One line of input
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

/// Commands accepted at the prompt
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List known users
    Users,
    /// Switch user: an id, or `none` to start a new profile
    Select { target: String },
    /// Edit, save or hide the profile form
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Pick a calendar date (YYYY-MM-DD)
    Pick { date: String },
    /// Edit or submit the daily record form
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Reload the summary for a date (defaults to the picked date)
    Summary { date: Option<String> },
    /// List every stored record of the active user
    History,
    /// Print the current state
    Show,
    /// Leave the program
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ProfileAction {
    /// Set one field; `none` clears it
    Set {
        field: ProfileField,
        #[arg(required = true, num_args = 1..)]
        value: Vec<String>,
    },
    Save,
    Toggle,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum RecordAction {
    /// Set one field; `none` clears it
    Set {
        field: RecordField,
        #[arg(required = true, num_args = 1..)]
        value: Vec<String>,
    },
    Submit,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ProfileField {
    Nickname,
    Height,
    Weight,
    Age,
    Gender,
    Goal,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum RecordField {
    Calories,
    Protein,
    Fat,
    Carbs,
    Exercise,
}

/// Parse one input line
pub fn parse_line(line: &str) -> Result<Command, clap::Error> {
    Line::try_parse_from(line.split_whitespace()).map(|l| l.command)
}

/// `none` (any case) or an integer id
pub fn parse_select_target(target: &str) -> Result<Option<UserId>, String> {
    if target.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    target
        .parse::<UserId>()
        .map(Some)
        .map_err(|_| format!("Expected a user id or 'none', got '{}'", target))
}

fn optional<T: std::str::FromStr>(value: &str) -> Result<Option<T>, String> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| format!("'{}' is not a valid number", value))
}

/// Write one profile field from user input
pub fn apply_profile_field(
    form: &mut ProfileForm,
    field: ProfileField,
    value: &str,
) -> Result<(), String> {
    match field {
        ProfileField::Nickname => {
            form.nickname = (!value.eq_ignore_ascii_case("none")).then(|| value.to_string())
        }
        ProfileField::Height => form.height_cm = optional(value)?,
        ProfileField::Weight => form.weight_kg = optional(value)?,
        ProfileField::Age => form.age = optional(value)?,
        ProfileField::Gender => form.gender = value.parse::<Gender>()?,
        ProfileField::Goal => form.goal = value.parse::<Goal>()?,
    }
    Ok(())
}

/// Write one record field from user input
pub fn apply_record_field(
    form: &mut RecordForm,
    field: RecordField,
    value: &str,
) -> Result<(), String> {
    match field {
        RecordField::Calories => form.calories_consumed = optional(value)?,
        RecordField::Protein => form.protein_g = optional(value)?,
        RecordField::Fat => form.fat_g = optional(value)?,
        RecordField::Carbs => form.carbs_g = optional(value)?,
        RecordField::Exercise => form.calories_burned_exercise = optional(value)?.unwrap_or(0),
    }
    Ok(())
}

/// What the prompt loop should do next
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue(String),
    Quit,
}

/// Run one command and return the text to print
pub async fn execute<A, S>(orchestrator: &mut Orchestrator<A, S>, command: Command) -> Flow
where
    A: NutritionApi,
    S: LocalStore,
{
    let output = match command {
        Command::Quit => return Flow::Quit,
        Command::Users => {
            orchestrator.load_users().await;
            render::users(orchestrator.state())
        }
        Command::Select { target } => match parse_select_target(&target) {
            Ok(id) => {
                orchestrator.select_user(id).await;
                render::overview(orchestrator.state())
            }
            Err(msg) => msg,
        },
        Command::Profile { action } => match action {
            ProfileAction::Set { field, value } => {
                let value = value.join(" ");
                let applied =
                    apply_profile_field(&mut orchestrator.state_mut().profile_form, field, &value);
                match applied {
                    Ok(()) => render::profile(orchestrator.state()),
                    Err(msg) => msg,
                }
            }
            ProfileAction::Save => {
                orchestrator.save_profile().await;
                render::profile(orchestrator.state())
            }
            ProfileAction::Toggle => {
                orchestrator.toggle_profile_form();
                render::profile(orchestrator.state())
            }
        },
        Command::Pick { date } => {
            orchestrator.pick_date(&date).await;
            render::day(orchestrator.state())
        }
        Command::Record { action } => match action {
            RecordAction::Set { field, value } => {
                let value = value.join(" ");
                let applied =
                    apply_record_field(&mut orchestrator.state_mut().record_form, field, &value);
                match applied {
                    Ok(()) => render::record(orchestrator.state()),
                    Err(msg) => msg,
                }
            }
            RecordAction::Submit => {
                orchestrator.submit_record().await;
                render::day(orchestrator.state())
            }
        },
        Command::Summary { date } => {
            let date = match date {
                Some(text) => match parse_record_date(&text) {
                    Ok(date) => date,
                    Err(msg) => return Flow::Continue(msg),
                },
                None => orchestrator.state().record_form.record_date,
            };
            orchestrator.fetch_summary(date).await;
            render::summary(orchestrator.state())
        }
        Command::History => {
            let records = orchestrator.list_records().await;
            render::history(&records)
        }
        Command::Show => render::overview(orchestrator.state()),
    };

    let banner = orchestrator
        .banner()
        .map(|message| render::banner(&message))
        .unwrap_or_default();
    Flow::Continue(format!("{}{}", banner, output))
}
