//! Parsing of REPL input lines.
//!
//! Lines starting with `/` are commands; anything else is chat text.

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::profile::{CheckInFrequency, Goal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat(String),
    Dashboard,
    Profile,
    Goal(Goal),
    Frequency(CheckInFrequency),
    SetKey(String),
    ClearKey,
    Report,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown command '/{0}'. Type /help to see what I understand.")]
    Unknown(String),

    #[error("/{command} needs an argument: {hint}")]
    MissingArgument {
        command: &'static str,
        hint: String,
    },

    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Command::Chat(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "dashboard" | "d" => Ok(Command::Dashboard),
            "profile" | "p" => Ok(Command::Profile),
            "goal" => required("goal", arg, goal_hint).and_then(|a| Ok(Command::Goal(a.parse()?))),
            "frequency" | "freq" => required("frequency", arg, frequency_hint)
                .and_then(|a| Ok(Command::Frequency(a.parse()?))),
            "key" => {
                let arg = required("key", arg, || "<your-api-key> or clear".to_string())?;
                if arg.eq_ignore_ascii_case("clear") {
                    Ok(Command::ClearKey)
                } else {
                    Ok(Command::SetKey(arg.to_string()))
                }
            }
            "report" => Ok(Command::Report),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn required<'a>(
    command: &'static str,
    arg: &'a str,
    hint: impl FnOnce() -> String,
) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument {
            command,
            hint: hint(),
        })
    } else {
        Ok(arg)
    }
}

pub(crate) fn goal_hint() -> String {
    Goal::ALL.iter().map(Goal::slug).collect::<Vec<_>>().join(" | ")
}

pub(crate) fn frequency_hint() -> String {
    CheckInFrequency::ALL
        .iter()
        .map(CheckInFrequency::slug)
        .collect::<Vec<_>>()
        .join(" | ")
}
