//! Interactive loop: one task owns the controller and multiplexes user input
//! with the periodic check-in tick.

use anyhow::{Context, Result};
use chrono::Local;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{interval, MissedTickBehavior};

use crate::application::{JournalController, JournalError};
use crate::domain::onboarding::OnboardingStage;

use super::commands::Command;
use super::render;

/// Messages replayed from the transcript on startup.
const REPLAY_MESSAGES: usize = 10;

const PROMPT: &str = "> ";

#[derive(Debug, Clone)]
pub struct ReplSettings {
    pub check_in_enabled: bool,
    pub poll_interval: Duration,
    /// Where `/report` writes its Markdown file.
    pub report_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

pub struct Repl<W> {
    controller: JournalController,
    settings: ReplSettings,
    out: W,
}

impl<W: Write> Repl<W> {
    pub fn new(controller: JournalController, settings: ReplSettings, out: W) -> Self {
        Self {
            controller,
            settings,
            out,
        }
    }

    pub fn controller(&self) -> &JournalController {
        &self.controller
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs until `/quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        self.start().await?;

        let mut lines = input.lines();
        let mut ticker = interval(self.settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; startup already checked.
        ticker.tick().await;

        self.prompt()?;
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read input")? else {
                        break;
                    };
                    if self.handle_line(&line).await? == Control::Quit {
                        break;
                    }
                    self.prompt()?;
                }
                _ = ticker.tick(), if self.settings.check_in_enabled => {
                    if self.check_in().await? {
                        self.prompt()?;
                    }
                }
            }
        }

        writeln!(self.out, "Take care! 🌙")?;
        Ok(())
    }

    async fn start(&mut self) -> Result<()> {
        if self.controller.stage() == OnboardingStage::NoProfile {
            writeln!(self.out, "{}", render::WELCOME_SCREEN)?;
        } else {
            let messages = self.controller.conversation().messages();
            let start = messages.len().saturating_sub(REPLAY_MESSAGES);
            if !messages[start..].is_empty() {
                writeln!(self.out, "{}", render::transcript(&messages[start..]))?;
            }
        }
        if !self.controller.has_credential() && self.controller.profile().is_some() {
            writeln!(self.out, "(No API key set yet. Use /key <your-key> to add one.)")?;
        }
        if self.settings.check_in_enabled {
            self.check_in().await?;
        }
        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Result<Control> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.out, "⚠ {}", e)?;
                return Ok(Control::Continue);
            }
        };

        match command {
            Command::Chat(text) => self.chat(&text).await?,
            Command::Dashboard => {
                let view = self.controller.dashboard();
                writeln!(self.out, "{}", render::dashboard(&view))?;
            }
            Command::Profile => {
                let text =
                    render::profile(self.controller.profile(), self.controller.has_credential());
                writeln!(self.out, "{}", text)?;
            }
            Command::Goal(goal) => {
                let result = self.controller.set_goal(goal).await;
                self.confirm(result, &format!("Goal set to \"{}\".", goal))?;
            }
            Command::Frequency(frequency) => {
                let result = self.controller.set_check_in_frequency(frequency).await;
                self.confirm(result, &format!("Check-ins set to {}.", frequency))?;
            }
            Command::SetKey(key) => {
                let result = self.controller.set_credential(&key).await;
                self.confirm(result, "API key saved. 🔑")?;
            }
            Command::ClearKey => {
                let result = self.controller.clear_credential().await;
                self.confirm(result, "API key removed.")?;
            }
            Command::Report => self.write_report().await?,
            Command::Help => writeln!(self.out, "{}", render::help())?,
            Command::Quit => return Ok(Control::Quit),
        }
        Ok(Control::Continue)
    }

    async fn chat(&mut self, text: &str) -> Result<()> {
        match self.controller.stage() {
            OnboardingStage::NoProfile => {
                let result = self.controller.dismiss_welcome().await;
                match result {
                    Ok(greeting) => writeln!(self.out, "{}", render::message(&greeting))?,
                    Err(e) => self.show_error(&e)?,
                }
            }
            _ if text.is_empty() => {}
            stage => {
                if stage == OnboardingStage::ProfileCreated {
                    writeln!(self.out, "{}", render::TYPING_INDICATOR)?;
                    self.out.flush()?;
                }
                match self.controller.submit(text).await {
                    Ok(outcome) => writeln!(self.out, "{}", render::message(outcome.reply()))?,
                    Err(e) => self.show_error(&e)?,
                }
            }
        }
        Ok(())
    }

    async fn write_report(&mut self) -> Result<()> {
        let doc = self.controller.report();
        let path = self.settings.report_dir.join(format!(
            "cycle-report-{}.md",
            Local::now().format("%Y-%m-%d")
        ));

        match save_report(&self.settings.report_dir, &path, doc).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "report written");
                writeln!(self.out, "Report saved to {}", path.display())?;
            }
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "report could not be written");
                writeln!(self.out, "⚠ Could not save the report: {}", e)?;
            }
        }
        Ok(())
    }

    /// Runs the check-in trigger; returns true if a message was posted.
    async fn check_in(&mut self) -> Result<bool> {
        match self.controller.run_check_in(Local::now().naive_local()).await {
            Ok(Some(message)) => {
                writeln!(self.out, "\n{}", render::message(&message))?;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                tracing::error!(error = %e, "check-in failed");
                Ok(false)
            }
        }
    }

    fn confirm(&mut self, result: Result<(), JournalError>, done: &str) -> Result<()> {
        match result {
            Ok(()) => writeln!(self.out, "{}", done)?,
            Err(e) => self.show_error(&e)?,
        }
        Ok(())
    }

    fn show_error(&mut self, err: &JournalError) -> Result<()> {
        if let JournalError::Persistence(e) = err {
            tracing::error!(error = %e, "failed to save journal");
        }
        writeln!(self.out, "⚠ {}", err)?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{}", PROMPT)?;
        self.out.flush()?;
        Ok(())
    }
}

async fn save_report(dir: &Path, path: &Path, doc: String) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(path, doc).await
}
