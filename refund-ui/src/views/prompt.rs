//! Interactive terminal form.
//!
//! Asks for the four amounts in order, prints the summary, then offers
//! another calculation. A command typed at any prompt is handled in place.
//!
//! The form talks to the user through an [`Interaction`]. On a terminal that
//! is [`DialoguerInteraction`]; when input is piped it is [`LineInteraction`],
//! which reads plain lines and is also what the tests drive.

use std::io::{BufRead, Write};

use anyhow::Result;
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use refund_core::{AmountField, PolicyVariant};
use tracing::{debug, info};

use crate::app::Session;
use crate::views::{COMMANDS, INSTRUCTIONS, instructions_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Theme,
    Clear,
    Quit,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Value(String),
    Command(Command),
    /// Input closed.
    Eof,
}

impl PromptInput {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "help" | "?" | "i" => Self::Command(Command::Help),
            "theme" | "dark" | "light" => Self::Command(Command::Theme),
            "clear" => Self::Command(Command::Clear),
            "quit" | "q" | "exit" => Self::Command(Command::Quit),
            _ => Self::Value(trimmed.to_string()),
        }
    }
}

/// The question asked before closing, in the wording of each release.
pub fn quit_question(policy: PolicyVariant) -> &'static str {
    match policy {
        PolicyVariant::MaxWithReason => "Do you want to quit?",
        PolicyVariant::Threshold | PolicyVariant::Additive => {
            "Are you sure you want to close?"
        }
    }
}

/// How the form reads answers and shows output.
pub trait Interaction {
    /// Asks for one field. `label` carries no trailing separator.
    fn read_field(
        &mut self,
        label: &str,
    ) -> Result<PromptInput>;

    /// Asks a yes/no question. No answer counts as no.
    fn confirm(
        &mut self,
        question: &str,
    ) -> Result<bool>;

    fn show(
        &mut self,
        text: &str,
    ) -> Result<()>;
}

/// Terminal interaction through `dialoguer` prompts on stdout.
pub struct DialoguerInteraction {
    theme: ColorfulTheme,
    term: Term,
}

impl DialoguerInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stdout(),
        }
    }
}

impl Default for DialoguerInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for DialoguerInteraction {
    fn read_field(
        &mut self,
        label: &str,
    ) -> Result<PromptInput> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text_on(&self.term);

        match answer {
            Ok(line) => Ok(PromptInput::parse(&line)),
            Err(error) => {
                debug!(%error, "prompt closed");
                Ok(PromptInput::Eof)
            }
        }
    }

    fn confirm(
        &mut self,
        question: &str,
    ) -> Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(false)
            .interact_on_opt(&self.term)?;
        Ok(answer.unwrap_or(false))
    }

    fn show(
        &mut self,
        text: &str,
    ) -> Result<()> {
        self.term.write_line(text)?;
        Ok(())
    }
}

/// Plain line-by-line interaction over any reader and writer.
pub struct LineInteraction<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineInteraction<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` once input has ended.
    fn ask(
        &mut self,
        label: &str,
    ) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Interaction for LineInteraction<R, W> {
    fn read_field(
        &mut self,
        label: &str,
    ) -> Result<PromptInput> {
        Ok(self
            .ask(&format!("{label}: "))?
            .map_or(PromptInput::Eof, |line| PromptInput::parse(&line)))
    }

    fn confirm(
        &mut self,
        question: &str,
    ) -> Result<bool> {
        let answer = self.ask(&format!("{question} (y/n): "))?;
        Ok(answer.is_some_and(|line| {
            matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
        }))
    }

    fn show(
        &mut self,
        text: &str,
    ) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Runs the calculator form over an [`Interaction`].
pub struct Prompt<I> {
    io: I,
}

impl<I: Interaction> Prompt<I> {
    pub fn new(io: I) -> Self {
        Self { io }
    }

    pub fn into_inner(self) -> I {
        self.io
    }

    /// Runs the form until the user quits or input ends.
    pub fn run(
        &mut self,
        session: &mut Session,
    ) -> Result<()> {
        info!(
            policy = %session.policy(),
            layout = %session.layout(),
            "interactive session started"
        );
        self.banner(session)?;

        let mut index = 0;
        loop {
            if index == AmountField::ALL.len() {
                index = 0;
                if self.show_result(session)? && !self.io.confirm("Calculate another?")? {
                    break;
                }
                session.clear();
                continue;
            }

            let field = AmountField::ALL[index];
            match self.io.read_field(field.label())? {
                PromptInput::Eof => break,
                PromptInput::Value(value) => {
                    session.form_mut().set(field, value);
                    index += 1;
                }
                PromptInput::Command(Command::Help) => self.show_instructions(session)?,
                PromptInput::Command(Command::Theme) => {
                    let mode = session.toggle_theme();
                    let text = format!("Switched to {mode} mode.");
                    self.io.show(&session.theme().paint_secondary(&text))?;
                }
                PromptInput::Command(Command::Clear) => {
                    session.clear();
                    index = 0;
                    self.io.show(&session.theme().paint_secondary("Cleared."))?;
                }
                PromptInput::Command(Command::Quit) => {
                    let question = quit_question(session.policy());
                    if !session.confirm_quit() || self.io.confirm(question)? {
                        break;
                    }
                }
            }
        }

        info!("interactive session ended");
        Ok(())
    }

    fn banner(
        &mut self,
        session: &Session,
    ) -> Result<()> {
        let policy = session.policy();
        let title = format!(
            "TPP Refund Calculator (policy: {policy}, v{})",
            policy.version()
        );
        self.io.show(&session.theme().paint_accent(&title))?;
        self.io.show(&format!(
            "Type 'help' for instructions or '{}' to switch modes.",
            session.theme().toggle_label().to_ascii_lowercase()
        ))
    }

    /// Prints the summary or the error. Returns whether a result was shown.
    fn show_result(
        &mut self,
        session: &mut Session,
    ) -> Result<bool> {
        let outcome = session.calculate().map(|_| ());
        match outcome {
            Ok(()) => {
                let summary = session.summary().unwrap_or_default();
                self.io.show("")?;
                self.io.show(&session.theme().paint_result(&summary))?;
                self.io.show("")?;
                Ok(true)
            }
            Err(error) => {
                debug!(%error, "showing input error");
                self.io.show(&format!("Error: {}", error.user_message()))?;
                session.clear();
                Ok(false)
            }
        }
    }

    fn show_instructions(
        &mut self,
        session: &Session,
    ) -> Result<()> {
        let theme = session.theme();
        self.io.show("")?;
        self.io.show(&theme.paint_info(instructions_title()))?;
        self.io.show(&theme.paint_text(INSTRUCTIONS))?;
        self.io.show(&theme.paint_text(COMMANDS))
    }
}
