use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use refund_core::{AmountField, PolicyVariant};
use tracing::{debug, info};

use refund_ui::themes::ThemeMode;
use refund_ui::views::{DialoguerInteraction, LineInteraction, Prompt, SummaryLayout};
use refund_ui::logging::{self, LogSettings};
use refund_ui::{AppConfig, Session};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Travel-package refund calculator.
///
/// Pass any of the four amounts to compute once and exit (missing amounts are
/// reported as invalid input). With no amounts the calculator asks for them
/// interactively.
#[derive(Debug, Parser)]
#[command(name = "RefundCalculator", version, about, long_about = None)]
struct Cli {
    /// TOML settings file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Non-refundable policy: threshold, additive or max-with-reason
    /// (release tags 1.01, 1.3.3 and 1.3 also work).
    #[arg(long)]
    policy: Option<PolicyVariant>,

    /// Summary layout: classic, aligned or columns. Defaults to the policy's own.
    #[arg(long)]
    layout: Option<SummaryLayout>,

    /// Color theme: light, dark or teal.
    #[arg(long)]
    theme: Option<ThemeMode>,

    /// Quit without asking for confirmation.
    #[arg(long, default_value_t = false)]
    no_confirm: bool,

    /// Log filter, e.g. `info` or `refund_core=debug`.
    #[arg(long)]
    log_level: Option<String>,

    /// Hide console log output. File logging is unaffected.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Total trip booking cost, excluding TPP.
    #[arg(long, allow_hyphen_values = true)]
    total_cost: Option<String>,

    /// Amount the client has paid.
    #[arg(long, allow_hyphen_values = true)]
    amount_paid: Option<String>,

    /// Trip Protection Plan cost.
    #[arg(long, allow_hyphen_values = true)]
    tpp: Option<String>,

    /// Deposit amount from the payment plan.
    #[arg(long, allow_hyphen_values = true)]
    deposit: Option<String>,

    /// Print the result as JSON instead of a text summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(layout) = self.layout {
            config.layout = Some(layout);
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if self.no_confirm {
            config.confirm_quit = false;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }

    fn is_one_shot(&self) -> bool {
        self.total_cost.is_some()
            || self.amount_paid.is_some()
            || self.tpp.is_some()
            || self.deposit.is_some()
    }
}

// ─── modes ───────────────────────────────────────────────────────────────────

/// Computes once from the flags. Exit status 2 means the input was refused.
fn run_once(
    cli: &Cli,
    session: &mut Session,
) -> Result<ExitCode> {
    let form = session.form_mut();
    for (field, value) in [
        (AmountField::TotalCost, &cli.total_cost),
        (AmountField::AmountPaid, &cli.amount_paid),
        (AmountField::Tpp, &cli.tpp),
        (AmountField::Deposit, &cli.deposit),
    ] {
        form.set(field, value.clone().unwrap_or_default());
    }

    if let Err(error) = session.calculate() {
        eprintln!("Error: {}", error.user_message());
        let code = if error.is_invalid_input() { 2 } else { 1 };
        return Ok(ExitCode::from(code));
    }

    let mut stdout = io::stdout().lock();
    if cli.json {
        if let Some(calculation) = session.last_calculation() {
            serde_json::to_writer_pretty(&mut stdout, calculation)
                .context("failed to write JSON result")?;
            writeln!(stdout)?;
        }
    } else if let Some(summary) = session.summary() {
        writeln!(stdout, "{}", session.theme().paint_result(&summary))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Uses `dialoguer` prompts on a terminal and plain lines when piped.
fn run_interactive(session: &mut Session) -> Result<ExitCode> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        Prompt::new(DialoguerInteraction::new()).run(session)?;
    } else {
        let lines = LineInteraction::new(io::stdin().lock(), io::stdout().lock());
        Prompt::new(lines).run(session)?;
    }
    Ok(ExitCode::SUCCESS)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_logging(LogSettings {
        directive: &config.log_level,
        quiet: cli.quiet,
        file: config.log_file.as_deref(),
    })?;
    info!(version = env!("CARGO_PKG_VERSION"), policy = %config.policy, "starting");
    debug!(?config, "resolved settings");

    let color = !cli.json && io::stdout().is_terminal();
    let mut session = Session::new(&config, color);

    if cli.is_one_shot() {
        run_once(&cli, &mut session)
    } else {
        run_interactive(&mut session)
    }
}
