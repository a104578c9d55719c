//! Application state for the refund calculator.
//!
//! Holds what the user has typed, the presentation settings and the most
//! recent calculation. Nothing here outlives the process.

use refund_core::{
    AmountField, PolicyVariant, RawRefundInputs, RefundCalculation, RefundEngine, RefundError,
};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::themes::{Theme, ThemeMode};
use crate::views::{SummaryLayout, render_summary};

/// The four input fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefundForm {
    fields: RawRefundInputs,
}

impl RefundForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(
        &mut self,
        field: AmountField,
        value: impl Into<String>,
    ) {
        *self.fields.get_mut(field) = value.into();
    }

    pub fn get(
        &self,
        field: AmountField,
    ) -> &str {
        self.fields.get(field)
    }

    /// Empties every field.
    pub fn clear(&mut self) {
        self.fields = RawRefundInputs::default();
    }

    pub fn raw_inputs(&self) -> &RawRefundInputs {
        &self.fields
    }
}

/// One run of the calculator: form contents, theme and last result.
#[derive(Debug, Clone)]
pub struct Session {
    form: RefundForm,
    engine: RefundEngine,
    layout: SummaryLayout,
    theme: Theme,
    confirm_quit: bool,
    last: Option<RefundCalculation>,
}

impl Session {
    /// Creates a session from the resolved configuration.
    ///
    /// `color` says whether output goes to a terminal that understands ANSI colors.
    pub fn new(
        config: &AppConfig,
        color: bool,
    ) -> Self {
        Self {
            form: RefundForm::new(),
            engine: RefundEngine::new(config.policy),
            layout: config.effective_layout(),
            theme: Theme::new(config.theme, color),
            confirm_quit: config.confirm_quit,
            last: None,
        }
    }

    pub fn form(&self) -> &RefundForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RefundForm {
        &mut self.form
    }

    pub fn policy(&self) -> PolicyVariant {
        self.engine.policy()
    }

    pub fn layout(&self) -> SummaryLayout {
        self.layout
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn confirm_quit(&self) -> bool {
        self.confirm_quit
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle()
    }

    /// Runs the engine on the current form.
    ///
    /// On failure the previous result is left in place, as the form keeps
    /// showing it while the error is on screen.
    pub fn calculate(&mut self) -> Result<&RefundCalculation, RefundError> {
        match self.engine.calculate(self.form.raw_inputs()) {
            Ok(calculation) => {
                info!(
                    policy = %calculation.result.policy,
                    refund_due = %calculation.result.refund_due,
                    "calculation complete"
                );
                Ok(&*self.last.insert(calculation))
            }
            Err(error) => {
                warn!(%error, "calculation rejected");
                Err(error)
            }
        }
    }

    pub fn last_calculation(&self) -> Option<&RefundCalculation> {
        self.last.as_ref()
    }

    /// The last result, rendered in the session's layout.
    pub fn summary(&self) -> Option<String> {
        self.last
            .as_ref()
            .map(|calculation| render_summary(calculation, self.layout))
    }

    /// Clears the form and the displayed result.
    pub fn clear(&mut self) {
        self.form.clear();
        self.last = None;
    }
}
