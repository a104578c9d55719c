//! Text summaries of a refund calculation.
//!
//! Each released version of the calculator laid its result out differently.
//! All three layouts are kept so a summary can be reproduced exactly.

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use refund_core::{PolicyVariant, RefundCalculation, RefundResult, TieBreak};
use serde::{Deserialize, Serialize};

use crate::utils::{format_amount, format_dollars};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Blank-looking lines under the timestamp are padded, as the releases printed them.
const CLASSIC_SPACER: &str = "           ";
const COLUMNS_SPACER: &str = "                ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLayout {
    /// Label-colon-value lines.
    Classic,
    /// Right-aligned amounts with the tie-break line.
    Aligned,
    /// Indented two-column table.
    Columns,
}

impl SummaryLayout {
    /// The layout that shipped alongside each policy.
    pub fn for_policy(policy: PolicyVariant) -> Self {
        match policy {
            PolicyVariant::Threshold => Self::Classic,
            PolicyVariant::MaxWithReason => Self::Aligned,
            PolicyVariant::Additive => Self::Columns,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Aligned => "aligned",
            Self::Columns => "columns",
        }
    }
}

impl fmt::Display for SummaryLayout {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "aligned" => Ok(Self::Aligned),
            "columns" => Ok(Self::Columns),
            other => Err(format!(
                "unknown layout '{other}' (expected classic, aligned or columns)"
            )),
        }
    }
}

/// Renders a calculation as a multi-line block in the given layout.
pub fn render_summary(
    calculation: &RefundCalculation,
    layout: SummaryLayout,
) -> String {
    let timestamp = calculation
        .calculated_at
        .format(TIMESTAMP_FORMAT)
        .to_string();
    let r = &calculation.result;

    // Writing to a String cannot fail.
    match layout {
        SummaryLayout::Classic => classic(r, &timestamp),
        SummaryLayout::Aligned => aligned(r, &timestamp),
        SummaryLayout::Columns => columns(r, &timestamp),
    }
    .unwrap_or_default()
}

/// The tie-break line, spelling out the amounts that were compared.
pub fn tie_break_line(result: &RefundResult) -> Option<String> {
    let deposit = format_dollars(result.deposit);
    let twenty = format_dollars(result.twenty_percent);
    result.tie_break.map(|tie_break| match tie_break {
        TieBreak::Deposit => format!("{} ({deposit} > {twenty})", tie_break.reason()),
        TieBreak::TwentyPercent => format!("{} ({twenty} > {deposit})", tie_break.reason()),
        TieBreak::Equal => "Deposit and 20% are equal".to_string(),
    })
}

fn classic(
    r: &RefundResult,
    timestamp: &str,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "=== Calculation Summary ===")?;
    writeln!(out, "    {timestamp}")?;
    writeln!(out, "{CLASSIC_SPACER}")?;
    writeln!(out, "Total Package Cost: {}", format_dollars(r.total_cost))?;
    writeln!(out, "Total Paid: {}", format_dollars(r.amount_paid))?;
    writeln!(out, "TPP: {}", format_dollars(r.tpp))?;
    writeln!(out, "Deposit: {}", format_dollars(r.deposit))?;
    writeln!(out, "20% of Package Cost: {}", format_dollars(r.twenty_percent))?;
    if let Some(line) = tie_break_line(r) {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "----------------------------")?;
    writeln!(out, "Total Paid: {}", format_dollars(r.amount_paid))?;
    writeln!(
        out,
        "Total Non-Refundable (TNR): {}",
        format_dollars(r.non_refundable)
    )?;
    write!(out, "Refund Due: {}", format_dollars(r.refund_due))?;
    if r.is_zero_refund {
        write!(out, "\nNo refund is due")?;
    }
    Ok(out)
}

fn aligned(
    r: &RefundResult,
    timestamp: &str,
) -> Result<String, fmt::Error> {
    let rule = |c: char| c.to_string().repeat(26);
    let row = |label: &str, amount| format!("{label:<24}${:>9}", format_amount(amount));

    let mut out = String::new();
    writeln!(out, "     Refund Summary")?;
    writeln!(out, "  {timestamp}")?;
    writeln!(out, "{}", rule('='))?;
    writeln!(out, "{}", row("Total Package Cost:", r.total_cost))?;
    writeln!(out, "{}", row("Amount Paid:", r.amount_paid))?;
    writeln!(out, "{}", row("TPP:", r.tpp))?;
    writeln!(out, "{}", row("Deposit:", r.deposit))?;
    writeln!(out, "{}", row("20% of Cost:", r.twenty_percent))?;
    if let Some(line) = tie_break_line(r) {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", rule('-'))?;
    writeln!(out, "{}", row("Non-Refundable Total:", r.non_refundable))?;
    writeln!(out, "{}", rule('-'))?;
    write!(out, "{}", row("Refund Due:", r.refund_due))?;
    if r.is_zero_refund {
        write!(out, "\nNo refund is due.")?;
    }
    Ok(out)
}

fn columns(
    r: &RefundResult,
    timestamp: &str,
) -> Result<String, fmt::Error> {
    let row = |label: &str, amount| format!("   {label:<21}{}", format_dollars(amount));
    let rule = "   ----------------------------";

    let mut out = String::new();
    writeln!(out, "   === Calculation Summary ===")?;
    writeln!(out, "       {timestamp}")?;
    writeln!(out, "{COLUMNS_SPACER}")?;
    writeln!(out, "{}", row("Total Package Cost", r.total_cost))?;
    writeln!(out, "{}", row("Amount Paid", r.amount_paid))?;
    writeln!(out, "{}", row("TPP", r.tpp))?;
    writeln!(out, "{}", row("Deposit", r.deposit))?;
    writeln!(out, "{}", row("20% Package Cost", r.twenty_percent))?;
    if let Some(line) = tie_break_line(r) {
        writeln!(out, "   {line}")?;
    }
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", row("Total Non-Refundable", r.non_refundable))?;
    writeln!(out, "{rule}")?;
    write!(out, "{}", row("Refund Due", r.refund_due))?;
    if r.is_zero_refund {
        write!(out, "\n   No refund is due.")?;
    }
    Ok(out)
}
