//! Plain text rendering of the client state

use std::fmt::Write as _;
use std::time::Instant;

use domain_claims::{Claim, ClaimStatus, RecordedStatus};

use crate::notification::Severity;
use crate::state::ClaimsState;

const HEADERS: [&str; 7] = ["ID", "User", "Amount", "Status", "Description", "Created", "Actions"];
const STATUS_COLUMN: usize = 3;
const BUSY_MARKER: &str = "…";

/// Visual category of a status cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Warning,
    Success,
    Error,
    Neutral,
}

impl StatusCategory {
    /// Maps a status label to its category; unknown labels are neutral
    pub fn for_label(label: &str) -> Self {
        match label {
            "PENDING" => StatusCategory::Warning,
            "APPROVED" => StatusCategory::Success,
            "REJECTED" => StatusCategory::Error,
            _ => StatusCategory::Neutral,
        }
    }

    pub fn for_status(status: &RecordedStatus) -> Self {
        Self::for_label(status.as_str())
    }

    fn ansi(&self) -> Option<&'static str> {
        match self {
            StatusCategory::Warning => Some("\x1b[33m"),
            StatusCategory::Success => Some("\x1b[32m"),
            StatusCategory::Error => Some("\x1b[31m"),
            StatusCategory::Neutral => None,
        }
    }
}

impl From<Severity> for StatusCategory {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Success => StatusCategory::Success,
            Severity::Error => StatusCategory::Error,
            Severity::Info => StatusCategory::Neutral,
        }
    }
}

/// Rendering switches
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    pub color: bool,
}

fn paint(text: &str, category: StatusCategory, options: ViewOptions) -> String {
    match category.ansi() {
        Some(code) if options.color => format!("{code}{text}\x1b[0m"),
        _ => text.to_string(),
    }
}

/// Choice control for a row: the three statuses, current one starred
fn actions_cell(claim: &Claim, busy: bool) -> String {
    let choices: Vec<String> = ClaimStatus::ALL
        .iter()
        .map(|status| {
            if claim.status == *status {
                format!("*{}", status.label())
            } else {
                status.label().to_string()
            }
        })
        .collect();
    let mut cell = format!("[{}]", choices.join("|"));
    if busy {
        cell.push(' ');
        cell.push_str(BUSY_MARKER);
    }
    cell
}

fn row_cells(claim: &Claim, busy: bool) -> [String; 7] {
    [
        claim.claim_id.to_string(),
        claim.user_id.to_string(),
        claim.amount.normalize().to_string(),
        claim.status.to_string(),
        claim.description.clone().unwrap_or_default(),
        claim.created_at.clone(),
        actions_cell(claim, busy),
    ]
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Renders the cached list as a table
pub fn render_table(state: &ClaimsState, options: ViewOptions) -> String {
    let rows: Vec<([String; 7], StatusCategory)> = state
        .claims()
        .iter()
        .map(|claim| {
            (
                row_cells(claim, state.is_updating(&claim.claim_id)),
                StatusCategory::for_status(&claim.status),
            )
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for (cells, _) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad(h, *w))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));

    if rows.is_empty() {
        let _ = writeln!(out, "(no claims)");
        return out;
    }

    for (cells, category) in &rows {
        let line: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(column, (cell, width))| {
                let padded = pad(cell, *width);
                if column == STATUS_COLUMN {
                    paint(&padded, *category, options)
                } else {
                    padded
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

/// Renders the visible notification, if any
pub fn render_notification(state: &ClaimsState, now: Instant, options: ViewOptions) -> Option<String> {
    state.visible_notification(now).map(|(message, severity)| {
        let tag = format!("[{}]", severity.as_str());
        format!("{} {message}", paint(&tag, severity.into(), options))
    })
}

/// Renders the submission form line, with the submit control's busy state
pub fn render_form(state: &ClaimsState) -> String {
    let form = state.form();
    let submit = if state.is_submitting() { BUSY_MARKER } else { "Submit" };
    format!(
        "User ID: {:?}  Amount: {}  Description: {:?}  [{submit}]",
        form.user_id,
        form.amount.normalize(),
        form.description,
    )
}
