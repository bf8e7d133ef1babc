//! Interactive shell commands
//!
//! Parsing is kept apart from the read loop in the binary so every command
//! form can be checked without a terminal.

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::ClaimId;
use domain_claims::ClaimStatus;

use crate::state::ClaimsState;

pub const HELP: &str = "\
commands:
  list                                 reload and show the table
  submit <user_id> <amount> [text...]  submit a claim
  status <claim_id> <STATUS>           PENDING, APPROVED or REJECTED
  form                                 show the form fields
  dismiss                              close the notification
  help                                 this text
  quit                                 leave";

/// One line of shell input
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    List,
    Form,
    Dismiss,
    Help,
    Quit,
    Submit {
        user_id: String,
        amount: Decimal,
        description: String,
    },
    Status {
        claim_id: ClaimId,
        status: ClaimStatus,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ShellError {
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    #[error("{0}")]
    InvalidStatus(String),

    #[error("unrecognised command; type `help`")]
    Unrecognised,
}

impl ShellCommand {
    /// Parses a line; blank lines give `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let command = match words.as_slice() {
            [] => return Ok(None),
            ["quit"] | ["exit"] => ShellCommand::Quit,
            ["help"] => ShellCommand::Help,
            ["list"] => ShellCommand::List,
            ["form"] => ShellCommand::Form,
            ["dismiss"] => ShellCommand::Dismiss,
            ["submit", user_id, amount, description @ ..] => ShellCommand::Submit {
                user_id: (*user_id).to_string(),
                amount: amount
                    .parse()
                    .map_err(|_| ShellError::InvalidAmount((*amount).to_string()))?,
                description: description.join(" "),
            },
            ["status", claim_id, status] => ShellCommand::Status {
                claim_id: ClaimId::new(*claim_id),
                status: status
                    .parse()
                    .map_err(|e: domain_claims::ClaimError| ShellError::InvalidStatus(e.to_string()))?,
            },
            _ => return Err(ShellError::Unrecognised),
        };
        Ok(Some(command))
    }

    /// Why the command cannot run against `state` right now, if it cannot
    pub fn refusal(&self, state: &ClaimsState) -> Option<String> {
        match self {
            ShellCommand::Submit { .. } => state.check_submit().err().map(|e| e.to_string()),
            ShellCommand::Status { claim_id, .. } => {
                if state.find_claim(claim_id).is_none() {
                    return Some(format!("no loaded claim with id {claim_id}; run `list` first"));
                }
                state.check_transition(claim_id).err().map(|e| e.to_string())
            }
            _ => None,
        }
    }
}
