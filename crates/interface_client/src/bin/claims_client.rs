//! Claims Tracker - Command Line Client
//!
//! # Usage
//!
//! ```bash
//! # List every claim
//! claims-client list
//!
//! # Submit a claim
//! claims-client submit --user-id u1 --amount 100 --description taxi
//!
//! # Approve a claim
//! claims-client set-status <CLAIM_ID> APPROVED
//!
//! # Interactive session
//! claims-client shell
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_BASE_URL` - Claims API base URL (default: http://localhost:8000)
//! * `CLAIMS_API_TOKEN` - Bearer token, if the deployment requires one
//! * `CLAIMS_NOTIFICATION_TTL_MS` - Notification lifetime (default: 3000)
//! * `CLAIMS_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `CLAIMS_COLOR` - Colour the status column (default: true)

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::ClaimId;
use domain_claims::{ClaimFilter, ClaimStatus, ClaimsPort};
use interface_client::config::ClientConfig;
use interface_client::shell::{self, ShellCommand};
use interface_client::view::{render_form, render_notification, render_table};
use interface_client::{ClaimsClient, ClientError, HttpClaimsApi, ViewOptions};

type Client = ClaimsClient<dyn ClaimsPort>;

#[derive(Debug, Parser)]
#[command(name = "claims-client", version, about = "Submit and review claims")]
struct Cli {
    /// Claims API base URL
    #[arg(long, env = "CLAIMS_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the claim table
    List {
        /// Only claims from this submitter
        #[arg(long)]
        user_id: Option<String>,
        /// Only claims in this status
        #[arg(long)]
        status: Option<ClaimStatus>,
    },
    /// Submit a new claim
    Submit {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change the status of a claim
    SetStatus {
        claim_id: String,
        status: ClaimStatus,
    },
    /// Check that the Claims API is reachable
    Health,
    /// Interactive session
    Shell,
}

/// Main entry point for the claims client.
///
/// Loads configuration, initializes logging to stderr, loads the claim list,
/// and runs the requested command.
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("failed to load configuration")?;
    if let Some(base_url) = cli.base_url.clone() {
        config.base_url = base_url;
    }
    if cli.no_color {
        config.color = false;
    }

    init_tracing(&config.log_level);

    tracing::debug!(base_url = %config.base_url, "Starting claims client");

    let port: Arc<dyn ClaimsPort> = Arc::new(HttpClaimsApi::new(&config)?);
    let client: Client = ClaimsClient::new(port, config.notification_ttl());
    let view = ViewOptions { color: config.color };

    let succeeded = match cli.command {
        Command::List { user_id, status } => {
            let filter = ClaimFilter { user_id: user_id.map(Into::into), status };
            client.load_filtered(filter).await;
            true
        }
        Command::Submit { user_id, amount, description } => {
            client.load_list().await;
            client.with_state(|state| {
                state.set_user_id(user_id);
                state.set_amount(amount);
                state.set_description(description);
            });
            client.submit_claim().await.is_ok()
        }
        Command::SetStatus { claim_id, status } => {
            client.load_list().await;
            client
                .request_status_transition(ClaimId::new(claim_id), status)
                .await
                .is_ok()
        }
        Command::Health => {
            return Ok(match client.health().await {
                Ok(()) => {
                    println!("Claims API at {} is healthy", config.base_url);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Claims API at {} is unavailable: {e}", config.base_url);
                    ExitCode::FAILURE
                }
            });
        }
        Command::Shell => {
            client.load_list().await;
            run_shell(client, view).await?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    print_screen(&client, view);

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn print_screen(client: &Client, view: ViewOptions) {
    let state = client.snapshot();
    if let Some(line) = render_notification(&state, Instant::now(), view) {
        println!("{line}");
    }
    print!("{}", render_table(&state, view));
}

/// Reads commands from stdin; mutations run as background tasks so the prompt
/// stays responsive while requests are in flight.
async fn run_shell(client: Client, view: ViewOptions) -> anyhow::Result<()> {
    print_screen(&client, view);
    println!("{}", shell::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        if let Some(refusal) = command.refusal(&client.snapshot()) {
            println!("{refusal}");
            continue;
        }

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{}", shell::HELP),
            ShellCommand::List => {
                client.load_list().await;
                print_screen(&client, view);
            }
            ShellCommand::Form => println!("{}", render_form(&client.snapshot())),
            ShellCommand::Dismiss => client.with_state(|state| state.dismiss_notification()),
            ShellCommand::Submit { user_id, amount, description } => {
                client.with_state(|state| {
                    state.set_user_id(user_id);
                    state.set_amount(amount);
                    state.set_description(description);
                });
                let task_client = client.clone();
                tokio::spawn(async move {
                    report(task_client.submit_claim().await);
                    print_screen(&task_client, view);
                });
            }
            ShellCommand::Status { claim_id, status } => {
                let task_client = client.clone();
                tokio::spawn(async move {
                    report(task_client.request_status_transition(claim_id, status).await);
                    print_screen(&task_client, view);
                });
            }
        }
    }
    Ok(())
}

/// Busy refusals have no notification of their own, so print them
fn report(result: Result<(), ClientError>) {
    if let Err(e) = result {
        if e.is_busy() {
            println!("{e}");
        }
    }
}

/// Initializes the tracing subscriber, writing to stderr so stdout stays the table.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "claims-client", "submit", "--user-id", "u1", "--amount", "100", "--description", "taxi",
        ])
        .unwrap();
        match cli.command {
            Command::Submit { user_id, amount, description } => {
                assert_eq!(user_id, "u1");
                assert_eq!(amount, dec!(100));
                assert_eq!(description, "taxi");
            }
            other => panic!("Expected Submit, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_set_status_accepts_any_case() {
        let cli = Cli::try_parse_from(["claims-client", "set-status", "c1", "approved", "--no-color"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(
            cli.command,
            Command::SetStatus { ref claim_id, status: ClaimStatus::Approved } if claim_id == "c1"
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["claims-client", "set-status", "c1", "CLOSED"]).is_err());
        assert!(Cli::try_parse_from(["claims-client", "list", "--status", "maybe"]).is_err());
    }
}
