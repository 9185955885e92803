pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::config::config;
use crate::dialog::{AutoPrompter, DialogController, Prompter, TerminalPrompter};
use crate::pages::PageContext;
use crate::session::{FileSessionStore, SessionManager, TerminalNavigator};

#[derive(Parser)]
#[command(name = "clarify")]
#[command(about = "Clarify CLI - group finance from the terminal")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, short = 'y', global = true, help = "Answer yes to every confirmation")]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, registration and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Profile, password and account removal")]
    Account {
        #[command(subcommand)]
        cmd: commands::account::AccountCommands,
    },

    #[command(about = "Active group dashboard and goals")]
    Dashboard {
        #[command(subcommand)]
        cmd: commands::dashboard::DashboardCommands,
    },

    #[command(about = "Group members, invitations and monthly summary")]
    Group {
        #[command(subcommand)]
        cmd: commands::group::GroupCommands,
    },

    #[command(about = "Administration: platform stats and users")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },

    #[command(about = "Group achievements")]
    Achievements,

    #[command(about = "Contact support")]
    Support {
        #[command(subcommand)]
        cmd: commands::support::SupportCommands,
    },

    #[command(about = "Password recovery")]
    Recovery {
        #[command(subcommand)]
        cmd: commands::recovery::RecoveryCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Wire the page context from configuration: durable file store, terminal
/// navigation and either interactive or auto-confirmed dialogs.
pub fn build_context(assume_yes: bool) -> anyhow::Result<Arc<PageContext>> {
    let config = config();
    let store = Arc::new(FileSessionStore::new(config.config_dir()?)?);
    let session = Arc::new(SessionManager::new(store, Arc::new(TerminalNavigator)));
    let api = ApiClient::new(config.base_url()?, session)?
        .with_request_logging(config.api.enable_request_logging);

    let prompter: Arc<dyn Prompter> = if assume_yes {
        Arc::new(AutoPrompter { confirm: true })
    } else {
        Arc::new(TerminalPrompter)
    };

    tracing::debug!(base_url = api.base_url(), "client configured");
    Ok(PageContext::new(api, DialogController::new(prompter)))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = build_context(cli.yes)?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, ctx, output_format).await,
        Commands::Account { cmd } => commands::account::handle(cmd, ctx, output_format).await,
        Commands::Dashboard { cmd } => commands::dashboard::handle(cmd, ctx, output_format).await,
        Commands::Group { cmd } => commands::group::handle(cmd, ctx, output_format).await,
        Commands::Admin { cmd } => commands::admin::handle(cmd, ctx, output_format).await,
        Commands::Achievements => commands::achievements::handle(ctx, output_format).await,
        Commands::Support { cmd } => commands::support::handle(cmd, ctx, output_format).await,
        Commands::Recovery { cmd } => commands::recovery::handle(cmd, ctx, output_format).await,
    }
}
