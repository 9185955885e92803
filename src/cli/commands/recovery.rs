use std::sync::Arc;

use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::pages::{PageContext, RecoveryFlow};

#[derive(Subcommand)]
pub enum RecoveryCommands {
    #[command(about = "Send a recovery code to an email")]
    Request {
        #[arg(help = "Email")]
        email: String,
    },

    #[command(about = "Check a recovery code")]
    Verify {
        #[arg(help = "Email")]
        email: String,
        #[arg(help = "Code received by email")]
        code: String,
    },

    #[command(about = "Verify the code and set a new password")]
    Reset {
        #[arg(help = "Email")]
        email: String,
        #[arg(help = "Code received by email")]
        code: String,
        #[arg(long, help = "New password (will prompt if not provided)")]
        password: Option<String>,
        #[arg(long, help = "New password confirmation (will prompt if not provided)")]
        confirm: Option<String>,
    },
}

pub async fn handle(
    cmd: RecoveryCommands,
    ctx: Arc<PageContext>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        RecoveryCommands::Request { email } => {
            let mut flow = RecoveryFlow::new(ctx);
            flow.request_code(&email).await?;
            output_notice(&output_format, flow.view())
        }
        RecoveryCommands::Verify { email, code } => {
            let mut flow = RecoveryFlow::at_code(ctx, &email);
            flow.verify_code(&code).await?;
            output_notice(&output_format, flow.view())
        }
        RecoveryCommands::Reset { email, code, password, confirm } => {
            let mut flow = RecoveryFlow::at_code(ctx, &email);
            flow.verify_code(&code).await?;
            let password = value_or_prompt(password, "Nova senha").await?;
            let confirm = value_or_prompt(confirm, "Confirme a nova senha").await?;
            flow.reset_password(&password, &confirm).await?;
            output_notice(&output_format, flow.view())
        }
    }
}
