use std::sync::Arc;

use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::pages::{AdminPage, PageContext};

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Platform stats and user list")]
    Users {
        #[arg(long, help = "Filter by name or email (case-insensitive)")]
        search: Option<String>,
    },

    #[command(about = "Show one user with transactions")]
    User {
        #[arg(help = "User ID")]
        user_id: String,
    },

    #[command(about = "Grant the premium plan (asks for confirmation)")]
    GrantPremium {
        #[arg(help = "User ID")]
        user_id: String,
    },
}

pub async fn handle(
    cmd: AdminCommands,
    ctx: Arc<PageContext>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = AdminPage::open(ctx)?;

    match cmd {
        AdminCommands::Users { search } => {
            page.refresh().await?;
            if let Some(query) = search {
                page.set_query(&query);
            }
            output_view(&output_format, page.view(), &page.visible_users())
        }
        AdminCommands::User { user_id } => {
            let user = page.user_detail(&user_id).await?;
            output_view(&output_format, page.view(), &user)
        }
        AdminCommands::GrantPremium { user_id } => {
            page.refresh().await?;
            if page.grant_premium(&user_id).await? {
                output_notice(&output_format, page.view())
            } else {
                output_success(&output_format, "Operação cancelada.", None)
            }
        }
    }
}
