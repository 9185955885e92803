use std::sync::Arc;

use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::pages::{AccountPage, PageContext};

#[derive(Subcommand)]
pub enum AccountCommands {
    #[command(about = "Show profile")]
    Show,

    #[command(about = "Edit name and email (requires current password)")]
    Edit {
        #[arg(long, help = "New name (defaults to current)")]
        nome: Option<String>,
        #[arg(long, help = "New email (defaults to current)")]
        email: Option<String>,
        #[arg(long, help = "Current password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Change password")]
    Password {
        #[arg(long, help = "Current password (will prompt if not provided)")]
        current: Option<String>,
        #[arg(long = "new", help = "New password (will prompt if not provided)")]
        new_password: Option<String>,
        #[arg(long, help = "New password confirmation (will prompt if not provided)")]
        confirm: Option<String>,
    },

    #[command(about = "Delete account permanently")]
    Delete,
}

pub async fn handle(
    cmd: AccountCommands,
    ctx: Arc<PageContext>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = AccountPage::open(ctx)?;

    match cmd {
        AccountCommands::Show => {
            page.refresh().await?;
            output_view(&output_format, page.view(), &page.profile())
        }
        AccountCommands::Edit { nome, email, password } => {
            page.refresh().await?;
            let (current_nome, current_email) = match page.profile() {
                Some(user) => (user.nome.clone(), user.email.clone()),
                None => (String::new(), String::new()),
            };

            page.request_edit()?;
            let password = value_or_prompt(password, "Senha atual").await?;
            page.confirm_password(&password).await?;

            let nome = nome.unwrap_or(current_nome);
            let email = email.unwrap_or(current_email);
            page.save(&nome, &email).await?;
            output_view(&output_format, page.view(), &page.profile())
        }
        AccountCommands::Password { current, new_password, confirm } => {
            let current = value_or_prompt(current, "Senha atual").await?;
            let new_password = value_or_prompt(new_password, "Nova senha").await?;
            let confirm = value_or_prompt(confirm, "Confirme a nova senha").await?;
            page.change_password(&current, &new_password, &confirm).await?;
            output_notice(&output_format, page.view())
        }
        AccountCommands::Delete => {
            if page.delete_account().await? {
                output_success(&output_format, "Conta excluída.", None)
            } else {
                output_success(&output_format, "Exclusão cancelada.", None)
            }
        }
    }
}
