use std::sync::Arc;

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::pages::{LoginPage, PageContext, RegisterForm};
use crate::session::{ACTIVE_GROUP_KEY, USER_PLAN_KEY};

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login with email and password")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Use the form-encoded /token login")]
        legacy: bool,
    },

    #[command(about = "Logout and forget the stored session")]
    Logout,

    #[command(about = "Show stored session state (no request is made)")]
    Status,

    #[command(about = "Register new user")]
    Register {
        #[arg(help = "Full name")]
        nome: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Password confirmation (will prompt if not provided)")]
        confirm: Option<String>,
    },

    #[command(about = "Select the active group for group pages")]
    UseGroup {
        #[arg(help = "Group ID")]
        group_id: String,
    },
}

pub async fn handle(
    cmd: AuthCommands,
    ctx: Arc<PageContext>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = LoginPage::new(ctx.clone());

    match cmd {
        AuthCommands::Login { email, password, legacy } => {
            let password = value_or_prompt(password, "Senha").await?;
            let user = page.login(&email, &password, legacy).await?;
            output_success(
                &output_format,
                &format!("Logged in as {} <{}>", user.nome, user.email),
                Some(json!({ "user": user })),
            )
        }
        AuthCommands::Logout => {
            page.logout()?;
            output_notice(&output_format, page.view())
        }
        AuthCommands::Status => {
            let session = ctx.session();
            let store = session.store();
            let logged_in = session.token()?.is_some();
            let group = store.get(ACTIVE_GROUP_KEY)?;
            let plan = store.get(USER_PLAN_KEY)?;

            match output_format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "logged_in": logged_in,
                            "active_group_id": group,
                            "user_plan": plan,
                        }))?
                    );
                }
                OutputFormat::Text => {
                    println!("Logged in:    {}", if logged_in { "yes" } else { "no" });
                    println!("Active group: {}", group.as_deref().unwrap_or("-"));
                    println!("Plan:         {}", plan.as_deref().unwrap_or("-"));
                }
            }
            Ok(())
        }
        AuthCommands::Register { nome, email, password, confirm } => {
            let password = value_or_prompt(password, "Senha").await?;
            let confirm_password = value_or_prompt(confirm, "Confirme a senha").await?;
            let form = RegisterForm {
                nome,
                email,
                password,
                confirm_password,
            };
            page.register(&form).await?;
            output_notice(&output_format, page.view())
        }
        AuthCommands::UseGroup { group_id } => {
            page.select_group(&group_id)?;
            output_notice(&output_format, page.view())
        }
    }
}
