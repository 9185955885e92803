use std::sync::Arc;

use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::pages::{PageContext, SupportPage};

#[derive(Subcommand)]
pub enum SupportCommands {
    #[command(about = "Open a support ticket")]
    Ticket {
        #[arg(help = "Subject")]
        assunto: String,
        #[arg(help = "Message (will prompt if not provided)")]
        mensagem: Option<String>,
    },
}

pub async fn handle(
    cmd: SupportCommands,
    ctx: Arc<PageContext>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = SupportPage::open(ctx)?;

    match cmd {
        SupportCommands::Ticket { assunto, mensagem } => {
            let mensagem = value_or_prompt(mensagem, "Mensagem").await?;
            page.submit_ticket(&assunto, &mensagem).await?;
            output_notice(&output_format, page.view())
        }
    }
}
