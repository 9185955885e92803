use std::sync::Arc;

use clap::Subcommand;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::pages::{DashboardPage, GoalForm, PageContext};

#[derive(Subcommand)]
pub enum DashboardCommands {
    #[command(about = "Show balance, active goal and recent transactions")]
    Show,

    #[command(about = "Create a goal for the active group")]
    Goal {
        #[arg(help = "Goal title")]
        titulo: String,
        #[arg(help = "Target amount (e.g. 1000 or 1.000,50)")]
        valor_meta: String,
        #[arg(long, help = "Deadline (YYYY-MM-DD)")]
        data_limite: Option<String>,
    },
}

pub async fn handle(
    cmd: DashboardCommands,
    ctx: Arc<PageContext>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = DashboardPage::open(ctx)?;

    match cmd {
        DashboardCommands::Show => {
            page.refresh().await?;
        }
        DashboardCommands::Goal { titulo, valor_meta, data_limite } => {
            let form = GoalForm {
                titulo,
                valor_meta,
                data_limite,
            };
            page.create_goal(&form).await?;
        }
    }

    output_view(&output_format, page.view(), &page.dashboard())
}
