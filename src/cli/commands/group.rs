use std::sync::Arc;

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::pages::{GroupPage, PageContext};
use crate::types::MonthSelection;

#[derive(Subcommand)]
pub enum GroupCommands {
    #[command(about = "List group members")]
    Show {
        #[arg(long, help = "Filter by name or email (case-insensitive)")]
        search: Option<String>,
    },

    #[command(about = "Invite someone by email")]
    Invite {
        #[arg(help = "Email to invite")]
        email: String,
    },

    #[command(about = "Remove a member (asks for confirmation)")]
    Remove {
        #[arg(help = "Member ID")]
        member_id: String,
    },

    #[command(about = "Per-member totals for a month (defaults to current month)")]
    Stats {
        #[arg(long, help = "Year")]
        year: Option<i32>,
        #[arg(long, help = "Month (1-12)")]
        month: Option<u32>,
    },
}

pub async fn handle(
    cmd: GroupCommands,
    ctx: Arc<PageContext>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut page = GroupPage::open(ctx)?;

    match cmd {
        GroupCommands::Show { search } => {
            page.refresh().await?;
            if let Some(query) = search {
                page.set_query(&query);
            }
            output_view(&output_format, page.view(), &page.visible_members())
        }
        GroupCommands::Invite { email } => {
            page.invite(&email).await?;
            output_view(&output_format, page.view(), &page.group())
        }
        GroupCommands::Remove { member_id } => {
            page.refresh().await?;
            if page.remove_member(&member_id).await? {
                output_view(&output_format, page.view(), &page.group())
            } else {
                output_success(&output_format, "Remoção cancelada.", None)
            }
        }
        GroupCommands::Stats { year, month } => {
            let current = MonthSelection::current();
            let selection = MonthSelection::new(
                year.unwrap_or(current.year),
                month.unwrap_or(current.month),
            )?;
            page.select_month(selection).await?;
            let stats = page.stats().map(|(_, s)| s.clone()).unwrap_or_default();
            output_view(
                &output_format,
                page.view(),
                &json!({ "year": selection.year, "month": selection.month, "members": stats }),
            )
        }
    }
}
