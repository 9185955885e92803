use std::sync::Arc;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::pages::{AchievementsPage, PageContext};

pub async fn handle(ctx: Arc<PageContext>, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut page = AchievementsPage::open(ctx)?;
    page.refresh().await?;
    output_view(&output_format, page.view(), &page.achievements())
}
