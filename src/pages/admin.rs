use std::sync::Arc;

use super::{PageContext, View};
use crate::error::ClientResult;
use crate::models::{AdminStats, User};
use crate::render::{filter_items, views};
use crate::session::Requirement;

pub struct AdminPage {
    ctx: Arc<PageContext>,
    stats: Option<AdminStats>,
    users: Vec<User>,
    query: String,
    view: View,
}

impl AdminPage {
    pub fn open(ctx: Arc<PageContext>) -> ClientResult<Self> {
        ctx.guard(Requirement::Token)?;
        Ok(Self {
            ctx,
            stats: None,
            users: Vec::new(),
            query: String::new(),
            view: View::default(),
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Users matching the current search query
    pub fn visible_users(&self) -> Vec<&User> {
        filter_items(&self.users, &self.query)
    }

    fn redraw(&mut self) {
        let mut frame = String::new();
        if let Some(stats) = &self.stats {
            frame.push_str(&views::admin_stats(stats));
            frame.push('\n');
        }
        frame.push_str(&views::user_list(&self.users, &self.query));
        self.view.render(frame);
    }

    /// Fetch stats and the full user list together
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let api = &self.ctx.api;
        match futures::try_join!(api.admin_stats(), api.admin_users()) {
            Ok((stats, users)) => {
                self.stats = Some(stats);
                self.users = users;
                self.redraw();
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }

    /// Live search: re-filter the cached list, no request.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.redraw();
    }

    pub async fn user_detail(&mut self, user_id: &str) -> ClientResult<User> {
        match self.ctx.api.admin_user(user_id).await {
            Ok(user) => {
                self.view.render(views::user_detail(&user));
                Ok(user)
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }

    /// Confirm, grant, then re-read the list. Returns whether it was granted.
    pub async fn grant_premium(&mut self, user_id: &str) -> ClientResult<bool> {
        let label = self
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| format!("{} ({})", u.nome, u.email))
            .unwrap_or_else(|| format!("o usuário {}", user_id));

        let confirmed = self
            .ctx
            .dialogs
            .confirm(
                "Conceder Premium",
                &format!("Conceder o plano Premium para {}?", label),
            )
            .await?;
        if !confirmed {
            return Ok(false);
        }

        match self.ctx.api.grant_premium(user_id).await {
            Ok(_) => {
                tracing::info!(user_id, "premium granted");
                self.view.success(format!("Plano Premium concedido para {}.", label));
                self.refresh().await?;
                Ok(true)
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }
}
