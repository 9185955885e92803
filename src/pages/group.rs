use std::sync::Arc;

use super::{PageContext, View};
use crate::error::{ClientError, ClientResult};
use crate::models::{Group, Member, MemberStats};
use crate::render::filter_items;
use crate::render::views;
use crate::session::{Requirement, Session};
use crate::types::{required, MonthSelection};

/// "Meu grupo": members, invitations and the monthly per-member summary.
pub struct GroupPage {
    ctx: Arc<PageContext>,
    session: Session,
    group: Option<Group>,
    stats: Option<(MonthSelection, Vec<MemberStats>)>,
    query: String,
    view: View,
}

impl GroupPage {
    pub fn open(ctx: Arc<PageContext>) -> ClientResult<Self> {
        let session = ctx.guard(Requirement::Group)?;
        Ok(Self {
            ctx,
            session,
            group: None,
            stats: None,
            query: String::new(),
            view: View::default(),
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn group(&self) -> Option<&Group> {
        self.group.as_ref()
    }

    pub fn stats(&self) -> Option<&(MonthSelection, Vec<MemberStats>)> {
        self.stats.as_ref()
    }

    /// Members matching the current search query
    pub fn visible_members(&self) -> Vec<&Member> {
        match &self.group {
            Some(group) => filter_items(&group.membros, &self.query),
            None => Vec::new(),
        }
    }

    /// Live search over the cached member list, no request.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.redraw();
    }

    fn group_id(&self) -> ClientResult<String> {
        Ok(self.session.group_id()?.to_string())
    }

    fn redraw(&mut self) {
        let mut frame = match &self.group {
            Some(group) => views::group_members(group, &self.query),
            None => String::new(),
        };
        if let Some((selection, stats)) = &self.stats {
            if !frame.is_empty() {
                frame.push('\n');
            }
            frame.push_str(&views::member_stats(selection.year, selection.month, stats));
        }
        self.view.render(frame);
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let group_id = self.group_id()?;
        match self.ctx.api.group(&group_id).await {
            Ok(group) => {
                self.group = Some(group);
                self.redraw();
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }

    /// Fetch the summary for a month. Every change of month re-fetches.
    pub async fn select_month(&mut self, selection: MonthSelection) -> ClientResult<()> {
        let group_id = self.group_id()?;
        match self
            .ctx
            .api
            .member_stats(&group_id, selection.year, selection.month)
            .await
        {
            Ok(stats) => {
                self.stats = Some((selection, stats));
                self.redraw();
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }

    pub async fn invite(&mut self, email: &str) -> ClientResult<()> {
        let email = required("email", email).map_err(|e| self.view.fail(e))?;
        if !email.contains('@') {
            return Err(self.view.fail(ClientError::validation("Informe um email válido.")));
        }
        let group_id = self.group_id()?;

        match self.ctx.api.invite(&group_id, &email).await {
            Ok(_) => {
                tracing::info!(group_id = %group_id, "invite sent");
                self.view.success(format!("Convite enviado para {}.", email));
                let alerted = self
                    .ctx
                    .dialogs
                    .alert("Convite enviado", &format!("Enviamos um convite para {}.", email))
                    .await;
                self.refresh().await?;
                alerted.map_err(|e| self.view.fail(e))
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }

    /// Ask first; only a confirmed removal reaches the server.
    ///
    /// Returns whether the member was removed.
    pub async fn remove_member(&mut self, member_id: &str) -> ClientResult<bool> {
        let group_id = self.group_id()?;
        let name = self
            .group
            .as_ref()
            .and_then(|g| g.member(member_id))
            .map(|m| m.nome.clone())
            .unwrap_or_else(|| format!("o membro {}", member_id));

        let confirmed = self
            .ctx
            .dialogs
            .confirm(
                "Remover membro",
                &format!("Tem certeza que deseja remover {} do grupo?", name),
            )
            .await?;
        if !confirmed {
            return Ok(false);
        }

        match self.ctx.api.remove_member(&group_id, member_id).await {
            Ok(_) => {
                tracing::info!(group_id = %group_id, member_id, "member removed");
                self.view.success(format!("{} foi removido do grupo.", name));
                self.refresh().await?;
                Ok(true)
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }
}
