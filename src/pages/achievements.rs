use std::sync::Arc;

use super::{PageContext, View};
use crate::error::ClientResult;
use crate::models::Achievement;
use crate::render::views;
use crate::session::{Requirement, Session};

pub struct AchievementsPage {
    ctx: Arc<PageContext>,
    session: Session,
    achievements: Vec<Achievement>,
    view: View,
}

impl AchievementsPage {
    pub fn open(ctx: Arc<PageContext>) -> ClientResult<Self> {
        let session = ctx.guard(Requirement::Group)?;
        Ok(Self {
            ctx,
            session,
            achievements: Vec::new(),
            view: View::default(),
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let group_id = self.session.group_id()?.to_string();
        match self.ctx.api.achievements(&group_id).await {
            Ok(items) => {
                self.view.render(views::achievements(&items));
                self.achievements = items;
                Ok(())
            }
            Err(e) => Err(self.view.fail(e)),
        }
    }
}
