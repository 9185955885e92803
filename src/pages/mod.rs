//! Page controllers.
//!
//! Each page owns its state explicitly: the session snapshot taken when the
//! guard passed, the last fetched view models, the rendered frame and the
//! message area. Mutations never patch local state; they re-fetch and
//! re-render from the server's answer.

pub mod account;
pub mod achievements;
pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod group;
pub mod recovery;
pub mod support;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::dialog::DialogController;
use crate::error::{ClientError, ClientResult};
use crate::session::{Requirement, Session, SessionManager};

pub use account::{AccountPage, EditState};
pub use achievements::AchievementsPage;
pub use admin::AdminPage;
pub use auth::{LoginPage, RegisterForm};
pub use dashboard::{DashboardPage, GoalForm};
pub use group::GroupPage;
pub use recovery::{RecoveryFlow, RecoveryStep};
pub use support::SupportPage;

/// Collaborators every page needs
pub struct PageContext {
    pub api: ApiClient,
    pub dialogs: DialogController,
}

impl PageContext {
    pub fn new(api: ApiClient, dialogs: DialogController) -> Arc<Self> {
        Arc::new(Self { api, dialogs })
    }

    pub fn session(&self) -> &SessionManager {
        self.api.session()
    }

    pub fn guard(&self, requirement: Requirement) -> ClientResult<Session> {
        self.session().require(requirement)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Rendered frame plus the page's message area
#[derive(Debug, Default)]
pub struct View {
    frame: String,
    notice: Option<Notice>,
}

impl View {
    /// Replace the whole frame. A stale error does not outlive a good render.
    pub fn render(&mut self, frame: String) {
        self.frame = frame;
        if matches!(self.notice, Some(Notice::Error(_))) {
            self.notice = None;
        }
    }

    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Success(message.into()));
    }

    /// Route a failure to the message area and hand it back to the caller.
    ///
    /// After a terminal auth failure the page is gone; nothing is rendered.
    pub fn fail(&mut self, err: ClientError) -> ClientError {
        if err.is_terminal() {
            self.frame.clear();
            self.notice = None;
        } else {
            self.notice = Some(Notice::Error(err.to_string()));
        }
        err
    }
}
