//! Session state shared by every page.
//!
//! The token, the active group and the cached plan tier live in durable
//! storage under fixed keys. Pages call [`SessionManager::require`] before
//! doing anything; the fetcher calls [`SessionManager::expire`] on a 401.

pub mod navigator;
pub mod store;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
pub use navigator::{Navigator, RecordingNavigator, TerminalNavigator};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

pub const TOKEN_KEY: &str = "accessToken";
pub const ACTIVE_GROUP_KEY: &str = "activeGroupId";
pub const USER_PLAN_KEY: &str = "userPlan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Gratuito,
    Premium,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Gratuito => "gratuito",
            Plan::Premium => "premium",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "gratuito" | "free" => Some(Plan::Gratuito),
            "premium" => Some(Plan::Premium),
            _ => None,
        }
    }
}

/// What a page needs before it may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Token,
    Group,
}

/// Snapshot of the stored session handed to a page after the guard passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub active_group_id: Option<String>,
    pub user_plan: Option<Plan>,
}

impl Session {
    /// Active group id; present whenever the guard ran with `Requirement::Group`
    pub fn group_id(&self) -> ClientResult<&str> {
        self.active_group_id
            .as_deref()
            .ok_or(ClientError::LoginRequired)
    }
}

/// Owns the durable session keys and the once-per-expiry redirect latch.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    redirected: AtomicBool,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            redirected: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn token(&self) -> ClientResult<Option<String>> {
        Ok(non_empty(self.store.get(TOKEN_KEY)?))
    }

    /// Session guard: check the stored keys without touching the network.
    ///
    /// Missing values redirect to login and yield `LoginRequired`.
    pub fn require(&self, requirement: Requirement) -> ClientResult<Session> {
        let token = match self.token()? {
            Some(token) => token,
            None => return Err(self.send_to_login()),
        };

        let active_group_id = non_empty(self.store.get(ACTIVE_GROUP_KEY)?);
        if requirement == Requirement::Group && active_group_id.is_none() {
            return Err(self.send_to_login());
        }

        let user_plan = self
            .store
            .get(USER_PLAN_KEY)?
            .as_deref()
            .and_then(Plan::parse);

        Ok(Session {
            token,
            active_group_id,
            user_plan,
        })
    }

    /// Store a fresh token after login and re-arm the expiry latch.
    pub fn begin(&self, token: &str) -> ClientResult<()> {
        self.store.set(TOKEN_KEY, token)?;
        self.redirected.store(false, Ordering::SeqCst);
        tracing::debug!("session started");
        Ok(())
    }

    pub fn set_active_group(&self, group_id: &str) -> ClientResult<()> {
        self.store.set(ACTIVE_GROUP_KEY, group_id)
    }

    pub fn set_plan(&self, plan: Plan) -> ClientResult<()> {
        self.store.set(USER_PLAN_KEY, plan.as_str())
    }

    /// Drop every session key
    pub fn clear(&self) -> ClientResult<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(ACTIVE_GROUP_KEY)?;
        self.store.remove(USER_PLAN_KEY)?;
        Ok(())
    }

    /// Handle a 401: clear storage and navigate to login.
    ///
    /// Only the first caller after a `begin` does the work, so overlapping
    /// requests that all see 401 produce a single redirect.
    pub fn expire(&self) -> ClientError {
        if self
            .redirected
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            tracing::info!("session rejected by server, clearing stored credentials");
            if let Err(e) = self.clear() {
                tracing::warn!("failed to clear session: {}", e);
            }
            self.navigator.redirect_to_login();
        }
        ClientError::SessionExpired
    }

    /// Deliberate end of the session (logout, account deletion).
    pub fn end(&self) -> ClientResult<()> {
        self.clear()?;
        self.redirected.store(true, Ordering::SeqCst);
        self.navigator.redirect_to_login();
        Ok(())
    }

    /// Every guarded open without a session navigates; only `expire` is latched.
    fn send_to_login(&self) -> ClientError {
        self.navigator.redirect_to_login();
        ClientError::LoginRequired
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
