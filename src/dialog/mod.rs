//! Alert/confirm dialogs shared by every page.
//!
//! A page owns one [`DialogController`]. Only one dialog can be open at a
//! time; asking for a second while the first is unanswered fails with
//! [`ClientError::DialogBusy`] instead of replacing the first one.

pub mod prompter;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{ClientError, ClientResult};
pub use prompter::{AutoPrompter, Prompter, ScriptedPrompter, TerminalPrompter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Alert,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

/// Which control closed the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Acknowledge,
    Confirm,
    Cancel,
}

pub struct DialogController {
    prompter: Arc<dyn Prompter>,
    open: Mutex<()>,
}

impl DialogController {
    pub fn new(prompter: Arc<dyn Prompter>) -> Self {
        Self {
            prompter,
            open: Mutex::new(()),
        }
    }

    /// Show a message with a single acknowledgement control.
    pub async fn alert(&self, title: &str, message: &str) -> ClientResult<()> {
        let dialog = Dialog {
            kind: DialogKind::Alert,
            title: title.to_string(),
            message: message.to_string(),
        };
        self.show(&dialog).await.map(|_| ())
    }

    /// Ask a yes/no question; `true` only when the confirm control was used.
    pub async fn confirm(&self, title: &str, message: &str) -> ClientResult<bool> {
        let dialog = Dialog {
            kind: DialogKind::Confirm,
            title: title.to_string(),
            message: message.to_string(),
        };
        let choice = self.show(&dialog).await?;
        Ok(choice == DialogChoice::Confirm)
    }

    async fn show(&self, dialog: &Dialog) -> ClientResult<DialogChoice> {
        let _open = self.open.try_lock().map_err(|_| {
            tracing::warn!(title = %dialog.title, "dialog requested while another is open");
            ClientError::DialogBusy
        })?;
        self.prompter.present(dialog).await
    }
}
