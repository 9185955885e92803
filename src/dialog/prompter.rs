use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{Dialog, DialogChoice, DialogKind};
use crate::error::{ClientError, ClientResult};

/// Surface that actually shows a dialog and reports which control was used.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn present(&self, dialog: &Dialog) -> ClientResult<DialogChoice>;
}

/// Interactive prompt on stdin/stderr
pub struct TerminalPrompter;

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn present(&self, dialog: &Dialog) -> ClientResult<DialogChoice> {
        let dialog = dialog.clone();
        tokio::task::spawn_blocking(move || -> ClientResult<DialogChoice> {
            let mut stderr = io::stderr();
            writeln!(stderr, "\n== {} ==", dialog.title)?;
            writeln!(stderr, "{}", dialog.message)?;

            match dialog.kind {
                DialogKind::Alert => {
                    write!(stderr, "[Enter] OK ")?;
                    stderr.flush()?;
                    let mut line = String::new();
                    io::stdin().lock().read_line(&mut line)?;
                    Ok(DialogChoice::Acknowledge)
                }
                DialogKind::Confirm => {
                    write!(stderr, "Confirmar? [s/N] ")?;
                    stderr.flush()?;
                    let mut line = String::new();
                    io::stdin().lock().read_line(&mut line)?;
                    match line.trim().to_lowercase().as_str() {
                        "s" | "sim" | "y" | "yes" => Ok(DialogChoice::Confirm),
                        _ => Ok(DialogChoice::Cancel),
                    }
                }
            }
        })
        .await
        .map_err(|e| ClientError::Storage(format!("prompt task failed: {}", e)))?
    }
}

/// Answers every dialog without asking (`--yes`)
pub struct AutoPrompter {
    pub confirm: bool,
}

#[async_trait]
impl Prompter for AutoPrompter {
    async fn present(&self, dialog: &Dialog) -> ClientResult<DialogChoice> {
        tracing::debug!(title = %dialog.title, confirm = self.confirm, "auto-answering dialog");
        Ok(match dialog.kind {
            DialogKind::Alert => DialogChoice::Acknowledge,
            DialogKind::Confirm if self.confirm => DialogChoice::Confirm,
            DialogKind::Confirm => DialogChoice::Cancel,
        })
    }
}

/// Replays a fixed list of answers and records what was shown.
///
/// Once the script runs out, alerts are acknowledged and confirms cancelled.
/// A held prompter waits for [`ScriptedPrompter::release`] before answering.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<DialogChoice>>,
    shown: Mutex<Vec<Dialog>>,
    gate: Option<Notify>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = DialogChoice>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            shown: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn held(answers: impl IntoIterator<Item = DialogChoice>) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::new(answers)
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn shown(&self) -> Vec<Dialog> {
        self.shown.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn present(&self, dialog: &Dialog) -> ClientResult<DialogChoice> {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(dialog.clone());
        }

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.answers.lock().ok().and_then(|mut a| a.pop_front());
        Ok(next.unwrap_or(match dialog.kind {
            DialogKind::Alert => DialogChoice::Acknowledge,
            DialogKind::Confirm => DialogChoice::Cancel,
        }))
    }
}
