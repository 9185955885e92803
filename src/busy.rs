use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ClientError, ClientResult};

pub const SENDING_LABEL: &str = "Enviando...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub label: String,
    pub disabled: bool,
}

/// A triggering control (submit button) whose state can be observed while a
/// request is in flight.
#[derive(Debug, Clone)]
pub struct Control {
    state: Arc<Mutex<ControlState>>,
}

impl Control {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControlState {
                label: label.into(),
                disabled: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> ControlState {
        self.lock().clone()
    }

    pub fn label(&self) -> String {
        self.lock().label.clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.lock().disabled
    }

    /// Disable the control and swap its label until the guard drops.
    ///
    /// A second submission while busy is refused.
    pub fn busy(&self, pending_label: &str) -> ClientResult<BusyGuard> {
        let mut state = self.lock();
        if state.disabled {
            return Err(ClientError::validation("Aguarde o envio em andamento."));
        }
        let original_label = std::mem::replace(&mut state.label, pending_label.to_string());
        state.disabled = true;
        drop(state);

        Ok(BusyGuard {
            control: self.clone(),
            original_label,
        })
    }
}

/// Restores the control on every exit path, including early `?` returns.
#[must_use]
pub struct BusyGuard {
    control: Control,
    original_label: String,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut state = self.control.lock();
        state.label = std::mem::take(&mut self.original_label);
        state.disabled = false;
    }
}
