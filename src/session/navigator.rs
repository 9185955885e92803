use std::sync::atomic::{AtomicUsize, Ordering};

/// Where a page goes when the session is missing or rejected.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self);
}

/// Tells the terminal user to log in again.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect_to_login(&self) {
        tracing::info!("redirecting to login");
        eprintln!("→ Faça login novamente: clarify auth login <email>");
    }
}

/// Counts redirects; used where the caller only needs to observe them
#[derive(Default)]
pub struct RecordingNavigator {
    redirects: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}
