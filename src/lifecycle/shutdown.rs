//! Shutdown coordination for the host.
//!
//! The signal is latched: a task that starts waiting after the trigger
//! still observes it, so the server can subscribe after the signal listener
//! has been spawned.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

/// Process-wide stop flag shared by the server and the signal listener.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request shutdown. Only the first call is logged.
    pub fn trigger(&self, reason: &str) {
        if !self.tx.send_replace(true) {
            tracing::info!(reason, "Shutdown requested");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once shutdown has been requested, including before this call.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            // Err only if every sender is gone, which also means stop.
            let _ = rx.wait_for(|stop| *stop).await;
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
