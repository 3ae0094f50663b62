//! Shutdown coordination.

use tokio::sync::broadcast;

/// Handle used to request a graceful shutdown.
///
/// Cloned into whatever may ask the server to stop (the shutdown route, the
/// signal listener). The server subscribes before it starts serving.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal. Later triggers are harmless.
    pub fn trigger(&self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("Shutdown triggered with no subscribers");
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
