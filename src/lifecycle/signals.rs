//! OS signal handling.
//!
//! SIGINT, SIGTERM, SIGQUIT and SIGHUP all request a graceful shutdown.
//! Non-unix targets only listen for Ctrl+C.

use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Spawn a task that triggers `shutdown` on the first termination signal.
pub fn spawn_signal_listener(shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(name) => {
                tracing::info!(signal = name, "Shutdown signal received");
                shutdown.trigger();
            }
            Err(e) => tracing::error!(error = %e, "Failed to install signal handlers"),
        }
    })
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;
    let mut hangup = signal(SignalKind::hangup())?;

    let name = tokio::select! {
        result = tokio::signal::ctrl_c() => { result?; "SIGINT" }
        _ = terminate.recv() => "SIGTERM",
        _ = quit.recv() => "SIGQUIT",
        _ = hangup.recv() => "SIGHUP",
    };
    Ok(name)
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl-c")
}
