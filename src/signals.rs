//! Interrupt and terminate handling.
//!
//! A lightweight watcher task waits for SIGINT or SIGTERM, performs
//! best-effort cleanup of the active [`ProcessingContext`], and terminates the
//! process with the conventional exit code for the signal. The watcher does
//! nothing else: it may fire with the rest of the process in an arbitrary
//! intermediate state, so the cleanup it triggers is minimal and idempotent.

use crate::context::ProcessingContext;
use crate::Result;

/// Exit code after SIGINT (128 + 2).
pub const EXIT_CODE_INTERRUPT: i32 = 130;

/// Exit code after SIGTERM (128 + 15).
pub const EXIT_CODE_TERMINATE: i32 = 143;

/// Install the signal watcher. Must be called from within the tokio runtime,
/// after the run's ProcessingContext has been registered.
#[cfg(unix)]
pub fn install() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        let code = tokio::select! {
            _ = interrupt.recv() => EXIT_CODE_INTERRUPT,
            _ = terminate.recv() => EXIT_CODE_TERMINATE,
        };

        tracing::debug!("Shutdown signal received, cleaning up");
        ProcessingContext::cleanup_active();
        std::process::exit(code);
    });

    Ok(())
}

/// Install the signal watcher. Windows has no SIGTERM equivalent delivered to
/// console programs, so only Ctrl-C is watched.
#[cfg(not(unix))]
pub fn install() -> Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Ctrl-C received, cleaning up");
            ProcessingContext::cleanup_active();
            std::process::exit(EXIT_CODE_INTERRUPT);
        }
    });

    Ok(())
}
