//! Temporary working directory lifecycle.
//!
//! One [`ProcessingContext`] is live per run. It is created before any
//! download or extraction begins, registered in a process-wide slot so the
//! signal path can reach it without parameter threading, and cleaned up
//! exactly once by whichever path gets there first (normal completion or a
//! signal). Cleanup is guarded by an atomic flag rather than a lock so it is
//! safe to invoke from the signal watcher concurrently with the main thread.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::Result;

static ACTIVE_CONTEXT: Mutex<Option<Arc<ProcessingContext>>> = Mutex::new(None);

/// Scratch space for one run's intermediate artifacts (downloaded media,
/// extracted audio, whisper output).
pub struct ProcessingContext {
    workdir: PathBuf,
    cleaned: AtomicBool,
}

impl ProcessingContext {
    /// Create the working directory and register this context as the
    /// process-wide active one, replacing any previous registration.
    pub fn create() -> Result<Arc<Self>> {
        let workdir = tempfile::Builder::new()
            .prefix("voxscribe-")
            .tempdir()?
            .into_path();
        tracing::debug!("Created working directory {}", workdir.display());

        let context = Arc::new(Self {
            workdir,
            cleaned: AtomicBool::new(false),
        });

        *lock_active() = Some(Arc::clone(&context));
        Ok(context)
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Remove the working directory and drop the active registration.
    ///
    /// Idempotent: the first caller wins, later callers observe the flag and
    /// return immediately. Removal errors are swallowed; the directory may
    /// already be gone, and cleanup failure must never mask the run outcome
    /// or crash the signal path.
    pub fn cleanup(&self) {
        if self.cleaned.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Err(err) = std::fs::remove_dir_all(&self.workdir) {
            tracing::debug!(
                "Best-effort removal of {} failed: {}",
                self.workdir.display(),
                err
            );
        }

        let mut slot = lock_active();
        if slot
            .as_ref()
            .is_some_and(|active| std::ptr::eq(Arc::as_ptr(active), self))
        {
            *slot = None;
        }
    }

    /// Clean up whatever context is currently registered, if any.
    ///
    /// This is the entry point for the signal path, which has no reference
    /// to the run's call stack.
    pub fn cleanup_active() {
        let active = lock_active().clone();
        if let Some(context) = active {
            context.cleanup();
        }
    }
}

fn lock_active() -> std::sync::MutexGuard<'static, Option<Arc<ProcessingContext>>> {
    // A poisoned slot still holds a usable value; cleanup must proceed.
    ACTIVE_CONTEXT
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The active-context slot is process-wide, so these tests serialize on a
    // shared lock to keep registrations from interleaving.
    static TEST_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn test_cleanup_removes_workdir_and_is_idempotent() {
        let _guard = TEST_GUARD.lock().unwrap_or_else(|p| p.into_inner());

        let context = ProcessingContext::create().unwrap();
        let workdir = context.workdir().to_path_buf();
        assert!(workdir.exists());

        context.cleanup();
        assert!(!workdir.exists());

        // Second invocation is a no-op, not an error.
        context.cleanup();
        assert!(!workdir.exists());
    }

    #[test]
    fn test_cleanup_tolerates_missing_directory() {
        let _guard = TEST_GUARD.lock().unwrap_or_else(|p| p.into_inner());

        let context = ProcessingContext::create().unwrap();
        std::fs::remove_dir_all(context.workdir()).unwrap();

        context.cleanup();
    }

    #[test]
    fn test_cleanup_active_reaches_registered_context() {
        let _guard = TEST_GUARD.lock().unwrap_or_else(|p| p.into_inner());

        let context = ProcessingContext::create().unwrap();
        let workdir = context.workdir().to_path_buf();

        ProcessingContext::cleanup_active();
        assert!(!workdir.exists());

        // The slot is cleared, so a second sweep finds nothing to do.
        ProcessingContext::cleanup_active();
    }

    #[test]
    fn test_new_context_replaces_registration() {
        let _guard = TEST_GUARD.lock().unwrap_or_else(|p| p.into_inner());

        let first = ProcessingContext::create().unwrap();
        let second = ProcessingContext::create().unwrap();

        ProcessingContext::cleanup_active();
        assert!(first.workdir().exists());
        assert!(!second.workdir().exists());

        first.cleanup();
        assert!(!first.workdir().exists());
    }
}
