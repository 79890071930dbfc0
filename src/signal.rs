//! Ctrl+C handling.
//!
//! A single process-wide handler sets an `AtomicBool` when the user interrupts.
//! The scan and report passes check the flag before each row and stop with
//! [`DupeError::Interrupted`](crate::duplicates::DupeError::Interrupted), which
//! carries the totals reached so far.
//!
//! # Usage
//!
//! ```rust,no_run
//! use csvdupe::duplicates::ScanConfig;
//! use csvdupe::signal::install_handler;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//! let config = ScanConfig::new(0).with_shutdown_flag(handler.flag());
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared interrupt flag.
///
/// Clones share the same underlying flag.
#[derive(Debug, Clone)]
pub struct InterruptHandler {
    flag: Arc<AtomicBool>,
}

impl InterruptHandler {
    /// Create a handler with the flag cleared.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an interrupt has been received or requested.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Set the flag manually.
    pub fn interrupt(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clear the flag.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// The flag, for [`ScanConfig::with_shutdown_flag`](crate::duplicates::ScanConfig::with_shutdown_flag).
    #[must_use]
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

impl Default for InterruptHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<InterruptHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C handler and return its flag.
///
/// Safe to call more than once: later calls reset and return the handler
/// installed first, so repeated `run_app` calls in one process (tests) work.
/// If another library already owns the Ctrl+C hook, an unhooked handler is
/// returned that still honours [`InterruptHandler::interrupt`].
///
/// # Errors
///
/// Currently always succeeds; the `Result` is kept so callers propagate with `?`.
pub fn install_handler() -> Result<InterruptHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = InterruptHandler::new();
    let flag = handler.flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);

        let _ = writeln!(std::io::stderr(), "\nInterrupt received, stopping...");
        let _ = std::io::stderr().flush();

        log::info!("Interrupt signal received");
    }) {
        Ok(()) => {
            let _ = GLOBAL_HANDLER.set(handler.clone());
            Ok(handler)
        }
        Err(e) => {
            if let Some(existing) = GLOBAL_HANDLER.get() {
                existing.reset();
                Ok(existing.clone())
            } else {
                log::debug!("Ctrl+C handler already registered ({e}), using unhooked handler");
                let fallback = InterruptHandler::new();
                let _ = GLOBAL_HANDLER.set(fallback.clone());
                Ok(fallback)
            }
        }
    }
}
