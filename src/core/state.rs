//! Watch-mode process flags.
//!
//! `WATCHING` says whether a watch loop owns the terminal; it decides what
//! Ctrl+C means. `SHUTDOWN` latches once Ctrl+C arrives so loops can drain
//! and exit on their own schedule.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// True while a watch loop runs. Ctrl+C exits the process outright when
/// this is false, and requests a clean loop exit when it is true.
static WATCHING: AtomicBool = AtomicBool::new(false);

/// Latched by the Ctrl+C handler.
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Wakes the watch loop's select so shutdown is seen immediately.
static SHUTDOWN_TX: OnceLock<crossbeam::channel::Sender<()>> = OnceLock::new();

// =============================================================================
// watch flag
// =============================================================================

pub fn is_watching() -> bool {
    WATCHING.load(Ordering::SeqCst)
}

/// Flip before entering the event loop, so Ctrl+C routes to the channel.
pub fn set_watching() {
    WATCHING.store(true, Ordering::SeqCst);
}

// =============================================================================
// shutdown
// =============================================================================

/// Install the process-wide Ctrl+C handler. Once, at startup.
///
/// Until [`register_watcher`] runs there is nothing to unwind, so the
/// handler just exits; afterwards it latches `SHUTDOWN` and pings the
/// watch loop instead.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if is_watching() {
            crate::log!("watch"; "stopping...");
            if let Some(tx) = SHUTDOWN_TX.get() {
                let _ = tx.send(());
            }
        } else {
            // Nothing running that needs a clean exit (e.g. a config prompt)
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("could not install the Ctrl+C handler: {}", e))
}

/// Hand the watch loop's wakeup channel to the Ctrl+C handler and mark
/// the loop as running. Call after creating the channel, before looping.
pub fn register_watcher(shutdown_tx: crossbeam::channel::Sender<()>) {
    let _ = SHUTDOWN_TX.set(shutdown_tx);
    set_watching();
}

/// Relaxed load is enough: the cost of missing it by an iteration is
/// draining a few extra events before stopping.
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_flag_latches() {
        WATCHING.store(false, Ordering::SeqCst);
        assert!(!is_watching());

        set_watching();
        assert!(is_watching());
    }

    #[test]
    fn test_shutdown_flag_reads_back() {
        SHUTDOWN.store(false, Ordering::SeqCst);
        assert!(!is_shutdown());

        SHUTDOWN.store(true, Ordering::SeqCst);
        assert!(is_shutdown());
        SHUTDOWN.store(false, Ordering::SeqCst);
    }
}
