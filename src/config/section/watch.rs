//! The `[watch]` table: timing for watch-mode rebuilds.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! debounce_ms = 300    # Quiet period before a rebuild
//! cooldown_ms = 800    # Minimum gap between rebuilds
//! ```
//!
//! The debounce window absorbs editor save bursts; the cooldown keeps a
//! rebuild's own output events from immediately triggering another one.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Watch mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSection {
    /// Milliseconds of quiet before acting on accumulated file events.
    pub debounce_ms: u64,

    /// Minimum milliseconds between consecutive rebuilds.
    pub cooldown_ms: u64,
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            cooldown_ms: 800,
        }
    }
}

impl WatchSection {
    /// Validate watch timing.
    ///
    /// # Checks
    /// - `cooldown_ms` must not be shorter than `debounce_ms`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.cooldown_ms < self.debounce_ms {
            diag.error_with_hint(
                FieldPath::new("watch.cooldown_ms"),
                format!(
                    "cooldown ({}ms) is shorter than debounce ({}ms)",
                    self.cooldown_ms, self.debounce_ms
                ),
                "set cooldown_ms >= debounce_ms",
            );
        }
    }
}
