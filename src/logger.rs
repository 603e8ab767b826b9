//! Logging utilities with colored output.
//!
//! Two output styles share this module:
//! - `log!` / `debug!` lines with a colored `[module]` prefix, one per event
//! - a watch-mode status block that overwrites itself in place, so an
//!   editing session does not scroll the terminal
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "indexed {} activities", count);
//! debug!("watch"; "fs event: {:?}", event);
//!
//! logger::status_success("rebuilt index.json (24 activities)");
//! ```

use std::{
    io::{Write, stdout},
    sync::LazyLock,
    sync::atomic::{AtomicBool, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;

/// Flipped once at startup from `--verbose`, read by the `debug!` macros.
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

#[allow(dead_code)] // Read through the debug! macros
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macros
// ============================================================================

/// Emit one prefixed log line through [`log`].
///
/// ```ignore
/// log!("check"; "{} of {} activities passed", ok, total);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], but only under `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Run a block only under `--verbose`, for debug data that costs
/// something to assemble.
#[macro_export]
macro_rules! debug_do {
    ($($body:tt)*) => {{
        if $crate::logger::is_verbose() {
            $($body)*
        }
    }};
}

// ============================================================================
// Line Logging
// ============================================================================

/// Write one `[module] message` line, replacing any partial line left on
/// the terminal.
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = prefix_for(module);

    let mut out = stdout().lock();
    execute!(out, Clear(ClearType::UntilNewLine)).ok();
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Styled `[module]` prefix. Each command keeps its own hue so interleaved
/// watch output stays scannable.
#[inline]
fn prefix_for(module: &str) -> String {
    let label = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "query" => label.bright_blue().bold().to_string(),
        "watch" => label.bright_green().bold().to_string(),
        "check" => label.bright_magenta().bold().to_string(),
        "init" => label.bright_cyan().bold().to_string(),
        "error" => label.bright_red().bold().to_string(),
        _ => label.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// watch status block
// ============================================================================

/// Wall-clock time as HH:MM:SS for the status timestamp.
fn now() -> String {
    // UTC+8, the audience timezone; close enough for a status display
    const TZ_OFFSET_SECS: u64 = 8 * 3600;

    let unix = SystemTime::now().duration_since(UNIX_EPOCH);
    let secs = unix.map_or(0, |d| d.as_secs()) + TZ_OFFSET_SECS;
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}

/// Watch-mode status block that overwrites its previous output.
///
/// Each message replaces the last one, so between rebuilds the terminal
/// shows a single `[HH:MM:SS] ✓ ...` block instead of a growing scroll of
/// stale results.
pub struct WatchStatus {
    /// How many lines the current block occupies, for the next rewind
    block_height: usize,
}

/// Shared status display for all watch-mode phases, so load, check and
/// index results overwrite each other instead of stacking up.
static STATUS: LazyLock<Mutex<WatchStatus>> = LazyLock::new(|| Mutex::new(WatchStatus::new()));

impl WatchStatus {
    pub const fn new() -> Self {
        Self { block_height: 0 }
    }

    /// Green ✓ line for a completed rebuild.
    pub fn success(&mut self, message: &str) {
        self.show(Some("✓".green().to_string()), message);
    }

    /// Dimmed line without a symbol for no-op rebuilds.
    pub fn unchanged(&mut self, message: &str) {
        let dimmed = message.dimmed().to_string();
        self.show(None, &dimmed);
    }

    /// Red ✗ line; `detail` lines follow the summary when present.
    pub fn error(&mut self, summary: &str, detail: &str) {
        let message = if detail.is_empty() {
            summary.to_string()
        } else {
            format!("{summary}\n{detail}")
        };
        self.show(Some("✗".red().to_string()), &message);
    }

    /// Yellow ⚠ line for conditions that do not fail the rebuild.
    pub fn warning(&mut self, detail: &str) {
        self.show(Some("⚠".yellow().to_string()), detail);
    }

    fn show(&mut self, symbol: Option<String>, message: &str) {
        let mut out = stdout().lock();
        rewind(&mut out, self.block_height);

        let stamp = format!("[{}]", now()).dimmed().to_string();
        match symbol {
            Some(symbol) => writeln!(out, "{stamp} {symbol} {message}").ok(),
            None => writeln!(out, "{stamp} {message}").ok(),
        };
        out.flush().ok();

        self.block_height = message.matches('\n').count() + 1;
    }

    /// Erase the current block without replacing it.
    pub fn clear(&mut self) {
        let mut out = stdout().lock();
        rewind(&mut out, self.block_height);
        out.flush().ok();
        self.block_height = 0;
    }
}

/// Move the cursor back over `lines` of earlier status output and erase
/// them.
fn rewind(out: &mut impl Write, lines: usize) {
    if lines > 0 {
        #[allow(clippy::cast_possible_truncation)]
        let lines = lines as u16;
        execute!(out, cursor::MoveUp(lines), Clear(ClearType::FromCursorDown)).ok();
    }
}

pub fn status_success(message: &str) {
    STATUS.lock().success(message);
}

pub fn status_unchanged(message: &str) {
    STATUS.lock().unchanged(message);
}

pub fn status_error(summary: &str, detail: &str) {
    STATUS.lock().error(summary, detail);
}

pub fn status_warning(detail: &str) {
    STATUS.lock().warning(detail);
}

/// Drop the status block before other output scrolls past it; the next
/// status call then starts a fresh block instead of rewinding over
/// unrelated lines.
pub fn status_clear() {
    STATUS.lock().clear();
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_status_starts_empty() {
        let status = WatchStatus::new();
        assert_eq!(status.block_height, 0);
    }

    #[test]
    fn test_clear_resets_block_height() {
        let mut status = WatchStatus::new();
        status.success("rebuilt index.json");
        assert_eq!(status.block_height, 1);

        status.clear();
        assert_eq!(status.block_height, 0);
    }

    #[test]
    fn test_status_line_count_single() {
        let message = "rebuilt: index.json (24 activities)";
        assert_eq!(message.matches('\n').count() + 1, 1);
    }

    #[test]
    fn test_status_line_count_check_errors() {
        // Typical check failure: summary + one line per file
        let summary = "check failed";
        let detail = "dragon-craft.md: missing `description`\nmoon-song.md: empty `title`";
        let message = format!("{summary}\n{detail}");
        assert_eq!(message.matches('\n').count() + 1, 3);
    }

    #[test]
    fn test_now_is_clock_shaped() {
        let ts = now();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.as_bytes()[2], b':');
        assert_eq!(ts.as_bytes()[5], b':');
    }

    #[test]
    fn test_prefix_wraps_module_name() {
        // Styling may be disabled in test terminals; the bracket frame and
        // module name must survive either way
        let prefix = prefix_for("build");
        assert!(prefix.contains("[build]"));
    }
}
