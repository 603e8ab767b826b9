use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::utils::path::normalize_path;

/// The net effect on one path after merging its burst of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }

    /// Map a raw notify event to a tracked kind.
    ///
    /// Metadata-only modifications (mtime/atime/chmod noise) are dropped
    /// here; reacting to them can loop, since writing the index touches
    /// mtimes itself.
    fn from_notify(kind: &notify::EventKind) -> Option<Self> {
        use notify::EventKind;

        match kind {
            EventKind::Create(_) => Some(Self::Created),
            EventKind::Remove(_) => Some(Self::Removed),
            EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => None,
            EventKind::Modify(_) => Some(Self::Modified),
            _ => None,
        }
    }

    /// Combine with a later event for the same path within one window.
    ///
    /// `None` means the entry cancels out (appeared then vanished).
    /// Anything not covered keeps the earlier kind, so a create followed
    /// by saves still reports as created.
    fn merged_with(self, incoming: Self) -> Option<Self> {
        match (self, incoming) {
            // Deleted then rewritten: the restore is what counts
            (Self::Removed, Self::Created | Self::Modified) => Some(incoming),
            // Edited then deleted: the delete is what counts
            (Self::Modified, Self::Removed) => Some(Self::Removed),
            // Never existed as far as the rebuild is concerned
            (Self::Created, Self::Removed) => None,
            _ => Some(self),
        }
    }
}

/// Collects notify events per path until the window closes.
///
/// Timing only; deciding what a change means for the index is the watch
/// loop's job. Two clocks gate the drain: `debounce` (quiet time since
/// the last event) and `cooldown` (minimum gap between drains).
pub(super) struct Debouncer {
    /// One entry per path; later events merge into the existing entry
    pub(super) changes: FxHashMap<PathBuf, ChangeKind>,
    pub(super) last_event: Option<Instant>,
    pub(super) last_rebuild: Option<Instant>,
    debounce: Duration,
    cooldown: Duration,
}

impl Debouncer {
    pub(super) fn new(debounce: Duration, cooldown: Duration) -> Self {
        Self {
            changes: FxHashMap::default(),
            last_event: None,
            last_rebuild: None,
            debounce,
            cooldown,
        }
    }

    /// Replace the timing windows (config reload).
    pub(super) fn set_timing(&mut self, debounce: Duration, cooldown: Duration) {
        self.debounce = debounce;
        self.cooldown = cooldown;
    }

    /// Fold one notify event into the pending set.
    pub(super) fn add_event(&mut self, event: &notify::Event) {
        let Some(kind) = ChangeKind::from_notify(&event.kind) else {
            return;
        };

        crate::debug!("watch"; "fs event: {:?} {:?}", event.kind, event.paths);

        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }
            let path = normalize_path(path);

            match self.changes.get(&path).copied() {
                Some(existing) => {
                    match existing.merged_with(kind) {
                        // Earlier kind stands, window stays as-is
                        Some(merged) if merged == existing => continue,
                        Some(merged) => {
                            crate::debug!("watch"; "merge {}+{} -> {}: {}",
                                existing.label(), kind.label(), merged.label(), path.display());
                            self.changes.insert(path, merged);
                        }
                        None => {
                            crate::debug!("watch"; "cancel {}+{}: {}",
                                existing.label(), kind.label(), path.display());
                            self.changes.remove(&path);
                        }
                    }
                }
                None => {
                    crate::debug!("watch"; "event {}: {}", kind.label(), path.display());
                    self.changes.insert(path, kind);
                }
            }
            self.last_event = Some(Instant::now());
        }
    }

    /// Drain the pending set once both clocks have run out.
    pub(super) fn take_if_ready(&mut self) -> Option<FxHashMap<PathBuf, ChangeKind>> {
        if !self.is_ready() {
            return None;
        }

        let changes = std::mem::take(&mut self.changes);
        self.last_event = None;

        // Everything merged away (e.g. created then removed)
        if changes.is_empty() {
            return None;
        }

        self.last_rebuild = Some(Instant::now());
        Some(changes)
    }

    pub(super) fn is_ready(&self) -> bool {
        self.last_event.is_some()
            && self.debounce_left().is_zero()
            && self.cooldown_left().is_zero()
            && !self.changes.is_empty()
    }

    /// How long the select loop may sleep before the next possible drain.
    pub(super) fn sleep_duration(&self) -> Duration {
        if self.last_event.is_none() {
            // Idle; wake-ups come from events, not the timer
            return Duration::from_secs(86400);
        }

        self.debounce_left()
            .max(self.cooldown_left())
            .max(Duration::from_millis(1))
    }

    fn debounce_left(&self) -> Duration {
        self.last_event
            .map_or(Duration::ZERO, |t| self.debounce.saturating_sub(t.elapsed()))
    }

    fn cooldown_left(&self) -> Duration {
        self.last_rebuild
            .map_or(Duration::ZERO, |t| self.cooldown.saturating_sub(t.elapsed()))
    }
}

/// Editor droppings: swap files, backups, hidden files.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}
