//! Global activity storage for watch-mode rebuilds.

use std::sync::LazyLock;

use parking_lot::RwLock;

use super::Activity;
use crate::utils::hash::FINGERPRINT_LEN;

/// Global activity collection, populated by build/watch before generation.
pub static ACTIVITIES: LazyLock<ActivityStore> = LazyLock::new(ActivityStore::new);

/// Fingerprint of a collection's content (blake3, truncated hex).
///
/// Covers slug, body, and serialized metadata of every record in order, so
/// any content edit, rename, add, or removal changes it. Written into the
/// index artifact and used to skip no-op rebuild writes.
pub fn content_fingerprint(records: &[Activity]) -> String {
    let mut hasher = blake3::Hasher::new();
    for activity in records {
        hasher.update(activity.slug.as_bytes());
        hasher.update(&[0]);
        hasher.update(activity.body.as_bytes());
        hasher.update(&[0]);
        if let Ok(json) = serde_json::to_string(&activity.meta) {
            hasher.update(json.as_bytes());
        }
        hasher.update(b"\n");
    }

    let mut hex = hasher.finalize().to_hex().to_string();
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Thread-safe storage for the loaded collection
///
/// Watch mode reloads into this store between rebuilds; the fingerprint of
/// the last stored collection tells it whether anything actually changed.
#[derive(Debug, Default)]
pub struct ActivityStore {
    records: RwLock<Vec<Activity>>,
    fingerprint: RwLock<String>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored collection.
    ///
    /// Returns `true` when the new content differs from what was stored
    /// (always `true` for the first call).
    pub fn replace(&self, records: Vec<Activity>) -> bool {
        let next = content_fingerprint(&records);

        let mut fingerprint = self.fingerprint.write();
        let changed = *fingerprint != next;
        *fingerprint = next;
        *self.records.write() = records;

        changed
    }

    /// Clone out the stored collection.
    pub fn all(&self) -> Vec<Activity> {
        self.records.read().clone()
    }

    /// Fingerprint of the stored collection (empty before the first replace).
    pub fn fingerprint(&self) -> String {
        self.fingerprint.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn clear(&self) {
        self.records.write().clear();
        self.fingerprint.write().clear();
    }
}
