//! Process-wide configuration handle.
//!
//! Watch mode reloads `huodong.toml` while rebuild workers are reading the
//! previous config, so the active config lives behind an `ArcSwap`: readers
//! grab an `Arc` snapshot, reloads swap the pointer.

use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use anyhow::Result;
use arc_swap::ArcSwap;

use crate::config::LibraryConfig;

/// The active configuration. Defaulted until [`init_config`] runs.
static ACTIVE: LazyLock<ArcSwap<LibraryConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(LibraryConfig::default()));

/// Hash of the config file text the active config was parsed from, so
/// reloads can skip touched-but-unchanged files.
static FILE_HASH: AtomicU64 = AtomicU64::new(0);

/// Hash the on-disk config file, or `None` when it cannot be read.
fn fingerprint(config: &LibraryConfig) -> Option<u64> {
    let text = fs::read_to_string(&config.config_path).ok()?;
    Some(crate::utils::hash::compute(text.as_bytes()))
}

/// Snapshot of the active config.
#[inline]
pub fn cfg() -> Arc<LibraryConfig> {
    ACTIVE.load_full()
}

/// Install the startup config and remember its file fingerprint.
pub fn init_config(config: LibraryConfig) -> Arc<LibraryConfig> {
    if let Some(hash) = fingerprint(&config) {
        FILE_HASH.store(hash, Ordering::Relaxed);
    }

    let config = Arc::new(config);
    ACTIVE.store(Arc::clone(&config));
    config
}

/// Re-parse the config file if its content changed since the last load.
///
/// Returns `Ok(true)` when a new config was installed, `Ok(false)` when the
/// file still hashes the same.
pub fn reload_config() -> Result<bool> {
    let current = cfg();

    let text = fs::read_to_string(&current.config_path)?;
    let hash = crate::utils::hash::compute(text.as_bytes());
    if hash == FILE_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let reloaded = LibraryConfig::load(current.get_cli())?;
    ACTIVE.store(Arc::new(reloaded));
    FILE_HASH.store(hash, Ordering::Relaxed);

    Ok(true)
}
