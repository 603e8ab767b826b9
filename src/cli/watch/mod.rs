//! Watch command - rebuild the index on content changes.
//!
//! A notify watcher feeds raw events into the debouncer; when a quiet
//! period passes, the surviving batch either hot-swaps the config (an
//! edit to `huodong.toml`) or reloads the collection and rewrites the
//! index behind its fingerprint gate.

// Collapses event bursts into one batch per quiet period.
mod debouncer;

#[cfg(test)]
mod tests;

use std::time::Duration;

use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use super::build::build_library;
use crate::config::{LibraryConfig, cfg, reload_config};
use crate::core::{is_shutdown, register_watcher};
use crate::{log, logger};
use crate::utils::path::normalize_path;
use debouncer::Debouncer;

/// Watch the content directory and rebuild the index on change
pub fn watch_library(config: &LibraryConfig) -> Result<()> {
    let mut config = config.clone();

    if !config.content.dir.is_dir() {
        anyhow::bail!(
            "content directory not found: {}",
            config.content.dir.display()
        );
    }

    // Initial build; watch keeps running on failure so a fix-and-save
    // triggers the retry.
    if let Err(e) = build_library(&config) {
        log!("error"; "initial build failed: {:#}", e);
        log!("watch"; "waiting for changes to retry");
    }

    let (event_tx, event_rx) = crossbeam::channel::unbounded();
    let (shutdown_tx, shutdown_rx) = crossbeam::channel::bounded(1);
    register_watcher(shutdown_tx);

    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = event_tx.send(res);
    })?;
    watcher
        .watch(&config.content.dir, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", config.content.dir.display()))?;
    watcher
        .watch(&config.config_path, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", config.config_path.display()))?;

    log!(
        "watch";
        "watching {}",
        config.root_relative(&config.content.dir).display()
    );
    log!("watch"; "press Ctrl+C to stop");

    let mut debouncer = Debouncer::new(
        Duration::from_millis(config.watch.debounce_ms),
        Duration::from_millis(config.watch.cooldown_ms),
    );

    loop {
        crossbeam::select! {
            recv(event_rx) -> msg => match msg {
                Ok(Ok(event)) => debouncer.add_event(&event),
                Ok(Err(e)) => log!("watch"; "watcher error: {}", e),
                Err(_) => break,
            },
            recv(shutdown_rx) -> _ => break,
            default(debouncer.sleep_duration()) => {
                process_changes(&mut debouncer, &mut config, &mut watcher);
            }
        }

        if is_shutdown() {
            break;
        }
    }

    log!("watch"; "stopped");
    Ok(())
}

/// Route one drained batch: config edits reload, content edits rebuild.
fn process_changes(
    debouncer: &mut Debouncer,
    config: &mut LibraryConfig,
    watcher: &mut RecommendedWatcher,
) {
    let Some(changes) = debouncer.take_if_ready() else {
        return;
    };

    // The change log is about to scroll; let the old status go with it
    logger::status_clear();

    let config_changed = changes.contains_key(&config.config_path);
    let mut content_changed = false;
    for (path, kind) in &changes {
        if is_content_change(path, config) {
            content_changed = true;
            log!(
                "watch";
                "{}: {}",
                kind.label(),
                config.root_relative(path).display()
            );
        }
    }

    if config_changed && !apply_config_reload(config, debouncer, watcher) {
        return;
    }

    if !config_changed && !content_changed {
        return;
    }

    match build_library(config) {
        Ok(true) => logger::status_success(&format!("rebuilt {}", config.build.index)),
        Ok(false) => logger::status_unchanged("content unchanged, index kept"),
        Err(e) => logger::status_error("rebuild failed", &format!("{:#}", e)),
    }
}

/// Hot-swap the configuration after a `huodong.toml` edit.
///
/// Returns `false` when the reload failed; the previous configuration
/// stays active and the pending rebuild is skipped.
fn apply_config_reload(
    config: &mut LibraryConfig,
    debouncer: &mut Debouncer,
    watcher: &mut RecommendedWatcher,
) -> bool {
    match reload_config() {
        Ok(true) => {
            log!("watch"; "configuration reloaded");
            let next = (*cfg()).clone();

            debouncer.set_timing(
                Duration::from_millis(next.watch.debounce_ms),
                Duration::from_millis(next.watch.cooldown_ms),
            );

            // Re-point the watcher when the content directory moved
            if next.content.dir != config.content.dir {
                let _ = watcher.unwatch(&config.content.dir);
                if let Err(e) = watcher.watch(&next.content.dir, RecursiveMode::Recursive) {
                    log!("error"; "failed to watch {}: {}", next.content.dir.display(), e);
                }
            }

            *config = next;
            true
        }
        Ok(false) => true,
        Err(e) => {
            log!("error"; "config reload failed: {:#}", e);
            logger::status_warning("previous configuration kept");
            false
        }
    }
}

/// Whether a changed path is an activity file inside the content directory.
fn is_content_change(path: &std::path::Path, config: &LibraryConfig) -> bool {
    let content_dir = normalize_path(&config.content.dir);
    path.starts_with(&content_dir)
        && path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .is_some_and(|ext| config.content.matches_extension(ext))
}
