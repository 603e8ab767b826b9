//! Parallel loading of activity files into typed records.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::{Activity, extract_meta};
use crate::cli::common::ParallelCollector;

/// A per-file load failure (I/O, missing frontmatter, or deserialization).
#[derive(Debug, Clone)]
pub struct LoadError {
    /// Source file that failed.
    pub source: PathBuf,
    /// Human-readable reason, line-anchored where the parser provides it.
    pub reason: String,
}

/// Result of loading a set of activity files.
///
/// Loading never aborts on the first bad file: every file is attempted and
/// failures are collected so `check` can report them all at once. Callers
/// that need a clean collection (build, query) treat a non-empty `errors`
/// as fatal.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Successfully parsed records, sorted by slug.
    pub activities: Vec<Activity>,
    /// Per-file failures, sorted by path.
    pub errors: Vec<LoadError>,
}

/// Slug of an activity file: its file stem.
pub fn slug_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load and parse activity files in parallel.
///
/// The returned records are sorted by slug so every consumer (engine, index,
/// query output) sees the same canonical order. Case-insensitively equal
/// slugs are reported as duplicates; the collection namespace is flat even
/// when files live in subdirectories.
pub fn load_files(files: &[PathBuf]) -> LoadOutcome {
    let records = ParallelCollector::new();
    let failures = ParallelCollector::new();

    files.par_iter().for_each(|file| {
        match load_one(file) {
            Ok(activity) => records.push(activity),
            Err(reason) => failures.push(LoadError {
                source: file.clone(),
                reason,
            }),
        }
    });

    let mut activities = records.into_vec(files.len());
    activities.sort_unstable_by(|a: &Activity, b: &Activity| a.slug.cmp(&b.slug));

    let mut errors = failures.into_vec(0);

    // Flat slug namespace: stems must be unique ignoring ASCII case
    let mut seen: FxHashMap<String, PathBuf> = FxHashMap::default();
    for activity in &activities {
        let key = activity.slug.to_ascii_lowercase();
        match seen.get(&key) {
            Some(first) => errors.push(LoadError {
                source: activity.source.clone(),
                reason: format!(
                    "duplicate slug '{}' (also defined by {})",
                    activity.slug,
                    first.display()
                ),
            }),
            None => {
                seen.insert(key, activity.source.clone());
            }
        }
    }

    errors.sort_unstable_by(|a, b| a.source.cmp(&b.source));

    LoadOutcome { activities, errors }
}

fn load_one(file: &Path) -> Result<Activity, String> {
    let content = fs::read_to_string(file).map_err(|e| format!("failed to read file: {e}"))?;
    let (meta, body) = extract_meta(&content).map_err(|e| e.to_string())?;

    Ok(Activity::new(
        slug_from_path(file),
        file.to_path_buf(),
        body.to_string(),
        meta,
    ))
}
