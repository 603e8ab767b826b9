//! Shared loading path for build, check and query: CLI path expansion,
//! content-file collection, and the parallel parse.

use std::ffi::OsStr;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossbeam::queue::SegQueue;
use jwalk::WalkDir;

use crate::activity::{Activity, LoadOutcome, load_files};
use crate::config::{ContentSection, LibraryConfig};
use crate::log;
use crate::utils::path::resolve_path;
use crate::utils::plural_count;

/// Wait-free bin for results pushed from rayon workers.
pub struct ParallelCollector<T> {
    queue: SegQueue<T>,
}

impl<T> ParallelCollector<T> {
    pub fn new() -> Self {
        Self {
            queue: SegQueue::new(),
        }
    }

    #[inline]
    pub fn push(&self, item: T) {
        self.queue.push(item);
    }

    /// Move everything out, sizing the Vec up front when the caller
    /// knows how many to expect.
    pub fn into_vec(self, capacity: usize) -> Vec<T> {
        let mut items = Vec::with_capacity(capacity);
        while let Some(item) = self.queue.pop() {
            items.push(item);
        }
        items
    }
}

/// Every regular file under `dir`, recursively, minus dotfiles.
///
/// The dot rule drops OS junk (`.DS_Store`) and hidden drafts in one go,
/// the same policy the watch debouncer applies to events.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && !entry.file_name().to_str().unwrap_or_default().starts_with('.')
        })
        .map(|entry| entry.path())
        .collect()
}

/// Expand the paths a command was given into concrete activity files.
///
/// No paths means the whole content directory. A lone `-` switches to
/// newline-separated paths on stdin, for piping from `git diff` and
/// similar.
pub fn collect_activity_files(paths: &[PathBuf], config: &LibraryConfig) -> Result<Vec<PathBuf>> {
    let content_dir = &config.content.dir;

    let paths = match paths {
        [single] if single.as_os_str() == "-" => read_paths_from_stdin()?,
        _ => paths.to_vec(),
    };

    if paths.is_empty() {
        let all_files = collect_all_files(content_dir);
        return Ok(filter_activity_files(all_files, &config.content));
    }

    let mut all_files = Vec::new();
    for path in &paths {
        let resolved = resolve_path(path, content_dir);

        if resolved.is_file() {
            if is_activity_file(&resolved, &config.content) {
                all_files.push(resolved);
            } else {
                anyhow::bail!("Not a supported activity file: {}", path.display());
            }
        } else if resolved.is_dir() {
            let dir_files = collect_all_files(&resolved);
            all_files.extend(filter_activity_files(dir_files, &config.content));
        } else {
            // Name both interpretations that were tried
            anyhow::bail!(
                "Path not found: {}\n  Tried:\n    - {}\n    - {}",
                path.display(),
                path.display(),
                content_dir.join(path).display()
            );
        }
    }

    Ok(all_files)
}

/// Newline-separated paths from stdin; blank lines skipped.
pub fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}

/// Keep only paths with a configured content extension.
pub fn filter_activity_files(files: Vec<PathBuf>, content: &ContentSection) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|p| is_activity_file(p, content))
        .collect()
}

fn is_activity_file(path: &Path, content: &ContentSection) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| content.matches_extension(ext))
}

/// Collect and parse the activity collection for a set of CLI paths.
///
/// Parse failures do not abort collection; they come back in the outcome
/// so the caller decides how strict to be.
pub fn load_collection(paths: &[PathBuf], config: &LibraryConfig) -> Result<LoadOutcome> {
    let files = collect_activity_files(paths, config)?;
    Ok(load_files(&files))
}

/// Load the collection, failing when any file could not be parsed.
///
/// Every load error is printed with its source path before the command
/// aborts. `check` is the forgiving path; build and query refuse to run
/// on a broken collection.
pub fn load_activities(paths: &[PathBuf], config: &LibraryConfig) -> Result<Vec<Activity>> {
    let outcome = load_collection(paths, config)?;

    if !outcome.errors.is_empty() {
        for error in &outcome.errors {
            let rel = config.root_relative(&error.source);
            log!("error"; "{}: {}", rel.display(), error.reason);
        }
        anyhow::bail!(
            "failed to load {}",
            plural_count(outcome.errors.len(), "activity file")
        );
    }

    Ok(outcome.activities)
}
