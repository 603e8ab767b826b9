//! Absolute-path helpers.
//!
//! Config values, watcher events and CLI file arguments all arrive as a
//! mix of relative, tilde'd and symlinked paths; everything downstream
//! compares paths by equality, so they are forced absolute at the edges.

use std::path::{Path, PathBuf};

/// Best-effort absolute form of `path`.
///
/// Canonicalizes when the path exists, which also resolves symlinks and
/// `.`/`..` segments. Missing paths are anchored at cwd instead, so they
/// still compare against canonicalized siblings.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(_) if path.is_absolute() => path.to_path_buf(),
        Err(_) => std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path)),
    }
}

/// Absolute form of a user-supplied file argument.
///
/// `huodong check dragon-craft.md` should find the file whether the
/// argument was absolute, relative to cwd, or a bare name inside
/// `fallback_dir` (the activities directory). Tried in that order.
#[inline]
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if path.exists() {
        return normalize_path(path);
    }
    normalize_path(&fallback_dir.join(path))
}
