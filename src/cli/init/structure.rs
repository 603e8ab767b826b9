//! Directory skeleton for a new library.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Directories every library starts with. `/public` is left to the build
/// command, which creates it next to the index on first write.
const SKELETON: &[&str] = &["content/activities", "printables"];

/// Create the library skeleton under `root`.
///
/// `create_dir_all` creates missing parents, so this also creates `root`
/// itself when scaffolding into a new directory.
pub fn create_structure(root: &Path) -> Result<()> {
    for dir in SKELETON {
        fs::create_dir_all(root.join(dir))
            .with_context(|| format!("Failed to create directory '{}'", root.join(dir).display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_skeleton_under_new_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("mandarin-library");

        create_structure(&root).unwrap();

        assert!(root.join("content/activities").is_dir());
        assert!(root.join("printables").is_dir());
        // No output dir until the first build
        assert!(!root.join("public").exists());
    }

    #[test]
    fn test_skeleton_in_existing_dir() {
        let temp = TempDir::new().unwrap();
        create_structure(temp.path()).unwrap();

        assert!(temp.path().join("content/activities").is_dir());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let temp = TempDir::new().unwrap();
        create_structure(temp.path()).unwrap();
        create_structure(temp.path()).unwrap();

        assert!(temp.path().join("printables").is_dir());
    }
}
