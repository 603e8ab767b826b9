//! Target checks that run before any file is written.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

/// Where `init` is asked to put the new library.
#[derive(Debug, Clone, Copy)]
pub enum InitMode {
    /// Bare `huodong init`: scaffold into the working directory.
    CurrentDir,
    /// `huodong init <name>`: scaffold into a directory created for it.
    NewDir,
}

impl InitMode {
    pub(super) fn for_target(has_name: bool) -> Self {
        if has_name {
            Self::NewDir
        } else {
            Self::CurrentDir
        }
    }

    /// Refuse targets where scaffolding would clobber existing files.
    ///
    /// The working directory may be used only while empty; a named
    /// directory must not exist yet at all.
    pub(super) fn check_target(self, root: &Path) -> Result<()> {
        match self {
            Self::CurrentDir => match count_entries(root)? {
                0 => Ok(()),
                n => bail!(
                    "This directory already contains {n} entr{}.\n\
                     Run `huodong init <name>` to scaffold into a fresh directory instead.",
                    crate::utils::plural_ies(n)
                ),
            },
            Self::NewDir => {
                if root.exists() {
                    bail!(
                        "'{}' already exists; pick another name or move it out of the way.",
                        root.display()
                    );
                }
                Ok(())
            }
        }
    }
}

/// Number of directory entries, hidden files included. Zero for a path
/// that does not exist yet.
fn count_entries(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Ok(0);
    }
    let count = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory '{}'", path.display()))?
        .count();
    Ok(count)
}
