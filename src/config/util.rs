//! Config file discovery.

use std::path::{Path, PathBuf};

/// Locate the config file for the library containing cwd.
///
/// Commands work from anywhere inside a library, the way git does: a bare
/// `huodong.toml` is tried against cwd and each ancestor in turn.
///
/// ```text
/// /home/user/library/content/activities/  ← cwd
/// /home/user/library/huodong.toml         ← found here
/// ```
///
/// An absolute `--config` path skips the walk entirely.
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}
