//! The `init` command: scaffold a new activity library.
//!
//! A fresh library is a content directory, a printables directory, a
//! commented `huodong.toml`, ignore files for the build output, and one
//! starter activity so the first `huodong build` has something to index.

mod config;
mod structure;
mod validate;

use anyhow::Result;

use crate::config::LibraryConfig;
use crate::log;
use validate::InitMode;

/// Scaffold a library at the configured root.
///
/// `has_name` distinguishes `huodong init` (current directory, must be
/// empty) from `huodong init <name>` (fresh subdirectory). With
/// `dry_run` nothing is written; the config template goes to stdout.
pub fn new_library(library_config: &LibraryConfig, has_name: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", config::generate_config_template());
        return Ok(());
    }

    let root = library_config.get_root();
    if let Err(e) = InitMode::for_target(has_name).check_target(root) {
        log!("error"; "{}", e);
        std::process::exit(1);
    }

    structure::create_structure(root)?;
    config::write_config(root)?;

    let output_dir = library_config.root_relative(&library_config.build.output);
    config::write_ignore_files(root, &output_dir)?;
    config::write_starter_activity(root)?;

    log!("init"; "Library initialized successfully");
    log!("init"; "next: `cd` in and run `huodong build`");
    Ok(())
}
