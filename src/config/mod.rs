//! `huodong.toml` loading, validation and CLI-flag layering.
//!
//! One file per `[section]` under `section/`:
//!
//! | Section     | Purpose                                    |
//! |-------------|--------------------------------------------|
//! | `[site]`    | Library metadata (title, description, url) |
//! | `[content]` | Activity directory and extensions          |
//! | `[build]`   | Output directory, index artifact           |
//! | `[check]`   | Schema check strictness                    |
//! | `[watch]`   | Rebuild debounce timing                    |
//!
//! `types/` carries the support pieces: `ConfigError` and the diagnostics
//! collector, `FieldPath`, and the process-wide config handle. This file
//! owns [`LibraryConfig`] itself and the load pipeline.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// The section structs and the handle are the public face
pub use section::{BuildSection, CheckSection, ContentSection, SiteSection, WatchSection};

pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config, reload_config};

use crate::{
    cli::{BuildArgs, Cli, Commands, WatchArgs},
    log,
    utils::plural_count,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// top-level config
// ============================================================================

/// Everything `huodong.toml` can express, one field per `[section]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Backing CLI arguments, pinned by `load()`; never serialized
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path of the loaded config file
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Library root, the config file's parent directory
    #[serde(skip)]
    pub root: PathBuf,

    /// Library metadata
    #[serde(default)]
    pub site: SiteSection,

    /// Content collection settings
    #[serde(default)]
    pub content: ContentSection,

    /// Index build settings
    #[serde(default)]
    pub build: BuildSection,

    /// Schema check settings
    #[serde(default)]
    pub check: CheckSection,

    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchSection,
}

impl LibraryConfig {
    /// Full load pipeline: locate the file, parse it, validate raw paths,
    /// pin the root, absolutize paths, layer CLI flags, validate sections.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        // init is the one command allowed to run without a config file;
        // it is about to write one
        if !cli.is_init() && !exists {
            log!(
                "error";
                "Config file '{}' not found. Run 'huodong init' to create a new library.",
                cli.config.display()
            );
            std::process::exit(1);
        }

        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        // Raw-path checks must see the values as written, before
        // normalization absolutizes them
        if !cli.is_init() {
            config.validate_paths()?;
        }

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);

        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Where the config file is, or would be.
    ///
    /// `init` anchors the path at the target directory (the config does not
    /// exist yet); every other command searches upward from cwd.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match &cli.command {
            Commands::Init { name, .. } => {
                let target = match name {
                    Some(name) => cwd.join(name),
                    None => cwd,
                };
                let path = target.join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            _ => match find_config_file(&cli.config) {
                Some(path) => Ok((path, true)),
                None => Ok((cwd.join(&cli.config), false)),
            },
        }
    }

    /// Finalize configuration after loading: pin the project root, make
    /// every configured path absolute, then layer CLI flags on top.
    fn finalize(&mut self, cli: &Cli) {
        let root = match &cli.command {
            Commands::Init { name, .. } => {
                let cwd = std::env::current_dir().unwrap_or_default();
                match name {
                    Some(name) => cwd.join(name),
                    None => cwd,
                }
            }
            _ => self
                .config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        self.set_root(&root);
        self.normalize_paths(&root);
        self.apply_command_options(cli);
    }

    /// Parse a TOML string without the load pipeline around it.
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse the file, surfacing fields no section knows about.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
            if !Self::prompt_continue()? {
                bail!("stopping on unrecognized config fields");
            }
        }

        Ok(config)
    }

    /// Parse, recording every field path serde had no target for.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // The config always sits at the project root, so the filename is enough
        let name = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy());
        eprintln!();
        log!("warning"; "{} in {}, ignoring:", plural_count(fields.len(), "unknown field"), name);
        for field in fields {
            eprintln!("- {field}");
        }
        eprintln!();
    }

    /// Ask whether to keep going after an unknown-field warning; only an
    /// explicit yes continues.
    ///
    /// Watch-mode reloads and non-interactive sessions continue without
    /// asking; the warning above has already been printed.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, IsTerminal, Write};

        if crate::core::is_watching() || !io::stdin().is_terminal() {
            return Ok(true);
        }

        eprint!("Continue anyway? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let answer = input.trim().to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// A path under the pinned root.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Strip the root prefix for display; paths outside the root pass
    /// through untouched.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// The process-wide CLI args this config was loaded with.
    pub const fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Absolute path of the index artifact.
    pub fn index_path(&self) -> PathBuf {
        self.build.output.join(&self.build.index)
    }

    // ========================================================================
    // cli overrides
    // ========================================================================

    /// Fold command-specific flags into the loaded config.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => {
                self.apply_build_args(build_args);
            }
            Commands::Check { args } => {
                crate::logger::set_verbose(args.verbose);
            }
            Commands::Watch { args } => {
                self.apply_watch_args(args);
            }
            // init and query take no config overrides
            Commands::Init { .. } | Commands::Query { .. } => {}
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::override_with(&mut self.build.pretty, args.pretty.as_ref());
        Self::override_with(&mut self.build.check, args.check.as_ref());
        self.build.force = args.force;
    }

    fn apply_watch_args(&mut self, args: &WatchArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::override_with(&mut self.watch.debounce_ms, args.debounce.as_ref());
        // Keep the cooldown invariant when only the debounce was raised
        if self.watch.cooldown_ms < self.watch.debounce_ms {
            self.watch.cooldown_ms = self.watch.debounce_ms;
        }
    }

    /// Replace a config value with a CLI flag when the flag was given.
    fn override_with<T: Clone>(setting: &mut T, flag: Option<&T>) {
        if let Some(value) = flag {
            *setting = value.clone();
        }
    }

    // ========================================================================
    // path resolution
    // ========================================================================

    /// Rewrite every configured path to an absolute, normalized form.
    fn normalize_paths(&mut self, root: &Path) {
        let cli = self.get_cli();

        // CLI path overrides land before normalization so they get the
        // same tilde/relative treatment as config values
        Self::override_with(&mut self.content.dir, cli.content.as_ref());
        Self::override_with(&mut self.build.output, cli.output.as_ref());

        let root = crate::utils::path::normalize_path(root);
        self.set_root(&root);
        self.config_path = crate::utils::path::normalize_path(&self.config_path);

        self.content.dir = Self::expand_path(&self.content.dir, &root);
        self.build.output = Self::expand_path(&self.build.output, &root);
        // build.index stays a bare filename, resolved via index_path()
    }

    /// Tilde-expand, then anchor relative paths at the library root.
    fn expand_path(path: &Path, root: &Path) -> PathBuf {
        let expanded = PathBuf::from(
            shellexpand::tilde(path.to_str().unwrap_or_default()).into_owned(),
        );
        let absolute = if expanded.is_relative() {
            root.join(&expanded)
        } else {
            expanded
        };
        crate::utils::path::normalize_path(&absolute)
    }

    // ========================================================================
    // section checks
    // ========================================================================

    /// Check paths as written in the file, before `finalize()` rewrites
    /// relative values to absolute ones and the distinction is gone.
    fn validate_paths(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.content.validate_paths(&mut diag);
        self.build.validate_paths(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Run every section's validation, collecting findings so one failed
    /// run reports all of them.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if !self.config_path.exists() {
            bail!(ConfigError::Validation("no config file found".into()));
        }

        self.site.validate(&mut diag);
        self.content.validate(&mut diag);
        self.build.validate(&mut diag);
        self.watch.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// test support
// ============================================================================

/// Parse `extra` on top of the minimal required `[site]` fields, panicking
/// on unknown fields so typos in test snippets fail loudly.
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> LibraryConfig {
    let config = format!("[site]\ntitle = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = LibraryConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "unexpected unknown fields in test config: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        // unclosed section bracket
        let result: Result<LibraryConfig, _> = toml::from_str("[site\ntitle = \"Activities\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_root_accessors() {
        let mut config = LibraryConfig::default();
        // Empty until load() pins it to the config file's directory
        assert_eq!(config.get_root(), Path::new(""));

        config.set_root(Path::new("/our/library"));
        assert_eq!(config.get_root(), Path::new("/our/library"));
        assert_eq!(
            config.root_join("content"),
            PathBuf::from("/our/library/content")
        );
    }

    #[test]
    fn test_library_config_default() {
        let config = LibraryConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.title, "");
        assert_eq!(config.content.dir, PathBuf::from("content/activities"));
        assert_eq!(config.build.index, "index.json");
        assert_eq!(config.watch.debounce_ms, 300);
    }

    #[test]
    fn test_index_path_joins_output() {
        let mut config = LibraryConfig::default();
        config.build.output = PathBuf::from("/project/public");
        assert_eq!(
            config.index_path(),
            PathBuf::from("/project/public/index.json")
        );
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content =
            "[site]\ntitle = \"Test\"\ndescription = \"Test\"\n[extras]\nfield = \"value\"";
        let (config, ignored) = LibraryConfig::parse_with_ignored(content).unwrap();

        // Parsing still succeeds; the stray section is only reported
        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("extras")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ntitle = \"Test\"\ndescription = \"Test\"";
        let (_, ignored) = LibraryConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_root_relative() {
        let mut config = LibraryConfig::default();
        config.set_root(Path::new("/project"));
        assert_eq!(
            config.root_relative("/project/content/activities/a.md"),
            PathBuf::from("content/activities/a.md")
        );
        // Paths outside the root pass through unchanged
        assert_eq!(
            config.root_relative("/elsewhere/a.md"),
            PathBuf::from("/elsewhere/a.md")
        );
    }
}
