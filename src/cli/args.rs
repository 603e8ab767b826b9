//! clap surface: global flags, subcommands and their argument structs.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Huodong activity library CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// When to color output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Override the configured output directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Override the configured activities directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file name or path (default: huodong.toml)
    #[arg(short = 'C', long, default_value = "huodong.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new activity library from template
    #[command(visible_alias = "i")]
    Init {
        /// Library directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config template to stdout instead of writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Build the JSON activity index for the library UI
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Check activity files against the schema
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// Filter and search activities, printing matching records as JSON
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },

    /// Watch activity files and rebuild the index on change
    #[command(visible_alias = "w")]
    Watch {
        #[command(flatten)]
        args: WatchArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Pretty-print the index JSON
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub pretty: Option<bool>,

    /// Run the schema check before building
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub check: Option<bool>,

    /// Write the index even when the content fingerprint is unchanged
    #[arg(short, long)]
    pub force: bool,

    /// Log debug detail while running
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Activities to check: files, directories, `-` for paths on stdin,
    /// or omit for the whole library
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Treat schema errors as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,

    /// Log debug detail while running
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Flags for the query subcommand.
///
/// Criteria flags compose with AND; repeated `--festival` values compose
/// with OR. No criteria at all returns the full collection.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Activities to query: files, directories, `-` for paths on stdin,
    /// or omit for the whole library
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Keep only activities with this exact category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Keep only activities with this exact difficulty level
    #[arg(short, long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Keep activities tagged with any of these festivals (repeatable)
    #[arg(short = 'F', long = "festival", value_name = "TAG", value_delimiter = ',')]
    pub festivals: Vec<String>,

    /// Keep only activities with a printable attached
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub printable: Option<bool>,

    /// Keep activities whose title or description contains this text
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Indent the JSON for reading instead of piping
    #[arg(short, long)]
    pub pretty: bool,

    /// Drop null and empty values from the records
    #[arg(short = 'E', long)]
    pub filter_empty: bool,

    /// Keep only these record fields, comma-separated
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Write the JSON to a file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Watch command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct WatchArgs {
    /// Override the debounce quiet period in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub debounce: Option<u64>,

    /// Log debug detail while running
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// init has no config file yet; the loader needs to know before it
    /// goes looking for one.
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}
