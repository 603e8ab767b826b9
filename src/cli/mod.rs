//! One submodule per subcommand, plus the shared loading helpers.

mod args;
pub mod build;
pub mod check;
pub mod common;
pub mod init;
pub mod query;
pub mod watch;

pub use args::{BuildArgs, CheckArgs, Cli, Commands, QueryArgs, WatchArgs};
