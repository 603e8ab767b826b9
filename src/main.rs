//! Huodong - a content toolkit for Mandarin homeschool activity libraries.

#![allow(dead_code)]

mod activity;
mod cli;
mod config;
mod core;
mod filter;
mod generator;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{LibraryConfig, init_config};

fn main() -> Result<()> {
    // Install before anything blocks so the first Ctrl+C always lands
    core::setup_shutdown_handler()?;

    // Config sections hold `&'static Cli`, so the parsed args leak once here
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    apply_color_choice(cli.color);

    let config = init_config(LibraryConfig::load(cli)?);

    match &cli.command {
        Commands::Init { name, dry_run } => {
            cli::init::new_library(&config, name.is_some(), *dry_run)
        }
        Commands::Build { .. } => cli::build::build_library(&config).map(|_| ()),
        Commands::Check { .. } => cli::check::check_library(&config),
        Commands::Query { args } => cli::query::run_query(args, &config),
        Commands::Watch { .. } => cli::watch::watch_library(&config),
    }
}

fn apply_color_choice(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        // owo-colors detects TTYs on its own
        ColorChoice::Auto => {}
    }
}
