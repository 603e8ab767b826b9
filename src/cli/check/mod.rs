//! Schema check command.
//!
//! Loads the collection without aborting on bad files, runs every record
//! through the schema rules, and prints a grouped report. Parse failures
//! and schema errors fail the command; warnings never do.

mod report;

use anyhow::Result;
use rustc_hash::FxHashSet;

use super::common::load_collection;
use crate::activity::{Activity, schema};
use crate::cli::{CheckArgs, Commands};
use crate::config::LibraryConfig;
use crate::log;
use crate::utils::{plural_count, plural_s};

pub use report::CheckReport;

/// Check activity files against the schema
pub fn check_library(config: &LibraryConfig) -> Result<()> {
    let args = get_check_args(config);
    let outcome = load_collection(&args.paths, config)?;

    let file_count = outcome.activities.len() + outcome.errors.len();
    if file_count == 0 {
        log!("check"; "no activity files found");
        return Ok(());
    }

    log!("check"; "checking {}", plural_count(file_count, "file"));

    let mut report = check_records(&outcome.activities, config);
    for error in &outcome.errors {
        report.add_parse(display_path(&error.source, config), error.reason.clone());
    }

    // Log section results
    let parse_count = report.parse_file_count();
    if parse_count > 0 {
        log!("check"; "found {} unreadable file{}", parse_count, plural_s(parse_count));
    }

    let schema_count = report.schema_issue_count();
    if schema_count > 0 {
        log!("check"; "found {} schema error{}", schema_count, plural_s(schema_count));
    } else if parse_count == 0 {
        log!("check"; "schema valid");
    }

    let warning_count = report.warning_count();
    if warning_count > 0 {
        log!("check"; "found {} warning{}", warning_count, plural_s(warning_count));
    }

    // Print detailed report (parse -> schema -> warnings)
    report.print();

    if args.warn_only {
        if !report.is_clean() {
            log!("check"; "errors downgraded to warnings (--warn-only)");
        }
        return Ok(());
    }

    print_summary(&report)
}

/// Run the schema rules over loaded records.
///
/// Shared with the build command, which consults `[build] check` before
/// generating the index.
pub fn check_records(records: &[Activity], config: &LibraryConfig) -> CheckReport {
    let known_slugs: FxHashSet<String> = records.iter().map(|a| a.slug.clone()).collect();

    let mut report = CheckReport::default();
    for activity in records {
        let source = display_path(&activity.source, config);
        for issue in schema::check_record(activity, &known_slugs, &config.check) {
            if issue.is_error() {
                report.add_error(source.clone(), issue.target, issue.reason);
            } else {
                report.add_warning(source.clone(), issue.target, issue.reason);
            }
        }
    }
    report
}

/// One-line totals, then a non-zero exit when errors remain.
fn print_summary(report: &CheckReport) -> Result<()> {
    let parse_files = report.parse_file_count();
    let schema_files = report.schema_file_count();

    if parse_files > 0 || schema_files > 0 {
        let mut parts = Vec::new();
        if parse_files > 0 {
            parts.push(format!(
                "{} with parse errors",
                plural_count(parse_files, "file")
            ));
        }
        if schema_files > 0 {
            parts.push(format!(
                "{} with schema errors",
                plural_count(schema_files, "file")
            ));
        }
        anyhow::bail!("found {}", parts.join(", "));
    }

    Ok(())
}

/// Project-relative path for report grouping.
fn display_path(path: &std::path::Path, config: &LibraryConfig) -> String {
    config.root_relative(path).display().to_string()
}

fn get_check_args(config: &LibraryConfig) -> CheckArgs {
    match &config.get_cli().command {
        Commands::Check { args } => args.clone(),
        _ => CheckArgs {
            paths: vec![],
            warn_only: false,
            verbose: false,
        },
    }
}
