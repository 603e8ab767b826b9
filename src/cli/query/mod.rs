//! The query subcommand: one filter/search pass, JSON out.
//!
//! Loads the requested activity files (or the whole collection), applies
//! the AND-composed criteria clauses, then the text search, and prints
//! the matching records as JSON in index-entry shape.

mod output;

use anyhow::Result;

use crate::cli::args::QueryArgs;
use crate::config::LibraryConfig;
use crate::filter::{FilterCriteria, combine_filters};
use crate::log;
use crate::utils::{plural_count, plural_ies};

/// Load, filter, search, print.
pub fn run_query(args: &QueryArgs, config: &LibraryConfig) -> Result<()> {
    let records = crate::cli::common::load_activities(&args.paths, config)?;
    log!("query"; "querying {}", plural_count(records.len(), "activity file"));

    let criteria = criteria_from_args(args);
    let query = args.search.as_deref().unwrap_or("");
    let results = combine_filters(&records, &criteria, query);

    log!(
        "query";
        "found {} matching activit{}",
        results.len(),
        plural_ies(results.len())
    );

    output::output_results(&results, args)?;
    Ok(())
}

/// Build filter criteria from command-line flags.
///
/// `--printable false` (and omitting the flag) leaves the printable
/// clause unconstrained rather than selecting only activities without
/// a printable.
fn criteria_from_args(args: &QueryArgs) -> FilterCriteria {
    FilterCriteria {
        category: args.category.clone(),
        level: args.level.clone(),
        festivals: args.festivals.clone(),
        printable: args.printable.unwrap_or(false),
    }
}
