use std::fs;
use std::io::Write;

use anyhow::Result;
use serde_json::{Map, Value as JsonValue};

use crate::activity::Activity;
use crate::cli::args::QueryArgs;
use crate::generator::IndexEntry;
use crate::log;

pub(super) fn output_results(results: &[Activity], args: &QueryArgs) -> Result<()> {
    // An empty match set prints nothing, not `[]`
    if results.is_empty() {
        return Ok(());
    }

    let output = if let Some(ref fields) = args.fields {
        filter_fields(results, fields, args.filter_empty)
    } else {
        format_results(results, args.filter_empty)
    };

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    // A file target keeps stdout clean for the human summary lines
    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)?;
        writeln!(file, "{}", formatted)?;
        log!("query"; "results written to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

/// Full records in index-entry shape.
fn format_results(results: &[Activity], filter_empty: bool) -> JsonValue {
    let entries: Vec<JsonValue> = results
        .iter()
        .map(|activity| format_entry(activity, filter_empty))
        .collect();

    JsonValue::Array(entries)
}

/// Format a single record in index-entry shape, slug first
fn format_entry(activity: &Activity, filter_empty: bool) -> JsonValue {
    let value = serde_json::to_value(IndexEntry::without_body(activity)).unwrap_or_default();

    if !filter_empty {
        return value;
    }

    match value {
        JsonValue::Object(obj) => JsonValue::Object(
            obj.into_iter()
                .filter(|(_, value)| !is_empty_value(value))
                .collect(),
        ),
        other => other,
    }
}

/// Values `--filter-empty` drops: null, "", and [].
fn is_empty_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(arr) => arr.is_empty(),
        _ => false,
    }
}

/// Filter to specific fields, with slug always included first
fn filter_fields(results: &[Activity], fields: &[String], filter_empty: bool) -> JsonValue {
    let entries: Vec<JsonValue> = results
        .iter()
        .map(|activity| {
            let mut obj = Map::new();

            // slug always first
            obj.insert("slug".to_string(), JsonValue::String(activity.slug.clone()));

            let entry =
                serde_json::to_value(IndexEntry::without_body(activity)).unwrap_or_default();
            if let JsonValue::Object(entry_obj) = entry {
                for field in fields {
                    if let Some(value) = entry_obj.get(field) {
                        if !filter_empty || !is_empty_value(value) {
                            obj.insert(field.clone(), value.clone());
                        }
                    } else if !filter_empty {
                        // A requested field the record lacks still appears, as null
                        obj.insert(field.clone(), JsonValue::Null);
                    }
                }
            }

            JsonValue::Object(obj)
        })
        .collect();

    JsonValue::Array(entries)
}
