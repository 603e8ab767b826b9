//! JSON index generation.
//!
//! The index is the single artifact the library UI consumes: one JSON file
//! carrying the site header, a content fingerprint, per-category counts,
//! the festival tags observed across the collection, and every activity
//! with its body rendered to HTML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::markdown;
use crate::activity::{Activity, ActivityMeta, Category, JsonMap, content_fingerprint};
use crate::config::LibraryConfig;
use crate::log;
use crate::utils::plural_ies;

/// Build and write the index artifact for a loaded collection.
///
/// The write is skipped when the artifact on disk already carries the same
/// content fingerprint, unless `--force` was given.
pub fn build_index(records: &[Activity], config: &LibraryConfig) -> Result<()> {
    let index = LibraryIndex::build(records, config);
    let path = config.index_path();

    if !config.build.force
        && existing_fingerprint(&path).as_deref() == Some(index.fingerprint.as_str())
    {
        log!("index"; "unchanged ({}), skipping write", index.fingerprint);
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    fs::write(&path, index.to_json(config.build.pretty)?)
        .with_context(|| format!("Failed to write index to {}", path.display()))?;

    log!(
        "index";
        "{} ({} activit{})",
        config.build.index,
        records.len(),
        plural_ies(records.len())
    );
    Ok(())
}

/// One activity entry in the index artifact.
///
/// Frontmatter fields are flattened into the entry alongside the slug, so
/// consumers read `entry.title` rather than `entry.meta.title`. The rendered
/// body is optional: the full index carries it, query output omits it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry<'a> {
    /// Stable identifier, derived from the source filename.
    pub slug: &'a str,

    /// Frontmatter metadata, flattened.
    #[serde(flatten)]
    pub meta: &'a ActivityMeta,

    /// Whether the activity carries a printable resource.
    pub has_printable: bool,

    /// Body rendered to an HTML fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
}

impl<'a> IndexEntry<'a> {
    /// Entry without the rendered body (the `query` output shape).
    pub fn without_body(activity: &'a Activity) -> Self {
        Self {
            slug: &activity.slug,
            meta: &activity.meta,
            has_printable: activity.has_printable(),
            body_html: None,
        }
    }

    /// Entry with the markdown body rendered to HTML.
    pub fn with_body(activity: &'a Activity) -> Self {
        Self {
            body_html: Some(markdown::render_html(&activity.body)),
            ..Self::without_body(activity)
        }
    }
}

/// The complete index artifact.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LibraryIndex<'a> {
    title: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    generator: &'static str,
    fingerprint: String,
    counts: JsonMap,
    festivals: Vec<&'a str>,
    activities: Vec<IndexEntry<'a>>,
}

impl<'a> LibraryIndex<'a> {
    /// Assemble the artifact from a loaded collection.
    fn build(records: &'a [Activity], config: &'a LibraryConfig) -> Self {
        Self {
            title: &config.site.title,
            description: &config.site.description,
            url: config.site.url.as_deref(),
            generator: concat!("huodong ", env!("CARGO_PKG_VERSION")),
            fingerprint: content_fingerprint(records),
            counts: category_counts(records),
            festivals: festival_tags(records),
            activities: records.iter().map(IndexEntry::with_body).collect(),
        }
    }

    fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.context("Failed to serialize index")
    }
}

/// Per-category record counts, in declaration order, zeros included.
///
/// The UI renders its category dropdown from this map, so every category
/// appears even when no record uses it.
fn category_counts(records: &[Activity]) -> JsonMap {
    let mut counts = JsonMap::new();
    for category in Category::ALL {
        let n = records
            .iter()
            .filter(|a| a.meta.category == category)
            .count();
        counts.insert(category.as_str().to_string(), n.into());
    }
    counts
}

/// Distinct tags across the collection, sorted.
///
/// These are exactly the values a festival filter can match, so the UI
/// renders its festival checkboxes from this list.
fn festival_tags(records: &[Activity]) -> Vec<&str> {
    let mut tags: Vec<&str> = records
        .iter()
        .flat_map(|a| a.meta.tags.iter().map(String::as_str))
        .collect();
    tags.sort_unstable();
    tags.dedup();
    tags
}

/// Fingerprint recorded in an already-written index, if readable.
fn existing_fingerprint(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&content).ok()?;
    Some(value.get("fingerprint")?.as_str()?.to_string())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::activity::Printable;

    fn make_activity(slug: &str, category: Category, tags: &[&str], printable: bool) -> Activity {
        let meta = ActivityMeta {
            title: format!("Activity {slug}"),
            description: format!("Description for {slug}"),
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            printable: printable.then(|| Printable {
                title: "Worksheet".into(),
                url: "/printables/sheet.pdf".into(),
            }),
            ..ActivityMeta::default()
        };
        Activity::new(
            slug.to_string(),
            PathBuf::from(format!("{slug}.md")),
            "# 步骤\n\nDo the thing.".to_string(),
            meta,
        )
    }

    fn library() -> Vec<Activity> {
        vec![
            make_activity("dragon-craft", Category::Craft, &["lunar-new-year"], false),
            make_activity(
                "moon-story",
                Category::Story,
                &["mid-autumn", "legend"],
                true,
            ),
            make_activity("turkey-craft", Category::Craft, &["thanksgiving"], true),
        ]
    }

    fn test_config(output: PathBuf) -> LibraryConfig {
        let mut config = LibraryConfig::default();
        config.site.title = "Test Library".into();
        config.site.description = "Activities for testing".into();
        config.build.output = output;
        config
    }

    #[test]
    fn test_counts_cover_every_category() {
        let counts = category_counts(&library());

        let keys: Vec<&str> = counts.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["game", "craft", "story", "song", "festival", "food", "other"]
        );
        assert_eq!(counts["craft"], 2);
        assert_eq!(counts["story"], 1);
        assert_eq!(counts["game"], 0);
    }

    #[test]
    fn test_festivals_are_distinct_sorted_tags() {
        let records = vec![
            make_activity("a", Category::Craft, &["thanksgiving", "crafts"], false),
            make_activity("b", Category::Story, &["mid-autumn", "crafts"], false),
        ];

        assert_eq!(
            festival_tags(&records),
            ["crafts", "mid-autumn", "thanksgiving"]
        );
    }

    #[test]
    fn test_entry_with_body_renders_html() {
        let records = library();
        let entry = IndexEntry::with_body(&records[0]);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["slug"], "dragon-craft");
        assert_eq!(json["title"], "Activity dragon-craft");
        assert_eq!(json["hasPrintable"], false);
        let body = json["bodyHtml"].as_str().unwrap();
        assert!(body.contains("<h1>步骤</h1>"));
    }

    #[test]
    fn test_entry_without_body_omits_the_field() {
        let records = library();
        let entry = IndexEntry::without_body(&records[1]);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["hasPrintable"], true);
        assert!(json.get("bodyHtml").is_none());
    }

    #[test]
    fn test_index_shape() {
        let records = library();
        let config = test_config(PathBuf::from("public"));
        let index = LibraryIndex::build(&records, &config);
        let json: serde_json::Value =
            serde_json::from_str(&index.to_json(false).unwrap()).unwrap();

        assert_eq!(json["title"], "Test Library");
        assert!(json.get("url").is_none());
        assert!(
            json["generator"]
                .as_str()
                .unwrap()
                .starts_with("huodong ")
        );
        assert_eq!(json["fingerprint"].as_str().unwrap().len(), 16);
        assert_eq!(json["activities"].as_array().unwrap().len(), 3);
        assert_eq!(json["festivals"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_build_index_writes_artifact() {
        let tmp = TempDir::new().unwrap();
        let records = library();
        let config = test_config(tmp.path().join("public"));

        build_index(&records, &config).unwrap();

        let written = fs::read_to_string(config.index_path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(
            json["fingerprint"].as_str().unwrap(),
            content_fingerprint(&records)
        );
    }

    #[test]
    fn test_build_index_skips_unchanged_content() {
        let tmp = TempDir::new().unwrap();
        let records = library();
        let mut config = test_config(tmp.path().join("public"));

        build_index(&records, &config).unwrap();

        // A second build with pretty output would reformat the file, so an
        // unchanged compact artifact proves the write was skipped.
        config.build.pretty = true;
        build_index(&records, &config).unwrap();
        let unchanged = fs::read_to_string(config.index_path()).unwrap();
        assert!(!unchanged.contains("\n  "));

        config.build.force = true;
        build_index(&records, &config).unwrap();
        let forced = fs::read_to_string(config.index_path()).unwrap();
        assert!(forced.contains("\n  "));
    }

    #[test]
    fn test_build_index_rewrites_on_content_change() {
        let tmp = TempDir::new().unwrap();
        let mut records = library();
        let config = test_config(tmp.path().join("public"));

        build_index(&records, &config).unwrap();

        records.pop();
        build_index(&records, &config).unwrap();

        let written = fs::read_to_string(config.index_path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["activities"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_existing_fingerprint_reads_field() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.json");

        fs::write(&path, r#"{"fingerprint":"deadbeefdeadbeef"}"#).unwrap();
        assert_eq!(
            existing_fingerprint(&path).as_deref(),
            Some("deadbeefdeadbeef")
        );

        fs::write(&path, "not json").unwrap();
        assert_eq!(existing_fingerprint(&path), None);

        assert_eq!(existing_fingerprint(&tmp.path().join("missing.json")), None);
    }
}
