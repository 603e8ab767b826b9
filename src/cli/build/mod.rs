//! Index building orchestration.
//!
//! Build phases:
//! - **Collect** - Gather activity files from the content directory
//! - **Load** - Parse frontmatter and bodies in parallel
//! - **Check** - Optional schema check (`[build] check`)
//! - **Generate** - Write the JSON index artifact

use anyhow::Result;

use super::check::check_records;
use super::common::load_activities;
use crate::activity::{ACTIVITIES, Activity};
use crate::config::LibraryConfig;
use crate::generator::build_index;
use crate::log;
use crate::utils::plural_count;

/// Build the activity index from the content directory
///
/// Returns whether the stored collection changed, so watch mode can tell
/// a real rebuild from a no-op.
pub fn build_library(config: &LibraryConfig) -> Result<bool> {
    let records = load_activities(&[], config)?;

    if records.is_empty() {
        log!("warn"; "no activity files found, the index will be empty");
    }

    if config.build.check {
        run_check(&records, config)?;
    }

    build_index(&records, config)?;
    let changed = ACTIVITIES.replace(records);

    log!("build"; "done");
    Ok(changed)
}

/// Run the schema check, failing the build on errors.
fn run_check(records: &[Activity], config: &LibraryConfig) -> Result<()> {
    let report = check_records(records, config);
    report.print();

    if !report.is_clean() {
        anyhow::bail!(
            "check failed with {}",
            plural_count(report.schema_issue_count(), "schema error")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn test_config(root: &Path) -> LibraryConfig {
        let mut config = LibraryConfig::default();
        config.set_root(root);
        config.site.title = "Test Library".into();
        config.site.description = "Activities".into();
        config.content.dir = root.join("content/activities");
        config.build.output = root.join("public");
        config
    }

    fn write_activity(dir: &Path, name: &str, title: &str, body: &str) {
        let content = format!(
            "---\ntitle: {title}\ndescription: Description of {title}\nageRange: 3-6\n\
             duration: 15 minutes\ncategory: game\ndifficultyLevel: beginner\n\
             skills: [listening]\n---\n\n{body}\n"
        );
        fs::write(dir.join(name), content).unwrap();
    }

    // Tests share the global store, so the changed flag is asserted in the
    // store's own tests rather than here.
    #[test]
    fn test_build_library_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());
        fs::create_dir_all(&config.content.dir).unwrap();
        write_activity(&config.content.dir, "counting-game.md", "Number Jump", "Count and jump.");
        write_activity(&config.content.dir, "song-hello.md", "Hello Song", "Sing hello.");

        build_library(&config).unwrap();

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(config.index_path()).unwrap()).unwrap();
        assert_eq!(index["activities"].as_array().unwrap().len(), 2);
        assert_eq!(index["counts"]["game"], 2);
        let first_fingerprint = index["fingerprint"].as_str().unwrap().to_string();

        // Edit a file and rebuild: the artifact must pick up the change
        write_activity(&config.content.dir, "song-hello.md", "Hello Song", "Sing it twice.");
        build_library(&config).unwrap();

        let rebuilt: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(config.index_path()).unwrap()).unwrap();
        assert_ne!(rebuilt["fingerprint"].as_str().unwrap(), first_fingerprint);
        assert!(
            rebuilt["activities"][1]["bodyHtml"]
                .as_str()
                .unwrap()
                .contains("Sing it twice.")
        );
    }

    #[test]
    fn test_build_fails_on_schema_errors() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());
        fs::create_dir_all(&config.content.dir).unwrap();
        write_activity(&config.content.dir, "bad.md", "\"\"", "Body.");

        let result = build_library(&config);

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("check failed"));
        assert!(!config.index_path().exists());
    }

    #[test]
    fn test_build_skips_check_when_disabled() {
        let tmp = TempDir::new().unwrap();
        let mut config = test_config(tmp.path());
        config.build.check = false;
        fs::create_dir_all(&config.content.dir).unwrap();
        write_activity(&config.content.dir, "bad.md", "\"\"", "Body.");

        build_library(&config).unwrap();
        assert!(config.index_path().exists());
    }
}
