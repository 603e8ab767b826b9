//! Files a fresh library starts with: the annotated config, ignore
//! rules, and one working activity.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Filename the config loader walks up the tree looking for.
const CONFIG_FILE: &str = "huodong.toml";

/// Git and ripgrep-style tools both get the same patterns.
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Starter activity filename inside the content directory
const STARTER_FILE: &str = "content/activities/number-hunt.md";

/// A complete, schema-clean activity so `huodong build` works immediately
/// after init.
const STARTER_ACTIVITY: &str = r#"---
title: "Number Hunt"
description: "Find and name hidden numbers around the room in Mandarin."
ageRange: "3-6"
duration: "15 minutes"
category: game
difficultyLevel: beginner
skills:
  - listening
  - speaking
vocabulary:
  - simplified: "一"
    pinyin: "yī"
    english: "one"
  - simplified: "二"
    pinyin: "èr"
    english: "two"
  - simplified: "三"
    pinyin: "sān"
    english: "three"
supplies:
  - "Sticky notes"
  - "Marker"
tags:
  - counting
---

# Preparation

Write the numbers one to ten on sticky notes and hide them around the
room at child height.

# Steps

1. Call out a number in Mandarin.
2. The child finds the matching note and repeats the number back.
3. Swap roles once all ten notes are found.

# Variations

For beginners, start with one to five and count the found notes together
out loud at the end.
"#;

/// Render the annotated huodong.toml template.
pub fn generate_config_template() -> String {
    format!(
        r#"# Huodong configuration file (v{version})
# https://github.com/huodong-rs/huodong

[site]
title = "My Activity Library"        # Library title shown in the index
description = "Mandarin activities for our homeschool"
# url = "https://example.com"        # Optional absolute base URL

[content]
dir = "content/activities"           # Activity markdown directory
extensions = ["md"]                  # File extensions loaded as activities

[build]
output = "public"                    # Output directory
index = "index.json"                 # Index artifact filename
pretty = false                       # Pretty-print the index JSON
check = true                         # Run the schema check before building

[check]
warn_unknown_keys = true             # Warn about unrecognized frontmatter keys
require_body = false                 # Treat an empty activity body as an error

[watch]
debounce_ms = 300                    # Quiet period before a rebuild
cooldown_ms = 800                    # Minimum gap between rebuilds
"#,
        version = env!("CARGO_PKG_VERSION")
    )
}

/// Drop the default huodong.toml at the library root.
pub fn write_config(root: &Path) -> Result<()> {
    let content = generate_config_template();

    let path = root.join(CONFIG_FILE);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    Ok(())
}

/// Seed .gitignore and .ignore so the build output and OS litter stay
/// out of version control and search.
pub fn write_ignore_files(root: &Path, output_dir: &Path) -> Result<()> {
    let output_pattern = Path::new("/").join(output_dir);
    let patterns = [
        output_pattern.to_string_lossy().into_owned(),
        ".DS_Store".to_string(),
    ];

    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // Never clobber ignore rules the user already wrote
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

/// Write the starter activity into the content directory
pub fn write_starter_activity(root: &Path) -> Result<()> {
    let path = root.join(STARTER_FILE);
    // A rerun must not revert edits to the starter
    if !path.exists() {
        fs::write(&path, STARTER_ACTIVITY)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
    }
    Ok(())
}
