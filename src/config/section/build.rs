//! The `[build]` table: output location and shape of the index artifact.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public"       # Output directory
//! index = "index.json"    # Index artifact filename
//! pretty = false          # Pretty-print the index JSON
//! check = true            # Run schema check before building
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Index build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Output directory for built artifacts.
    /// Relative to the project root; normalized to absolute at load time.
    pub output: PathBuf,

    /// Filename of the JSON index inside the output directory.
    pub index: String,

    /// Pretty-print the index JSON (larger file, diff-friendly).
    pub pretty: bool,

    /// Run the schema check before building; errors fail the build.
    pub check: bool,

    /// Write the index even when the content fingerprint is unchanged.
    /// CLI-only (`--force`), never read from huodong.toml.
    #[serde(skip)]
    pub force: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output: PathBuf::from("public"),
            index: "index.json".into(),
            pretty: false,
            check: true,
            force: false,
        }
    }
}

impl BuildSection {
    /// Validate build settings.
    ///
    /// # Checks
    /// - `index` must be a bare `.json` filename, not a path
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.index.contains('/') || self.index.contains('\\') {
            diag.error_with_hint(
                FieldPath::new("build.index"),
                "must be a filename, not a path",
                "the index is always written into the output directory",
            );
        }

        if !self.index.ends_with(".json") {
            diag.error_with_hint(
                FieldPath::new("build.index"),
                format!("'{}' must end with .json", self.index),
                "e.g.: index = \"index.json\"",
            );
        }
    }

    /// Pre-normalization path check: `output` must stay inside the project.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        if self.output.is_absolute() {
            diag.error_with_hint(
                FieldPath::new("build.output"),
                "must be a relative path inside the project",
                "e.g.: output = \"public\"",
            );
        }
    }
}
