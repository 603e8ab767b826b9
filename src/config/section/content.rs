//! The `[content]` table: where activity files live and which
//! extensions count as content.
//!
//! # Example
//!
//! ```toml
//! [content]
//! dir = "content/activities"   # Activity markdown directory
//! extensions = ["md"]          # File extensions to load
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Content collection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    /// Directory holding activity markdown files.
    /// Relative to the project root; normalized to absolute at load time.
    pub dir: PathBuf,

    /// File extensions treated as activity content (without leading dot).
    pub extensions: Vec<String>,
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content/activities"),
            extensions: vec!["md".into()],
        }
    }
}

impl ContentSection {
    /// Check whether a file extension is a content extension.
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Validate content settings.
    ///
    /// # Checks
    /// - `extensions` must be non-empty and entries must not carry a dot
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extensions.is_empty() {
            diag.error_with_hint(
                FieldPath::new("content.extensions"),
                "must list at least one extension",
                "e.g.: extensions = [\"md\"]",
            );
        }

        for ext in &self.extensions {
            if ext.starts_with('.') {
                diag.error_with_hint(
                    FieldPath::new("content.extensions"),
                    format!("extension '{}' must not start with a dot", ext),
                    format!("write \"{}\" instead", ext.trim_start_matches('.')),
                );
            }
        }
    }

    /// Pre-normalization path check: `dir` must stay inside the project.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        if self.dir.is_absolute() {
            diag.error_with_hint(
                FieldPath::new("content.dir"),
                "must be a relative path inside the project",
                "e.g.: dir = \"content/activities\"",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    use super::*;

    #[test]
    fn test_content_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.content.dir, PathBuf::from("content/activities"));
        assert_eq!(config.content.extensions, vec!["md".to_string()]);
    }

    #[test]
    fn test_content_override() {
        let config = test_parse_config("[content]\ndir = \"activities\"");
        assert_eq!(config.content.dir, PathBuf::from("activities"));
    }

    #[test]
    fn test_matches_extension_case_insensitive() {
        let section = ContentSection::default();
        assert!(section.matches_extension("md"));
        assert!(section.matches_extension("MD"));
        assert!(!section.matches_extension("typ"));
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let mut section = ContentSection::default();
        section.extensions = vec![".md".into()];

        let mut diag = ConfigDiagnostics::new();
        section.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_validate_paths_rejects_absolute_dir() {
        let mut section = ContentSection::default();
        section.dir = PathBuf::from("/etc/activities");

        let mut diag = ConfigDiagnostics::new();
        section.validate_paths(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.entries()[0].field.as_str(), "content.dir");
    }
}
