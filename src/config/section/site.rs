//! The `[site]` table: library metadata carried into the built index so
//! the UI can render a header without a second config file.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Our Mandarin Activities"    # Library title
//! description = "Hands-on activities for Mandarin homeschooling"
//! url = "https://example.com"          # Optional, absolute base URL
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Library metadata for the index header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Library title.
    pub title: String,

    /// Library description.
    pub description: String,

    /// Base URL of the published library (e.g., "https://example.com").
    /// Used to resolve printable links in consuming UIs; optional.
    pub url: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            url: None,
        }
    }
}

impl SiteSection {
    /// Validate site metadata.
    ///
    /// # Checks
    /// - `title` and `description` must be non-empty
    /// - `url`, when set, must be an absolute http(s) URL with a host
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error_with_hint(
                FieldPath::new("site.title"),
                "required and must not be empty",
                "set a library title, e.g.: \"Our Mandarin Activities\"",
            );
        }

        if self.description.trim().is_empty() {
            diag.error_with_hint(
                FieldPath::new("site.description"),
                "required and must not be empty",
                "describe the library in one sentence",
            );
        }

        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            FieldPath::new("site.url"),
                            format!(
                                "unsupported scheme '{}', only http and https work here",
                                parsed.scheme()
                            ),
                            "write it like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            FieldPath::new("site.url"),
                            "the URL names no host",
                            "write it like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        FieldPath::new("site.url"),
                        format!("invalid URL: {}", e),
                        "write it like https://example.com",
                    );
                }
            }
        }
    }
}
