//! The `[check]` table: schema check strictness knobs.
//!
//! # Example
//!
//! ```toml
//! [check]
//! warn_unknown_keys = true    # Warn about unrecognized frontmatter keys
//! require_body = false        # Treat an empty activity body as an error
//! ```

use serde::{Deserialize, Serialize};

/// Schema check settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSection {
    /// Warn about frontmatter keys the schema does not know.
    /// Catches typos like `difficultylevel` that would silently drop data.
    pub warn_unknown_keys: bool,

    /// Treat an empty markdown body as an error instead of a warning.
    pub require_body: bool,
}

impl Default for CheckSection {
    fn default() -> Self {
        Self {
            warn_unknown_keys: true,
            require_body: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_check_defaults() {
        let config = test_parse_config("");
        assert!(config.check.warn_unknown_keys);
        assert!(!config.check.require_body);
    }

    #[test]
    fn test_check_override() {
        let config = test_parse_config("[check]\nwarn_unknown_keys = false\nrequire_body = true");
        assert!(!config.check.warn_unknown_keys);
        assert!(config.check.require_body);
    }
}
