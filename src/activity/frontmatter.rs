//! Frontmatter extraction from YAML (`---`) or TOML (`+++`) fences.

use thiserror::Error;

use super::ActivityMeta;

/// Frontmatter fence format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    Yaml,
    Toml,
}

/// Why a file's frontmatter could not be parsed into [`ActivityMeta`].
///
/// Both parser variants carry line-anchored messages from the underlying
/// deserializer, suitable for the check report as-is.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("missing frontmatter (expected `---` or `+++` fences)")]
    Missing,
    #[error("invalid YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML frontmatter: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Split a file into fenced frontmatter and body.
/// `None` means no well-formed fence pair opens the file.
pub fn detect(content: &str) -> Option<(&str, &str, FrontmatterFormat)> {
    let trimmed = content.trim_start();

    // A `---` pair fences YAML
    if trimmed.starts_with("---")
        && let Some(end) = trimmed[3..].find("\n---")
    {
        let fm = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('-').trim_start_matches('\n');
        return Some((fm, body, FrontmatterFormat::Yaml));
    }

    // A `+++` pair fences TOML
    if trimmed.starts_with("+++")
        && let Some(end) = trimmed[3..].find("\n+++")
    {
        let fm = trimmed[3..3 + end].trim();
        let body = trimmed[3 + end + 4..].trim_start_matches('+').trim_start_matches('\n');
        return Some((fm, body, FrontmatterFormat::Toml));
    }

    None
}

/// Extract and parse frontmatter, returning the metadata and body.
///
/// A file without fences fails with [`FrontmatterError::Missing`]; the check
/// report treats that as "missing frontmatter" rather than a schema issue.
pub fn extract_meta(content: &str) -> Result<(ActivityMeta, &str), FrontmatterError> {
    let (fm, body, format) = detect(content).ok_or(FrontmatterError::Missing)?;

    let meta = match format {
        FrontmatterFormat::Yaml => serde_yaml::from_str(fm)?,
        FrontmatterFormat::Toml => toml::from_str(fm)?,
    };

    Ok((meta, body))
}
