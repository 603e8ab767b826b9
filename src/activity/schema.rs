//! Schema rules beyond what frontmatter deserialization enforces.

use rustc_hash::FxHashSet;
use url::Url;

use super::{Activity, Term};
use crate::config::CheckSection;

/// How severe a schema issue is.
///
/// Errors fail `check` (and therefore `build`); warnings are printed but
/// never fail anything. `--warn-only` downgrades errors at report time,
/// not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single schema issue in one record.
#[derive(Debug, Clone)]
pub struct Issue {
    pub severity: Severity,
    /// Frontmatter field path as written on disk (`printable.url`,
    /// `vocabulary[2].pinyin`), or `slug`/`body` for derived checks.
    pub target: String,
    pub reason: String,
}

impl Issue {
    fn error(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            target: target.into(),
            reason: reason.into(),
        }
    }

    fn warning(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            target: target.into(),
            reason: reason.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Check one record against the schema rules.
///
/// `known_slugs` is the slug set of the whole collection (for
/// `relatedActivities` resolution).
pub fn check_record(
    activity: &Activity,
    known_slugs: &FxHashSet<String>,
    options: &CheckSection,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    let meta = &activity.meta;

    // Required text fields must survive trimming
    for (field, value) in [
        ("title", &meta.title),
        ("description", &meta.description),
        ("ageRange", &meta.age_range),
        ("duration", &meta.duration),
    ] {
        if value.trim().is_empty() {
            issues.push(Issue::error(field, "must not be empty"));
        }
    }

    check_slug(&activity.slug, &mut issues);

    if let Some(printable) = &meta.printable {
        if printable.title.trim().is_empty() {
            issues.push(Issue::error("printable.title", "must not be empty"));
        }
        check_printable_url(&printable.url, &mut issues);
    }

    for related in &meta.related_activities {
        if related == &activity.slug {
            issues.push(Issue::error(
                "relatedActivities",
                format!("'{related}' references the activity itself"),
            ));
        } else if !known_slugs.contains(related) {
            issues.push(Issue::error(
                "relatedActivities",
                format!("unknown activity slug '{related}'"),
            ));
        }
    }

    check_terms(&meta.vocabulary, "vocabulary", &mut issues);
    check_terms(&meta.phrases, "phrases", &mut issues);

    // Duplicate tags match festivals no differently, so only warn
    let mut seen = FxHashSet::default();
    for tag in &meta.tags {
        if !seen.insert(tag.as_str()) {
            issues.push(Issue::warning("tags", format!("duplicate tag '{tag}'")));
        }
    }

    if options.warn_unknown_keys {
        for key in meta.extra.keys() {
            issues.push(Issue::warning(
                key.clone(),
                "unknown field (not part of the activity schema)",
            ));
        }
    }

    if activity.body.trim().is_empty() {
        let reason = "body is empty";
        if options.require_body {
            issues.push(Issue::error("body", reason));
        } else {
            issues.push(Issue::warning("body", reason));
        }
    }

    issues
}

fn check_slug(slug: &str, issues: &mut Vec<Issue>) {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        issues.push(Issue::error(
            "slug",
            format!("'{slug}' must contain only lowercase letters, digits, and hyphens"),
        ));
    }
}

fn check_printable_url(url: &str, issues: &mut Vec<Issue>) {
    if url.starts_with('/') {
        return;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                issues.push(Issue::error(
                    "printable.url",
                    format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
                ));
            } else if parsed.host().is_none() {
                issues.push(Issue::error("printable.url", "URL has no host"));
            }
        }
        Err(_) => issues.push(Issue::error(
            "printable.url",
            format!("'{url}' is neither a site-root-relative path nor an absolute URL"),
        )),
    }
}

fn check_terms(terms: &[Term], field: &str, issues: &mut Vec<Issue>) {
    for (i, term) in terms.iter().enumerate() {
        for (part, value) in [
            ("simplified", &term.simplified),
            ("pinyin", &term.pinyin),
            ("english", &term.english),
        ] {
            if value.trim().is_empty() {
                issues.push(Issue::error(
                    format!("{field}[{i}].{part}"),
                    "must not be empty",
                ));
            }
        }
    }
}
