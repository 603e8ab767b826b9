//! Check report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// A single reported problem
#[derive(Debug, Clone)]
pub struct ReportedIssue {
    /// The field or value that failed.
    pub target: String,
    /// What went wrong, already phrased for display.
    pub reason: String,
}

/// Unified check report for parse and schema problems
///
/// Sections are grouped by source file (project-relative) and print in a
/// stable order: parse failures first, then schema errors, then warnings.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Files whose frontmatter could not be parsed at all.
    pub parse: BTreeMap<String, Vec<ReportedIssue>>,
    /// Schema errors, grouped by source file.
    pub schema: BTreeMap<String, Vec<ReportedIssue>>,
    /// Schema warnings, grouped by source file.
    pub warnings: BTreeMap<String, Vec<ReportedIssue>>,
}

impl CheckReport {
    /// Add a parse failure.
    pub fn add_parse(&mut self, source: String, reason: String) {
        // Parse failures have no field to point at; the reason is the target
        // so the printer shows it on the arrow line.
        self.parse.entry(source).or_default().push(ReportedIssue {
            target: reason,
            reason: String::new(),
        });
    }

    /// Add a schema error.
    pub fn add_error(&mut self, source: String, target: String, reason: String) {
        self.schema
            .entry(source)
            .or_default()
            .push(ReportedIssue { target, reason });
    }

    /// Add a schema warning.
    pub fn add_warning(&mut self, source: String, target: String, reason: String) {
        self.warnings
            .entry(source)
            .or_default()
            .push(ReportedIssue { target, reason });
    }

    /// Count of files with parse failures.
    pub fn parse_file_count(&self) -> usize {
        self.parse.len()
    }

    /// Count of files with schema errors.
    pub fn schema_file_count(&self) -> usize {
        self.schema.len()
    }

    /// Total schema error count.
    pub fn schema_issue_count(&self) -> usize {
        self.schema.values().map(|v| v.len()).sum()
    }

    /// Total warning count.
    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(|v| v.len()).sum()
    }

    /// Whether the report carries no errors (warnings do not count).
    pub fn is_clean(&self) -> bool {
        self.parse.is_empty() && self.schema.is_empty()
    }

    /// Print the full report to stderr (parse -> schema -> warnings).
    pub fn print(&self) {
        self.print_section("parse", &self.parse, true);
        self.print_section("schema", &self.schema, true);
        self.print_section("warnings", &self.warnings, false);
    }

    /// One block per file, one line per issue under it.
    fn print_section(&self, name: &str, issues: &BTreeMap<String, Vec<ReportedIssue>>, error: bool) {
        if issues.is_empty() {
            return;
        }
        eprintln!();

        let file_count = issues.len();
        let issue_count: usize = issues.values().map(|v| v.len()).sum();
        let noun = if error { "error" } else { "warning" };

        // Header names the section and totals it
        let header = if error {
            name.red().bold().to_string()
        } else {
            name.yellow().bold().to_string()
        };
        eprintln!(
            "{} {}",
            header,
            format!(
                "({file_count} file{}, {issue_count} {noun}{})",
                plural_s(file_count),
                plural_s(issue_count)
            )
            .dimmed()
        );

        for (path, errs) in issues {
            // File path
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for e in errs {
                let arrow = if error {
                    "→".red().to_string()
                } else {
                    "→".yellow().to_string()
                };
                if e.reason.is_empty() {
                    eprintln!("{} {}", arrow, e.target);
                } else {
                    eprintln!("{} {} {}", arrow, e.target, e.reason);
                }
            }
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parse: usize = self.parse.values().map(|v| v.len()).sum();
        let total = parse + self.schema_issue_count();

        if total == 0 {
            write!(f, "{}", "no problems found".green())
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{}", plural_s(total)).dimmed()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_issues_by_source() {
        let mut report = CheckReport::default();
        report.add_error("a.md".into(), "title".into(), "must not be empty".into());
        report.add_error("a.md".into(), "duration".into(), "must not be empty".into());
        report.add_error("b.md".into(), "printable.url".into(), "not absolute".into());

        assert_eq!(report.schema_file_count(), 2);
        assert_eq!(report.schema_issue_count(), 3);
        assert_eq!(report.schema["a.md"].len(), 2);
    }

    #[test]
    fn test_warnings_do_not_dirty_the_report() {
        let mut report = CheckReport::default();
        report.add_warning("a.md".into(), "tags".into(), "duplicate tag 'moon'".into());

        assert!(report.is_clean());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_parse_failures_fail_the_report() {
        let mut report = CheckReport::default();
        report.add_parse("bad.md".into(), "missing frontmatter".into());

        assert!(!report.is_clean());
        assert_eq!(report.parse_file_count(), 1);
    }

    #[test]
    fn test_display_summary() {
        let report = CheckReport::default();
        assert!(report.to_string().contains("no problems found"));

        let mut report = CheckReport::default();
        report.add_error("a.md".into(), "title".into(), "must not be empty".into());
        report.add_parse("b.md".into(), "missing frontmatter".into());
        let summary = report.to_string();
        assert!(summary.contains('2'));
        assert!(summary.contains("errors"));
    }
}
