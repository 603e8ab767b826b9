//! Failure types for config loading and validation.

use std::fmt;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use super::FieldPath;
use crate::utils::plural_count;

/// Everything that can go wrong between reading the file and `cfg()`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file is not valid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    // No #[from]: a source() chain would print every diagnostic twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One validation finding: the offending field, what is wrong with it,
/// and optionally how to fix it.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{} {}",
            "[".dimmed(),
            self.field.as_str().cyan(),
            "]".dimmed(),
            self.message
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {hint}", "= help:".yellow())?;
        }
        Ok(())
    }
}

/// Validation findings collected across every section before reporting,
/// so one run surfaces all problems instead of the first.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    entries: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.entries.push(ConfigDiagnostic {
            field,
            message: message.into(),
            hint: None,
        });
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.entries.push(ConfigDiagnostic {
            field,
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[ConfigDiagnostic] {
        &self.entries
    }

    /// `Ok` when nothing was recorded, otherwise the findings as the error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.entries.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = format!("configuration has {}:", plural_count(self.len(), "problem"));
        writeln!(f, "{}", header.red().bold())?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {entry}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
