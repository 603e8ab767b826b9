//! Support types for the config layer: errors and diagnostics, field
//! paths for reporting, and the process-wide handle.

mod error;
mod field;
pub mod handle;

pub use error::{ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
pub use handle::{cfg, init_config, reload_config};
