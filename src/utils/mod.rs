//! Shared utilities.

pub mod hash;
pub mod path;
mod plural;

pub use plural::{plural_count, plural_ies, plural_s};
