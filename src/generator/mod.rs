//! Index artifact generation.
//!
//! Produces the static `index.json` the client-side library UI loads:
//! site header, content fingerprint, per-category counts, the observed
//! festival tags, and every activity with its body rendered to HTML.
//!
//! The generator works from the already-loaded collection; it never scans
//! the filesystem itself.

pub mod index;
pub mod markdown;

pub use index::{IndexEntry, build_index};
