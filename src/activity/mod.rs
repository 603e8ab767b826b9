//! Activity types: frontmatter model, extraction, loading, and storage.

mod frontmatter;
mod loader;
mod record;
pub mod schema;
mod store;

pub use frontmatter::{FrontmatterError, FrontmatterFormat, extract_meta};
pub use loader::{LoadError, LoadOutcome, load_files, slug_from_path};
pub use record::{Activity, ActivityMeta, Category, Difficulty, Printable, Skill, Term};
pub use store::{ACTIVITIES, content_fingerprint};

/// A JSON object map for storing arbitrary frontmatter fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
